//! In-memory lead directory.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use crate::automation::{
    domain::{Lead, LeadId, LeadStatus, LeadStatusId, StageId},
    ports::{AutomationRepositoryError, AutomationRepositoryResult, LeadRepository},
};

/// Thread-safe in-memory lead repository seeded by the caller.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeadRepository {
    state: Arc<RwLock<InMemoryLeadState>>,
}

#[derive(Debug, Default)]
struct InMemoryLeadState {
    statuses: Vec<LeadStatus>,
    leads: Vec<Lead>,
}

impl InMemoryLeadRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a lead-status lookup row.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationRepositoryError::Persistence`] if the lock is
    /// poisoned.
    pub fn add_status(&self, status: LeadStatus) -> AutomationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.statuses.push(status);
        Ok(())
    }

    /// Adds a lead.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationRepositoryError::Persistence`] if the lock is
    /// poisoned.
    pub fn add_lead(&self, lead: Lead) -> AutomationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.leads.push(lead);
        Ok(())
    }
}

fn lock_error<E: std::fmt::Display>(err: E) -> AutomationRepositoryError {
    AutomationRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl LeadRepository for InMemoryLeadRepository {
    async fn find_status_ids_by_names(
        &self,
        names: &[String],
    ) -> AutomationRepositoryResult<Vec<LeadStatusId>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .statuses
            .iter()
            .filter(|status| names.contains(&status.name))
            .map(|status| status.id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect())
    }

    async fn find_due_leads(
        &self,
        stage_id: StageId,
        excluded: &[LeadStatusId],
        today: NaiveDate,
    ) -> AutomationRepositoryResult<Vec<LeadId>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .leads
            .iter()
            .filter(|lead| lead.stage_id == stage_id && lead.is_due(today, excluded))
            .map(|lead| lead.id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect())
    }
}
