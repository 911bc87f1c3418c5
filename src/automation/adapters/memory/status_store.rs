//! In-memory status store for tests and local tooling.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::automation::{
    domain::{
        AccountId, AutomationScope, AutomationStatus, AutomationStatusId, AutomationStatusRecord,
        NewAutomationStatus, StageId, UserId,
    },
    ports::{AutomationRepositoryError, AutomationRepositoryResult, AutomationStatusRepository},
};

/// Thread-safe in-memory automation status repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAutomationStatusRepository {
    state: Arc<RwLock<InMemoryStatusState>>,
}

#[derive(Debug, Default)]
struct InMemoryStatusState {
    last_id: i64,
    records: BTreeMap<AutomationStatusId, AutomationStatusRecord>,
}

impl InMemoryAutomationStatusRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored record in id order.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationRepositoryError::Persistence`] if the lock is
    /// poisoned.
    pub fn snapshot(&self) -> AutomationRepositoryResult<Vec<AutomationStatusRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.records.values().cloned().collect())
    }
}

fn lock_error<E: std::fmt::Display>(err: E) -> AutomationRepositoryError {
    AutomationRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AutomationStatusRepository for InMemoryAutomationStatusRepository {
    async fn insert(
        &self,
        record: &NewAutomationStatus,
    ) -> AutomationRepositoryResult<AutomationStatusRecord> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.last_id += 1;
        let id = AutomationStatusId::new(state.last_id);
        let stored = AutomationStatusRecord::from_persisted(
            id,
            record.target,
            record.created,
            record.status.clone(),
        );
        state.records.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_status(
        &self,
        id: AutomationStatusId,
        status: &AutomationStatus,
    ) -> AutomationRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let record = state
            .records
            .get_mut(&id)
            .ok_or(AutomationRepositoryError::NotFound(id))?;
        *record.status_mut() = status.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: AutomationStatusId,
    ) -> AutomationRepositoryResult<Option<AutomationStatusRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.records.get(&id).cloned())
    }

    async fn find_active(
        &self,
        scope: &AutomationScope,
    ) -> AutomationRepositoryResult<Vec<AutomationStatusRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .records
            .values()
            .filter(|record| scope.contains(record.target()) && record.status().is_active())
            .cloned()
            .collect())
    }

    async fn list_for_user(
        &self,
        account_id: AccountId,
        user_id: UserId,
        stage_id: Option<StageId>,
    ) -> AutomationRepositoryResult<Vec<AutomationStatusRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut records: Vec<AutomationStatusRecord> = state
            .records
            .values()
            .filter(|record| {
                let target = record.target();
                target.account_id == account_id
                    && target.user_id == user_id
                    && stage_id.is_none_or(|stage| stage == target.stage_id)
            })
            .cloned()
            .collect();
        records.sort_by(|left, right| {
            right
                .created()
                .cmp(&left.created())
                .then_with(|| right.id().cmp(&left.id()))
        });
        Ok(records)
    }
}
