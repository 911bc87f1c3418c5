//! In-memory stage action catalogue.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::automation::{
    domain::{StageActionDefinition, StageId},
    ports::{AutomationRepositoryError, AutomationRepositoryResult, StageActionRepository},
};

/// Thread-safe in-memory stage action repository seeded by the caller.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStageActionRepository {
    actions: Arc<RwLock<Vec<StageActionDefinition>>>,
}

impl InMemoryStageActionRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an action definition.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationRepositoryError::Persistence`] if the lock is
    /// poisoned.
    pub fn add_action(&self, action: StageActionDefinition) -> AutomationRepositoryResult<()> {
        let mut actions = self.actions.write().map_err(|err| {
            AutomationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        actions.push(action);
        Ok(())
    }
}

#[async_trait]
impl StageActionRepository for InMemoryStageActionRepository {
    async fn find_by_stage(
        &self,
        stage_id: StageId,
    ) -> AutomationRepositoryResult<Vec<StageActionDefinition>> {
        let actions = self.actions.read().map_err(|err| {
            AutomationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut found: Vec<StageActionDefinition> = actions
            .iter()
            .filter(|action| action.stage_id == stage_id)
            .cloned()
            .collect();
        found.sort_by_key(|action| action.sort_order);
        Ok(found)
    }
}
