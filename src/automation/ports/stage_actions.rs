//! Read-only port over stage action configuration.

use super::AutomationRepositoryResult;
use crate::automation::domain::{StageActionDefinition, StageId};
use async_trait::async_trait;

/// Stage action lookup contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StageActionRepository: Send + Sync {
    /// Returns the actions configured for `stage_id` in ascending sort order.
    async fn find_by_stage(
        &self,
        stage_id: StageId,
    ) -> AutomationRepositoryResult<Vec<StageActionDefinition>>;
}
