//! Repository port for automation status records.

use super::AutomationRepositoryResult;
use crate::automation::domain::{
    AccountId, AutomationScope, AutomationStatus, AutomationStatusId, AutomationStatusRecord,
    NewAutomationStatus, StageId, UserId,
};
use async_trait::async_trait;

/// Status store contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AutomationStatusRepository: Send + Sync {
    /// Stores a new status record and returns it with its assigned id.
    async fn insert(
        &self,
        record: &NewAutomationStatus,
    ) -> AutomationRepositoryResult<AutomationStatusRecord>;

    /// Replaces the status document of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`super::AutomationRepositoryError::NotFound`] when no record
    /// has the given id.
    async fn update_status(
        &self,
        id: AutomationStatusId,
        status: &AutomationStatus,
    ) -> AutomationRepositoryResult<()>;

    /// Finds a record by id.
    ///
    /// Returns `None` when the record does not exist.
    async fn find_by_id(
        &self,
        id: AutomationStatusId,
    ) -> AutomationRepositoryResult<Option<AutomationStatusRecord>>;

    /// Returns pending or in-progress records inside `scope`, oldest first.
    ///
    /// A matching record whose `result` block cannot be read is still
    /// returned, without that block.
    async fn find_active(
        &self,
        scope: &AutomationScope,
    ) -> AutomationRepositoryResult<Vec<AutomationStatusRecord>>;

    /// Returns every record for a user, newest first, optionally restricted
    /// to one stage.
    async fn list_for_user(
        &self,
        account_id: AccountId,
        user_id: UserId,
        stage_id: Option<StageId>,
    ) -> AutomationRepositoryResult<Vec<AutomationStatusRecord>>;
}
