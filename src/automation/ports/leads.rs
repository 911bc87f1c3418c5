//! Read-only port over leads and lead statuses.

use super::AutomationRepositoryResult;
use crate::automation::domain::{LeadId, LeadStatusId, StageId};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Lead lookup contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Returns ids of lead statuses whose name equals one of `names`.
    async fn find_status_ids_by_names(
        &self,
        names: &[String],
    ) -> AutomationRepositoryResult<Vec<LeadStatusId>>;

    /// Returns ids of leads in `stage_id` that are due on `today` and whose
    /// status is not in `excluded`.
    async fn find_due_leads(
        &self,
        stage_id: StageId,
        excluded: &[LeadStatusId],
        today: NaiveDate,
    ) -> AutomationRepositoryResult<Vec<LeadId>>;
}
