//! `PostgreSQL` lead directory.

use super::{
    blocking::{AutomationPgPool, run_blocking},
    schema::{lead_statuses, leads},
};
use crate::automation::{
    domain::{LeadId, LeadStatusId, StageId},
    ports::{AutomationRepositoryError, AutomationRepositoryResult, LeadRepository},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;

/// `PostgreSQL`-backed lead repository.
#[derive(Debug, Clone)]
pub struct PostgresLeadRepository {
    pool: AutomationPgPool,
}

impl PostgresLeadRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AutomationPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadRepository for PostgresLeadRepository {
    async fn find_status_ids_by_names(
        &self,
        names: &[String],
    ) -> AutomationRepositoryResult<Vec<LeadStatusId>> {
        let lookup = names.to_vec();
        run_blocking(&self.pool, move |connection| {
            let ids = lead_statuses::table
                .filter(lead_statuses::name.eq_any(lookup))
                .select(lead_statuses::id)
                .order(lead_statuses::id.asc())
                .load::<i64>(connection)
                .map_err(AutomationRepositoryError::persistence)?;
            Ok(ids.into_iter().map(LeadStatusId::new).collect())
        })
        .await
    }

    async fn find_due_leads(
        &self,
        stage_id: StageId,
        excluded: &[LeadStatusId],
        today: NaiveDate,
    ) -> AutomationRepositoryResult<Vec<LeadId>> {
        let excluded_ids: Vec<i64> = excluded.iter().map(|id| id.value()).collect();
        run_blocking(&self.pool, move |connection| {
            let ids = leads::table
                .filter(leads::stage_id.eq(stage_id.value()))
                .filter(leads::followup_date.le(today))
                .filter(
                    leads::status
                        .is_null()
                        .or(leads::status.assume_not_null().ne_all(excluded_ids)),
                )
                .select(leads::id)
                .order(leads::id.asc())
                .load::<i64>(connection)
                .map_err(AutomationRepositoryError::persistence)?;
            Ok(ids.into_iter().map(LeadId::new).collect())
        })
        .await
    }
}
