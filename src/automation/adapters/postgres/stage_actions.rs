//! `PostgreSQL` stage action catalogue.

use super::{
    blocking::{AutomationPgPool, run_blocking},
    models::StageActionRow,
    schema::{features, pipeline_stage_actions},
};
use crate::automation::{
    domain::{StageActionDefinition, StageId},
    ports::{AutomationRepositoryError, AutomationRepositoryResult, StageActionRepository},
};
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed stage action repository.
#[derive(Debug, Clone)]
pub struct PostgresStageActionRepository {
    pool: AutomationPgPool,
}

impl PostgresStageActionRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AutomationPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StageActionRepository for PostgresStageActionRepository {
    async fn find_by_stage(
        &self,
        stage_id: StageId,
    ) -> AutomationRepositoryResult<Vec<StageActionDefinition>> {
        run_blocking(&self.pool, move |connection| {
            let rows = pipeline_stage_actions::table
                .inner_join(features::table)
                .filter(pipeline_stage_actions::stage_id.eq(stage_id.value()))
                .order((
                    pipeline_stage_actions::sort_order.asc(),
                    pipeline_stage_actions::id.asc(),
                ))
                .select((
                    pipeline_stage_actions::stage_id,
                    pipeline_stage_actions::sort_order,
                    pipeline_stage_actions::config,
                    features::code,
                    features::default_config,
                ))
                .load::<StageActionRow>(connection)
                .map_err(AutomationRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_definition).collect())
        })
        .await
    }
}

fn row_to_definition(row: StageActionRow) -> StageActionDefinition {
    StageActionDefinition {
        stage_id: StageId::new(row.stage_id),
        sort_order: row.sort_order,
        feature_code: row.code,
        config: row.config,
        default_config: row.default_config,
    }
}
