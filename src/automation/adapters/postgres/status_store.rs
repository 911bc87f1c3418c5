//! `PostgreSQL` status store.

use super::{
    blocking::{AutomationPgPool, run_blocking},
    models::{AutomationStatusRow, NewAutomationStatusRow},
    schema::automation_statuses,
};
use crate::automation::{
    domain::{
        AccountId, AutomationScope, AutomationStatus, AutomationStatusId, AutomationStatusRecord,
        AutomationTarget, NewAutomationStatus, PlatformId, StageId, UserId,
    },
    ports::{AutomationRepositoryError, AutomationRepositoryResult, AutomationStatusRepository},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable};
use serde_json::Value;
use tracing::warn;

/// Selects active runs by matching the phase suffix of the document name.
const FIND_ACTIVE_SQL: &str = concat!(
    "SELECT id, account_id, user_id, platform_id, stage_id, created, status ",
    "FROM automation_statuses ",
    "WHERE account_id = $1 AND user_id = $2 ",
    "AND ($3::BIGINT IS NULL OR stage_id = $3) ",
    "AND ($4::BIGINT IS NULL OR platform_id = $4) ",
    "AND (status->>'name' LIKE '%\\_pending' OR status->>'name' LIKE '%\\_in\\_progress') ",
    "ORDER BY created ASC, id ASC",
);

/// `PostgreSQL`-backed automation status repository.
#[derive(Debug, Clone)]
pub struct PostgresAutomationStatusRepository {
    pool: AutomationPgPool,
}

impl PostgresAutomationStatusRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AutomationPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AutomationStatusRepository for PostgresAutomationStatusRepository {
    async fn insert(
        &self,
        record: &NewAutomationStatus,
    ) -> AutomationRepositoryResult<AutomationStatusRecord> {
        let new_row = to_new_row(record)?;
        run_blocking(&self.pool, move |connection| {
            let row = diesel::insert_into(automation_statuses::table)
                .values(&new_row)
                .returning(AutomationStatusRow::as_returning())
                .get_result::<AutomationStatusRow>(connection)
                .map_err(AutomationRepositoryError::persistence)?;
            row_to_record(row)
        })
        .await
    }

    async fn update_status(
        &self,
        id: AutomationStatusId,
        status: &AutomationStatus,
    ) -> AutomationRepositoryResult<()> {
        let document = encode_status(status)?;
        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(automation_statuses::table.find(id.value()))
                .set(automation_statuses::status.eq(document))
                .execute(connection)
                .map_err(AutomationRepositoryError::persistence)?;
            if updated == 0 {
                return Err(AutomationRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: AutomationStatusId,
    ) -> AutomationRepositoryResult<Option<AutomationStatusRecord>> {
        run_blocking(&self.pool, move |connection| {
            let row = automation_statuses::table
                .find(id.value())
                .select(AutomationStatusRow::as_select())
                .first::<AutomationStatusRow>(connection)
                .optional()
                .map_err(AutomationRepositoryError::persistence)?;
            row.map(row_to_record).transpose()
        })
        .await
    }

    async fn find_active(
        &self,
        scope: &AutomationScope,
    ) -> AutomationRepositoryResult<Vec<AutomationStatusRecord>> {
        let lookup = *scope;
        run_blocking(&self.pool, move |connection| {
            let rows = find_active_rows(connection, &lookup)?;
            rows.into_iter().map(row_to_conflict).collect()
        })
        .await
    }

    async fn list_for_user(
        &self,
        account_id: AccountId,
        user_id: UserId,
        stage_id: Option<StageId>,
    ) -> AutomationRepositoryResult<Vec<AutomationStatusRecord>> {
        run_blocking(&self.pool, move |connection| {
            let mut query = automation_statuses::table
                .filter(automation_statuses::account_id.eq(account_id.value()))
                .filter(automation_statuses::user_id.eq(user_id.value()))
                .into_boxed();
            if let Some(stage) = stage_id {
                query = query.filter(automation_statuses::stage_id.eq(stage.value()));
            }
            let rows = query
                .order((
                    automation_statuses::created.desc(),
                    automation_statuses::id.desc(),
                ))
                .select(AutomationStatusRow::as_select())
                .load::<AutomationStatusRow>(connection)
                .map_err(AutomationRepositoryError::persistence)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }
}

fn find_active_rows(
    connection: &mut PgConnection,
    scope: &AutomationScope,
) -> AutomationRepositoryResult<Vec<AutomationStatusRow>> {
    diesel::sql_query(FIND_ACTIVE_SQL)
        .bind::<BigInt, _>(scope.account_id().value())
        .bind::<BigInt, _>(scope.user_id().value())
        .bind::<Nullable<BigInt>, _>(scope.stage_id().map(StageId::value))
        .bind::<Nullable<BigInt>, _>(scope.platform_id().map(PlatformId::value))
        .load::<AutomationStatusRow>(connection)
        .map_err(AutomationRepositoryError::persistence)
}

fn to_new_row(record: &NewAutomationStatus) -> AutomationRepositoryResult<NewAutomationStatusRow> {
    let status = encode_status(&record.status)?;
    let target = record.target;
    Ok(NewAutomationStatusRow {
        account_id: target.account_id.value(),
        user_id: target.user_id.value(),
        platform_id: target.platform_id.value(),
        stage_id: target.stage_id.value(),
        created: record.created,
        status,
    })
}

fn encode_status(status: &AutomationStatus) -> AutomationRepositoryResult<Value> {
    status
        .to_value()
        .map_err(AutomationRepositoryError::InvalidDocument)
}

fn row_to_record(row: AutomationStatusRow) -> AutomationRepositoryResult<AutomationStatusRecord> {
    let (id, target, created, document) = split_row(row);
    let status = AutomationStatus::from_value(document)
        .map_err(|source| AutomationRepositoryError::MalformedRecord { id, source })?;
    Ok(AutomationStatusRecord::from_persisted(id, target, created, status))
}

/// Converts a row matched by the active lookup.
///
/// The lookup matched on the name alone, so a row whose `result` block no
/// longer parses is still returned as a conflict, without that block.
fn row_to_conflict(row: AutomationStatusRow) -> AutomationRepositoryResult<AutomationStatusRecord> {
    let (id, target, created, document) = split_row(row);
    let (status, salvaged) = AutomationStatus::salvage(document)
        .map_err(|source| AutomationRepositoryError::MalformedRecord { id, source })?;
    if salvaged {
        warn!(
            %id,
            name = status.name(),
            "active automation status has an unreadable result block"
        );
    }
    Ok(AutomationStatusRecord::from_persisted(id, target, created, status))
}

fn split_row(
    row: AutomationStatusRow,
) -> (AutomationStatusId, AutomationTarget, DateTime<Utc>, Value) {
    let AutomationStatusRow {
        id,
        account_id,
        user_id,
        platform_id,
        stage_id,
        created,
        status,
    } = row;
    let target = AutomationTarget {
        account_id: AccountId::new(account_id),
        user_id: UserId::new(user_id),
        platform_id: PlatformId::new(platform_id),
        stage_id: StageId::new(stage_id),
    };
    (AutomationStatusId::new(id), target, created, status)
}
