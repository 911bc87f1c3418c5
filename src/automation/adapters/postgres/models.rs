//! Diesel row models for automation persistence.

use super::schema::automation_statuses;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for automation status records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = automation_statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AutomationStatusRow {
    /// Status record identifier.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub id: i64,
    /// Owning account.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub account_id: i64,
    /// User who started the run.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub user_id: i64,
    /// Outreach platform.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub platform_id: i64,
    /// Pipeline stage.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub stage_id: i64,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created: DateTime<Utc>,
    /// Status document.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub status: Value,
}

/// Insert model for automation status records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = automation_statuses)]
pub struct NewAutomationStatusRow {
    /// Owning account.
    pub account_id: i64,
    /// User who started the run.
    pub user_id: i64,
    /// Outreach platform.
    pub platform_id: i64,
    /// Pipeline stage.
    pub stage_id: i64,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
    /// Status document.
    pub status: Value,
}

/// Joined stage action and feature row.
#[derive(Debug, Clone, Queryable)]
pub struct StageActionRow {
    /// Owning stage.
    pub stage_id: i64,
    /// Explicit position within the stage.
    pub sort_order: i32,
    /// Per-action configuration JSON text.
    pub config: Option<String>,
    /// Feature code.
    pub code: String,
    /// Feature default configuration JSON text.
    pub default_config: Option<String>,
}
