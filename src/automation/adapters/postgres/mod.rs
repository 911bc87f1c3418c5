//! `PostgreSQL` adapters for automation persistence.

mod blocking;
mod leads;
mod models;
mod schema;
mod stage_actions;
mod status_store;

pub use blocking::AutomationPgPool;
pub use leads::PostgresLeadRepository;
pub use stage_actions::PostgresStageActionRepository;
pub use status_store::PostgresAutomationStatusRepository;
