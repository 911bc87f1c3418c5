//! In-memory adapters for the automation ports.

mod leads;
mod stage_actions;
mod status_store;

pub use leads::InMemoryLeadRepository;
pub use stage_actions::InMemoryStageActionRepository;
pub use status_store::InMemoryAutomationStatusRepository;
