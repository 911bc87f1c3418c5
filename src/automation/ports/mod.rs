//! Port contracts for the automation lifecycle.
//!
//! Ports define infrastructure-agnostic interfaces used by automation
//! services.

mod error;
pub mod leads;
pub mod stage_actions;
pub mod status_store;

pub use error::{AutomationRepositoryError, AutomationRepositoryResult};
pub use leads::LeadRepository;
pub use stage_actions::StageActionRepository;
pub use status_store::AutomationStatusRepository;

#[cfg(test)]
pub use leads::MockLeadRepository;
#[cfg(test)]
pub use stage_actions::MockStageActionRepository;
#[cfg(test)]
pub use status_store::MockAutomationStatusRepository;
