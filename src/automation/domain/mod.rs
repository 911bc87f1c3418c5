//! Domain model for the automation lifecycle.
//!
//! Status documents, phases, lead selection rules, and action configuration
//! resolution live here, free of any storage concerns.

mod action;
mod error;
mod ids;
mod lead;
mod phase;
mod record;
mod status;

pub use action::{ResolvedAction, StageActionDefinition, resolve_config};
pub use error::{AutomationDomainError, ParseAutomationPhaseError};
pub use ids::{
    AccountId, AutomationStatusId, LeadId, LeadStatusId, PlatformId, StageId, UserId,
};
pub use lead::{Lead, LeadStatus};
pub use phase::{AutomationPhase, set_new_status_in_name};
pub use record::{AutomationScope, AutomationStatusRecord, AutomationTarget, NewAutomationStatus};
pub use status::{AutomationResult, AutomationStatus, CancellationMetadata};
