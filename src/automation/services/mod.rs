//! Application services for automation lifecycle orchestration.

mod lifecycle;
mod requests;

pub use lifecycle::{AutomationService, AutomationServiceError, AutomationServiceResult};
pub use requests::{
    CancelAutomationsRequest, SaveAutomationStateRequest, StartAutomationOutcome,
    StartAutomationRequest,
};
