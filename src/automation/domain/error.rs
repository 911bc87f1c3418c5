//! Error types for automation domain validation and parsing.

use super::AutomationPhase;
use thiserror::Error;

/// Errors returned while validating automation domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AutomationDomainError {
    /// A conflict lookup was requested without a stage or a platform.
    #[error("either a stage id or a platform id is required to scope an automation lookup")]
    MissingScope,

    /// The automation name is empty after trimming.
    #[error("automation name must not be empty")]
    EmptyAutomationName,

    /// A stored status document does not have the expected shape.
    #[error("malformed automation status: {0}")]
    MalformedStatus(String),

    /// The requested phase change is not permitted.
    #[error("invalid automation phase transition: {from} -> {to}")]
    InvalidPhaseTransition {
        /// Current phase.
        from: AutomationPhase,
        /// Requested phase.
        to: AutomationPhase,
    },
}

/// Error returned while parsing an automation phase.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown automation phase: {0}")]
pub struct ParseAutomationPhaseError(pub String);
