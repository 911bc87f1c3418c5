//! Error type shared by automation persistence ports.

use crate::automation::domain::{AutomationDomainError, AutomationStatusId};
use std::sync::Arc;
use thiserror::Error;

/// Result type for automation repository operations.
pub type AutomationRepositoryResult<T> = Result<T, AutomationRepositoryError>;

/// Errors returned by automation repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AutomationRepositoryError {
    /// The status record was not found.
    #[error("automation status not found: {0}")]
    NotFound(AutomationStatusId),

    /// A stored status document failed validation.
    #[error("automation status {id} is malformed: {source}")]
    MalformedRecord {
        /// Offending record.
        id: AutomationStatusId,
        /// Validation failure.
        source: AutomationDomainError,
    },

    /// A status document could not be encoded for storage.
    #[error("automation status document cannot be stored: {0}")]
    InvalidDocument(AutomationDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AutomationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
