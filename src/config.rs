//! Runtime configuration for the automation services.
//!
//! Settings are read from environment variables through a lookup function so
//! callers and tests can supply their own source.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `LEAD_MAESTRO_EXCLUDED_STATUSES` | comma-separated lead-status names excluded from automation | `Do Not Contact,Not Interested,Unsubscribed` |
//! | `LEAD_MAESTRO_FAILURE_POLICY` | `fail_open` or `fail_closed` | `fail_open` |
//! | `LEAD_MAESTRO_CANCEL_ACTOR` | actor recorded when a run is superseded | `system` |
//! | `DATABASE_URL` | `PostgreSQL` connection string | required |
//! | `LEAD_MAESTRO_DB_MAX_CONNECTIONS` | pool size | `5` |

use crate::automation::adapters::postgres::AutomationPgPool;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::fmt;
use thiserror::Error;

const EXCLUDED_STATUSES_VAR: &str = "LEAD_MAESTRO_EXCLUDED_STATUSES";
const FAILURE_POLICY_VAR: &str = "LEAD_MAESTRO_FAILURE_POLICY";
const CANCEL_ACTOR_VAR: &str = "LEAD_MAESTRO_CANCEL_ACTOR";
const DATABASE_URL_VAR: &str = "DATABASE_URL";
const MAX_CONNECTIONS_VAR: &str = "LEAD_MAESTRO_DB_MAX_CONNECTIONS";

/// Lead-status names that disqualify a lead from automation by default.
pub const DEFAULT_EXCLUDED_STATUSES: [&str; 3] = ["Do Not Contact", "Not Interested", "Unsubscribed"];

const DEFAULT_CANCEL_ACTOR: &str = "system";
const DEFAULT_CANCEL_REASON: &str = "superseded by a new automation run";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required configuration variable {0}")]
    MissingVariable(&'static str),

    /// A variable holds a value that cannot be used.
    #[error("invalid value '{value}' for {variable}")]
    InvalidValue {
        /// Variable name.
        variable: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The connection pool could not be created.
    #[error("failed to build database pool: {0}")]
    Pool(#[from] PoolError),
}

/// How read paths react to repository failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FailurePolicy {
    /// Log the failure and answer with an empty list or `false`.
    #[default]
    FailOpen,
    /// Propagate the failure to the caller.
    FailClosed,
}

impl FailurePolicy {
    /// Returns the canonical configuration representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FailOpen => "fail_open",
            Self::FailClosed => "fail_closed",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for FailurePolicy {
    type Error = ConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fail_open" | "open" => Ok(Self::FailOpen),
            "fail_closed" | "closed" => Ok(Self::FailClosed),
            _ => Err(ConfigError::InvalidValue {
                variable: FAILURE_POLICY_VAR,
                value: value.to_owned(),
            }),
        }
    }
}

/// Behavioural settings for [`crate::automation::services::AutomationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationSettings {
    /// Lead-status names excluded from automation.
    pub excluded_status_labels: Vec<String>,
    /// Reaction to repository failures on read paths.
    pub failure_policy: FailurePolicy,
    /// Actor recorded when a cancellation request names none.
    pub default_cancel_actor: String,
    /// Reason recorded when a cancellation request gives none.
    pub default_cancel_reason: String,
}

impl Default for AutomationSettings {
    fn default() -> Self {
        Self {
            excluded_status_labels: DEFAULT_EXCLUDED_STATUSES
                .iter()
                .map(|label| (*label).to_owned())
                .collect(),
            failure_policy: FailurePolicy::default(),
            default_cancel_actor: DEFAULT_CANCEL_ACTOR.to_owned(),
            default_cancel_reason: DEFAULT_CANCEL_REASON.to_owned(),
        }
    }
}

impl AutomationSettings {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads settings through `lookup`, falling back to defaults for unset
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the failure policy is
    /// unknown or the exclusion list is present but empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(raw) = lookup(EXCLUDED_STATUSES_VAR) {
            let labels: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_owned)
                .collect();
            if labels.is_empty() {
                return Err(ConfigError::InvalidValue {
                    variable: EXCLUDED_STATUSES_VAR,
                    value: raw,
                });
            }
            settings.excluded_status_labels = labels;
        }

        if let Some(raw) = lookup(FAILURE_POLICY_VAR) {
            settings.failure_policy = FailurePolicy::try_from(raw.as_str())?;
        }

        if let Some(actor) = lookup(CANCEL_ACTOR_VAR).filter(|value| !value.trim().is_empty()) {
            settings.default_cancel_actor = actor.trim().to_owned();
        }

        Ok(settings)
    }
}

/// Connection settings for the `PostgreSQL` adapters.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Connection string.
    pub url: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DatabaseSettings")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseSettings {
    /// Loads database settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVariable`] when `DATABASE_URL` is unset
    /// or [`ConfigError::InvalidValue`] for a non-positive pool size.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads database settings through `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup(DATABASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVariable(DATABASE_URL_VAR))?;

        let max_connections = match lookup(MAX_CONNECTIONS_VAR) {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        variable: MAX_CONNECTIONS_VAR,
                        value: raw,
                    });
                }
            },
        };

        Ok(Self {
            url,
            max_connections,
        })
    }

    /// Builds the connection pool shared by the `PostgreSQL` adapters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the pool cannot be initialised.
    pub fn build_pool(&self) -> Result<AutomationPgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.url.as_str());
        let pool = Pool::builder()
            .max_size(self.max_connections)
            .build(manager)?;
        Ok(pool)
    }
}
