//! Automation lifecycle phases and the name-suffix convention that encodes
//! them.
//!
//! A stored automation name such as `linkedin_outreach_in_progress` carries
//! its phase as a suffix. [`AutomationPhase::split_name`] recognises the known
//! suffixes; [`set_new_status_in_name`] is the plain last-underscore rewrite
//! used for names whose suffix is not a known phase.

use super::ParseAutomationPhaseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase of an automation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomationPhase {
    /// Run has been recorded but has not started processing leads.
    Pending,
    /// Run is processing leads.
    InProgress,
    /// Run finished processing every lead.
    Completed,
    /// Run was stopped before finishing.
    Cancelled,
    /// Run stopped because of an execution failure.
    Failed,
}

impl AutomationPhase {
    /// All phases, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
        Self::Failed,
    ];

    /// Returns the canonical storage representation used as a name suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }

    /// Returns whether a run in this phase blocks a new run for its scope.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    /// Returns whether the phase is final.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !self.is_active()
    }

    /// Returns whether transition to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Pending,
                Self::InProgress | Self::Completed | Self::Cancelled | Self::Failed
            ) | (
                Self::InProgress,
                Self::Completed | Self::Cancelled | Self::Failed
            )
        )
    }

    /// Splits a stored automation name into its base and phase.
    ///
    /// Returns `None` when the name does not end in `_<phase>` for a known
    /// phase.
    #[must_use]
    pub fn split_name(name: &str) -> Option<(&str, Self)> {
        Self::ALL.into_iter().find_map(|phase| {
            name.strip_suffix(phase.as_str())
                .and_then(|rest| rest.strip_suffix('_'))
                .map(|base| (base, phase))
        })
    }

    /// Builds a stored automation name from a base name.
    #[must_use]
    pub fn compose_name(self, base: &str) -> String {
        format!("{base}_{}", self.as_str())
    }

    /// Rewrites the phase suffix of `name` to this phase.
    ///
    /// Known suffixes are replaced as a whole, so `run_in_progress` becomes
    /// `run_cancelled`. Any other name falls back to
    /// [`set_new_status_in_name`].
    #[must_use]
    pub fn rename(self, name: &str) -> String {
        match Self::split_name(name) {
            Some((base, _)) => self.compose_name(base),
            None => set_new_status_in_name(name, self.as_str()),
        }
    }
}

impl fmt::Display for AutomationPhase {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AutomationPhase {
    type Error = ParseAutomationPhaseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseAutomationPhaseError(value.to_owned())),
        }
    }
}

/// Replaces everything after the last underscore in `name` with
/// `new_status`.
///
/// Names without an underscore are returned unchanged.
#[must_use]
pub fn set_new_status_in_name(name: &str, new_status: &str) -> String {
    match name.rsplit_once('_') {
        Some((base, _)) => format!("{base}_{new_status}"),
        None => name.to_owned(),
    }
}
