//! Typed automation status document.
//!
//! The status store keeps one JSON document per automation attempt. The
//! document always has a `name` whose suffix encodes the lifecycle phase and,
//! once execution has started or been stopped, a `result` object. Any other
//! top-level keys written by the automation runner (lead ids, resolved
//! actions, progress counters) are carried through untouched.

use super::{AutomationDomainError, AutomationPhase};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const RESERVED_KEYS: [&str; 2] = ["name", "result"];

/// Outcome block of an automation status document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutomationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stopped: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stopped_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stopped_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stopped_reason: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl AutomationResult {
    /// Returns whether the run was stopped.
    #[must_use]
    pub fn stopped(&self) -> bool {
        self.stopped.unwrap_or(false)
    }

    /// Returns when the run was stopped.
    #[must_use]
    pub const fn stopped_at(&self) -> Option<DateTime<Utc>> {
        self.stopped_at
    }

    /// Returns who stopped the run.
    #[must_use]
    pub fn stopped_by(&self) -> Option<&str> {
        self.stopped_by.as_deref()
    }

    /// Returns why the run was stopped.
    #[must_use]
    pub fn stopped_reason(&self) -> Option<&str> {
        self.stopped_reason.as_deref()
    }

    /// Returns a runner-defined result field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Who stopped a run and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationMetadata {
    /// Actor recorded as `stopped_by`.
    pub stopped_by: String,
    /// Reason recorded as `stopped_reason`.
    pub reason: String,
    /// Timestamp recorded as `stopped_at`.
    pub stopped_at: DateTime<Utc>,
}

/// Status document of one automation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationStatus {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<AutomationResult>,
    #[serde(flatten)]
    details: Map<String, Value>,
}

impl AutomationStatus {
    /// Creates a status document for a run named `base_name` in `phase`.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationDomainError::EmptyAutomationName`] when the base
    /// name is empty after trimming.
    pub fn new(base_name: &str, phase: AutomationPhase) -> Result<Self, AutomationDomainError> {
        let trimmed = base_name.trim();
        if trimmed.is_empty() {
            return Err(AutomationDomainError::EmptyAutomationName);
        }
        Ok(Self {
            name: phase.compose_name(trimmed),
            result: None,
            details: Map::new(),
        })
    }

    /// Parses and validates a stored status document.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationDomainError::MalformedStatus`] when the text is not
    /// a JSON object with a string `name`, or when `result` is present but is
    /// not an object.
    pub fn from_json_str(raw: &str) -> Result<Self, AutomationDomainError> {
        serde_json::from_str(raw).map_err(malformed)
    }

    /// Validates an already parsed status document.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationDomainError::MalformedStatus`] under the same
    /// conditions as [`Self::from_json_str`].
    pub fn from_value(value: Value) -> Result<Self, AutomationDomainError> {
        serde_json::from_value(value).map_err(malformed)
    }

    /// Parses a stored document, dropping an unusable `result` block.
    ///
    /// Falls back to [`Self::from_value`] on the document without its
    /// `result` when the strict parse fails, so a run whose name still
    /// carries a phase stays visible to conflict checks. Returns the
    /// document together with whether anything was dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationDomainError::MalformedStatus`] when the value is
    /// not an object with a string `name`.
    pub fn salvage(value: Value) -> Result<(Self, bool), AutomationDomainError> {
        let strict_error = match Self::from_value(value.clone()) {
            Ok(status) => return Ok((status, false)),
            Err(err) => err,
        };
        let Value::Object(mut document) = value else {
            return Err(strict_error);
        };
        if document.remove("result").is_none() {
            return Err(strict_error);
        }
        Self::from_value(Value::Object(document)).map(|status| (status, true))
    }

    /// Serialises the document to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationDomainError::MalformedStatus`] if a runner-defined
    /// field cannot be serialised.
    pub fn to_value(&self) -> Result<Value, AutomationDomainError> {
        serde_json::to_value(self).map_err(malformed)
    }

    /// Adds a runner-defined top-level field.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationDomainError::MalformedStatus`] when `key` is `name`
    /// or `result`, which are owned by the lifecycle.
    pub fn with_detail(
        mut self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<Self, AutomationDomainError> {
        let field = key.into();
        if RESERVED_KEYS.contains(&field.as_str()) {
            return Err(AutomationDomainError::MalformedStatus(format!(
                "'{field}' is a reserved status field"
            )));
        }
        self.details.insert(field, value);
        Ok(self)
    }

    /// Returns the stored name, including its phase suffix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the phase encoded in the name, if the suffix is recognised.
    #[must_use]
    pub fn phase(&self) -> Option<AutomationPhase> {
        AutomationPhase::split_name(&self.name).map(|(_, phase)| phase)
    }

    /// Returns whether the run is pending or in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase().is_some_and(AutomationPhase::is_active)
    }

    /// Returns the result block, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&AutomationResult> {
        self.result.as_ref()
    }

    /// Returns a runner-defined top-level field.
    #[must_use]
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }

    /// Marks the run as cancelled.
    ///
    /// Writes the stop metadata into the result block, creating the block
    /// when the document has none, and renames the phase suffix to
    /// `cancelled`. The whole known suffix is replaced, so `run_in_progress`
    /// becomes `run_cancelled`, unlike [`super::set_new_status_in_name`],
    /// which would give `run_in_cancelled`.
    pub fn cancel(&mut self, metadata: CancellationMetadata) {
        let result = self.result.get_or_insert_with(AutomationResult::default);
        result.stopped = Some(true);
        result.stopped_at = Some(metadata.stopped_at);
        result.stopped_by = Some(metadata.stopped_by);
        result.stopped_reason = Some(metadata.reason);
        self.name = AutomationPhase::Cancelled.rename(&self.name);
    }

    /// Moves the run to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationDomainError::MalformedStatus`] when the current
    /// name carries no recognised phase, or
    /// [`AutomationDomainError::InvalidPhaseTransition`] when the lifecycle
    /// forbids the move.
    pub fn transition_to(&mut self, target: AutomationPhase) -> Result<(), AutomationDomainError> {
        let current = self.phase().ok_or_else(|| {
            AutomationDomainError::MalformedStatus(format!(
                "name '{}' does not end in a known phase",
                self.name
            ))
        })?;
        if !current.can_transition_to(target) {
            return Err(AutomationDomainError::InvalidPhaseTransition {
                from: current,
                to: target,
            });
        }
        self.name = target.rename(&self.name);
        Ok(())
    }
}

fn malformed(err: serde_json::Error) -> AutomationDomainError {
    AutomationDomainError::MalformedStatus(err.to_string())
}
