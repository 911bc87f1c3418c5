//! Request and outcome types for the automation service.

use crate::automation::domain::{
    AccountId, AutomationStatusRecord, AutomationTarget, PlatformId, StageId, UserId,
};
use serde_json::Value;

/// Request payload for persisting a new run status.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveAutomationStateRequest {
    /// Scope of the run.
    pub target: AutomationTarget,
    /// Status document; must be an object with a string `name`.
    pub payload: Value,
}

impl SaveAutomationStateRequest {
    /// Creates a save request.
    #[must_use]
    pub const fn new(target: AutomationTarget, payload: Value) -> Self {
        Self { target, payload }
    }
}

/// Request payload for cancelling runs that would conflict with a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelAutomationsRequest {
    /// Owning account.
    pub account_id: AccountId,
    /// User whose runs are cancelled.
    pub user_id: UserId,
    /// Platform of the superseding run. Recorded in logs only; the lookup is
    /// scoped by account, user, and stage.
    pub platform_id: PlatformId,
    /// Stage whose runs are cancelled.
    pub stage_id: StageId,
    stopped_by: Option<String>,
    reason: Option<String>,
}

impl CancelAutomationsRequest {
    /// Creates a cancellation request with the configured default actor and
    /// reason.
    #[must_use]
    pub const fn new(
        account_id: AccountId,
        user_id: UserId,
        platform_id: PlatformId,
        stage_id: StageId,
    ) -> Self {
        Self {
            account_id,
            user_id,
            platform_id,
            stage_id,
            stopped_by: None,
            reason: None,
        }
    }

    /// Creates a cancellation request covering `target`.
    #[must_use]
    pub const fn for_target(target: &AutomationTarget) -> Self {
        Self::new(
            target.account_id,
            target.user_id,
            target.platform_id,
            target.stage_id,
        )
    }

    /// Sets the actor recorded as `stopped_by`.
    #[must_use]
    pub fn with_stopped_by(mut self, stopped_by: impl Into<String>) -> Self {
        self.stopped_by = Some(stopped_by.into());
        self
    }

    /// Sets the reason recorded as `stopped_reason`.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Returns the requested actor, if any.
    #[must_use]
    pub fn stopped_by(&self) -> Option<&str> {
        self.stopped_by.as_deref()
    }

    /// Returns the requested reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// Request payload for starting a run from the trigger route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartAutomationRequest {
    /// Scope of the new run.
    pub target: AutomationTarget,
    /// Base name of the run; the phase suffix is appended.
    pub automation_name: String,
    force: bool,
    started_by: Option<String>,
}

impl StartAutomationRequest {
    /// Creates a start request that stops at existing runs.
    #[must_use]
    pub fn new(target: AutomationTarget, automation_name: impl Into<String>) -> Self {
        Self {
            target,
            automation_name: automation_name.into(),
            force: false,
            started_by: None,
        }
    }

    /// Cancels existing runs instead of asking for confirmation.
    #[must_use]
    pub fn confirmed(mut self) -> Self {
        self.force = true;
        self
    }

    /// Records who started the run.
    #[must_use]
    pub fn with_started_by(mut self, started_by: impl Into<String>) -> Self {
        self.started_by = Some(started_by.into());
        self
    }

    /// Returns whether existing runs should be superseded.
    #[must_use]
    pub const fn force(&self) -> bool {
        self.force
    }

    /// Returns who started the run, if recorded.
    #[must_use]
    pub fn started_by(&self) -> Option<&str> {
        self.started_by.as_deref()
    }
}

/// Result of a start request.
#[derive(Debug, Clone, PartialEq)]
pub enum StartAutomationOutcome {
    /// The run was recorded as pending.
    Started(AutomationStatusRecord),
    /// Runs already exist for the scope; the caller must confirm to replace
    /// them.
    RequiresConfirmation {
        /// Pending or running records that blocked the start.
        existing: Vec<AutomationStatusRecord>,
    },
    /// There was nothing to process, so no run was recorded.
    NothingToRun {
        /// Leads due in the stage.
        lead_count: usize,
        /// Actions configured on the stage.
        action_count: usize,
    },
}
