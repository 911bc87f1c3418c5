//! Persisted automation status records and their lookup scope.

use super::{
    AccountId, AutomationDomainError, AutomationStatus, AutomationStatusId, PlatformId, StageId,
    UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Account, user, platform, and stage a run belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutomationTarget {
    /// Owning account.
    pub account_id: AccountId,
    /// User who started the run.
    pub user_id: UserId,
    /// Outreach platform used by the run.
    pub platform_id: PlatformId,
    /// Pipeline stage processed by the run.
    pub stage_id: StageId,
}

/// Filter used to find runs that may conflict with a new one.
///
/// At least one of `stage_id` and `platform_id` is always set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutomationScope {
    account_id: AccountId,
    user_id: UserId,
    stage_id: Option<StageId>,
    platform_id: Option<PlatformId>,
}

impl AutomationScope {
    /// Creates a validated lookup scope.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationDomainError::MissingScope`] when neither a stage
    /// nor a platform is given.
    pub const fn new(
        account_id: AccountId,
        user_id: UserId,
        stage_id: Option<StageId>,
        platform_id: Option<PlatformId>,
    ) -> Result<Self, AutomationDomainError> {
        if stage_id.is_none() && platform_id.is_none() {
            return Err(AutomationDomainError::MissingScope);
        }
        Ok(Self {
            account_id,
            user_id,
            stage_id,
            platform_id,
        })
    }

    /// Returns the account filter.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Returns the user filter.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the stage filter, if any.
    #[must_use]
    pub const fn stage_id(&self) -> Option<StageId> {
        self.stage_id
    }

    /// Returns the platform filter, if any.
    #[must_use]
    pub const fn platform_id(&self) -> Option<PlatformId> {
        self.platform_id
    }

    /// Returns whether a run for `target` falls inside this scope.
    #[must_use]
    pub fn contains(&self, target: &AutomationTarget) -> bool {
        target.account_id == self.account_id
            && target.user_id == self.user_id
            && self.stage_id.is_none_or(|stage| stage == target.stage_id)
            && self
                .platform_id
                .is_none_or(|platform| platform == target.platform_id)
    }
}

/// A status document that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAutomationStatus {
    /// Scope of the run.
    pub target: AutomationTarget,
    /// Creation timestamp.
    pub created: DateTime<Utc>,
    /// Initial status document.
    pub status: AutomationStatus,
}

impl NewAutomationStatus {
    /// Creates an unsaved record stamped with the current clock time.
    #[must_use]
    pub fn new(target: AutomationTarget, status: AutomationStatus, clock: &impl Clock) -> Self {
        Self {
            target,
            created: clock.utc(),
            status,
        }
    }
}

/// A stored automation status row.
#[derive(Debug, Clone, PartialEq)]
pub struct AutomationStatusRecord {
    id: AutomationStatusId,
    target: AutomationTarget,
    created: DateTime<Utc>,
    status: AutomationStatus,
}

impl AutomationStatusRecord {
    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: AutomationStatusId,
        target: AutomationTarget,
        created: DateTime<Utc>,
        status: AutomationStatus,
    ) -> Self {
        Self {
            id,
            target,
            created,
            status,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> AutomationStatusId {
        self.id
    }

    /// Returns the scope the run belongs to.
    #[must_use]
    pub const fn target(&self) -> &AutomationTarget {
        &self.target
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns the status document.
    #[must_use]
    pub const fn status(&self) -> &AutomationStatus {
        &self.status
    }

    /// Returns a mutable reference to the status document.
    pub const fn status_mut(&mut self) -> &mut AutomationStatus {
        &mut self.status
    }
}
