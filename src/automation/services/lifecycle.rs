//! Service layer for the automation lifecycle.
//!
//! [`AutomationService`] decides whether a run may start, selects the leads
//! and actions it will use, records its status, and cancels earlier runs for
//! the same scope. Read paths follow the configured [`FailurePolicy`]; the
//! status write in [`AutomationService::save_automation_state`] always
//! propagates failures.

use super::requests::{
    CancelAutomationsRequest, SaveAutomationStateRequest, StartAutomationOutcome,
    StartAutomationRequest,
};
use crate::automation::{
    domain::{
        AccountId, AutomationDomainError, AutomationPhase, AutomationScope, AutomationStatus,
        AutomationStatusId, AutomationStatusRecord, CancellationMetadata, LeadId, LeadStatusId,
        NewAutomationStatus, PlatformId, ResolvedAction, StageId, UserId,
    },
    ports::{
        AutomationRepositoryError, AutomationRepositoryResult, AutomationStatusRepository,
        LeadRepository, StageActionRepository,
    },
};
use crate::config::{AutomationSettings, FailurePolicy};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Service-level errors for automation lifecycle operations.
#[derive(Debug, Error)]
pub enum AutomationServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AutomationDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AutomationRepositoryError),
    /// No status record exists with the given identifier.
    #[error("automation status {0} not found")]
    NotFound(AutomationStatusId),
    /// Existing runs could not be cancelled before starting a new one.
    #[error("failed to supersede {existing} existing automation run(s)")]
    SupersedeFailed {
        /// Number of runs that were meant to be cancelled.
        existing: usize,
    },
}

/// Result type for automation service operations.
pub type AutomationServiceResult<T> = Result<T, AutomationServiceError>;

/// Automation lifecycle orchestration service.
#[derive(Clone)]
pub struct AutomationService<S, L, A, C>
where
    S: AutomationStatusRepository,
    L: LeadRepository,
    A: StageActionRepository,
    C: Clock + Send + Sync,
{
    statuses: Arc<S>,
    leads: Arc<L>,
    actions: Arc<A>,
    clock: Arc<C>,
    settings: AutomationSettings,
}

impl<S, L, A, C> AutomationService<S, L, A, C>
where
    S: AutomationStatusRepository,
    L: LeadRepository,
    A: StageActionRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with default settings.
    #[must_use]
    pub fn new(statuses: Arc<S>, leads: Arc<L>, actions: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            statuses,
            leads,
            actions,
            clock,
            settings: AutomationSettings::default(),
        }
    }

    /// Replaces the service settings.
    #[must_use]
    pub fn with_settings(mut self, settings: AutomationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the active settings.
    #[must_use]
    pub const fn settings(&self) -> &AutomationSettings {
        &self.settings
    }

    /// Applies the failure policy to a read-path repository result.
    fn recover<T>(
        &self,
        operation: &'static str,
        result: AutomationRepositoryResult<T>,
        fallback: impl FnOnce() -> T,
    ) -> AutomationServiceResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => match self.settings.failure_policy {
                FailurePolicy::FailOpen => {
                    warn!(operation, error = %err, "repository failure ignored");
                    Ok(fallback())
                }
                FailurePolicy::FailClosed => Err(err.into()),
            },
        }
    }

    /// Resolves the lead statuses that disqualify a lead from automation.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationServiceError::Repository`] only under
    /// [`FailurePolicy::FailClosed`].
    pub async fn exclusion_status_ids(&self) -> AutomationServiceResult<Vec<LeadStatusId>> {
        let result = self
            .leads
            .find_status_ids_by_names(&self.settings.excluded_status_labels)
            .await;
        self.recover("exclusion_status_ids", result, Vec::new)
    }

    /// Finds pending or in-progress runs for a user, narrowed by stage,
    /// platform, or both.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationDomainError::MissingScope`] when neither
    /// `stage_id` nor `platform_id` is given, and
    /// [`AutomationServiceError::Repository`] only under
    /// [`FailurePolicy::FailClosed`].
    pub async fn find_pending_or_running(
        &self,
        account_id: AccountId,
        user_id: UserId,
        stage_id: Option<StageId>,
        platform_id: Option<PlatformId>,
    ) -> AutomationServiceResult<Vec<AutomationStatusRecord>> {
        let scope = AutomationScope::new(account_id, user_id, stage_id, platform_id)?;
        let result = self.statuses.find_active(&scope).await;
        self.recover("find_pending_or_running", result, Vec::new)
    }

    /// Selects leads in `stage_id` that are due today and not excluded.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationServiceError::Repository`] only under
    /// [`FailurePolicy::FailClosed`].
    pub async fn select_leads(
        &self,
        stage_id: StageId,
        excluded: &[LeadStatusId],
    ) -> AutomationServiceResult<Vec<LeadId>> {
        let today = self.clock.utc().date_naive();
        let result = self.leads.find_due_leads(stage_id, excluded, today).await;
        self.recover("select_leads", result, Vec::new)
    }

    /// Returns the stage's actions in order with their effective
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationServiceError::Repository`] only under
    /// [`FailurePolicy::FailClosed`].
    pub async fn resolve_stage_actions(
        &self,
        stage_id: StageId,
    ) -> AutomationServiceResult<Vec<ResolvedAction>> {
        let result = self.actions.find_by_stage(stage_id).await;
        let definitions = self.recover("resolve_stage_actions", result, Vec::new)?;
        Ok(definitions.iter().map(|action| action.resolve()).collect())
    }

    /// Validates and stores a new status record.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationServiceError::Domain`] when the payload is not a
    /// valid status document and [`AutomationServiceError::Repository`] when
    /// the insert fails, regardless of the failure policy.
    pub async fn save_automation_state(
        &self,
        request: SaveAutomationStateRequest,
    ) -> AutomationServiceResult<AutomationStatusRecord> {
        let status = AutomationStatus::from_value(request.payload)?;
        let new_record = NewAutomationStatus::new(request.target, status, &*self.clock);
        let record = self.statuses.insert(&new_record).await.inspect_err(|err| {
            error!(
                account_id = %request.target.account_id,
                user_id = %request.target.user_id,
                stage_id = %request.target.stage_id,
                error = %err,
                "failed to persist automation status"
            );
        })?;
        debug!(id = %record.id(), name = record.status().name(), "automation status saved");
        Ok(record)
    }

    /// Cancels pending and running runs for the request's account, user, and
    /// stage.
    ///
    /// Returns `Ok(true)` when nothing needed cancelling or every record was
    /// updated. Under [`FailurePolicy::FailOpen`] any failure, including a
    /// failed or malformed lookup, is logged and reported as `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationServiceError`] only under
    /// [`FailurePolicy::FailClosed`].
    pub async fn cancel_existing_automations(
        &self,
        request: CancelAutomationsRequest,
    ) -> AutomationServiceResult<bool> {
        debug!(
            platform_id = %request.platform_id,
            stage_id = %request.stage_id,
            "cancellation scope ignores platform"
        );
        let metadata = CancellationMetadata {
            stopped_by: request
                .stopped_by()
                .unwrap_or(self.settings.default_cancel_actor.as_str())
                .to_owned(),
            reason: request
                .reason()
                .unwrap_or(self.settings.default_cancel_reason.as_str())
                .to_owned(),
            stopped_at: self.clock.utc(),
        };

        match self.cancel_in_scope(&request, metadata).await {
            Ok(cancelled) => {
                if cancelled > 0 {
                    info!(
                        account_id = %request.account_id,
                        user_id = %request.user_id,
                        stage_id = %request.stage_id,
                        cancelled,
                        "cancelled existing automation runs"
                    );
                }
                Ok(true)
            }
            Err(err) => match self.settings.failure_policy {
                FailurePolicy::FailOpen => {
                    warn!(
                        account_id = %request.account_id,
                        user_id = %request.user_id,
                        stage_id = %request.stage_id,
                        error = %err,
                        "failed to cancel existing automation runs"
                    );
                    Ok(false)
                }
                FailurePolicy::FailClosed => Err(err),
            },
        }
    }

    async fn cancel_in_scope(
        &self,
        request: &CancelAutomationsRequest,
        metadata: CancellationMetadata,
    ) -> AutomationServiceResult<usize> {
        let scope = AutomationScope::new(
            request.account_id,
            request.user_id,
            Some(request.stage_id),
            None,
        )?;
        let records = self.statuses.find_active(&scope).await?;
        let count = records.len();
        for mut record in records {
            record.status_mut().cancel(metadata.clone());
            self.statuses
                .update_status(record.id(), record.status())
                .await?;
        }
        Ok(count)
    }

    /// Moves a stored run to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationServiceError::NotFound`] for an unknown id,
    /// [`AutomationServiceError::Domain`] for a forbidden phase change, and
    /// [`AutomationServiceError::Repository`] when persistence fails.
    pub async fn advance_automation(
        &self,
        id: AutomationStatusId,
        target: AutomationPhase,
    ) -> AutomationServiceResult<AutomationStatusRecord> {
        let mut record = self
            .statuses
            .find_by_id(id)
            .await?
            .ok_or(AutomationServiceError::NotFound(id))?;
        record.status_mut().transition_to(target)?;
        self.statuses.update_status(id, record.status()).await?;
        debug!(id = %id, phase = %target, "automation phase advanced");
        Ok(record)
    }

    /// Lists a user's runs, newest first, for progress polling.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationServiceError::Repository`] when the lookup fails.
    pub async fn list_automation_statuses(
        &self,
        account_id: AccountId,
        user_id: UserId,
        stage_id: Option<StageId>,
    ) -> AutomationServiceResult<Vec<AutomationStatusRecord>> {
        Ok(self
            .statuses
            .list_for_user(account_id, user_id, stage_id)
            .await?)
    }

    /// Starts a run for the request's scope.
    ///
    /// Existing pending or running runs for the same stage and platform block
    /// the start unless the request is confirmed, in which case they are
    /// cancelled first. A run is only recorded when the stage has at least
    /// one due lead and one configured action.
    ///
    /// # Errors
    ///
    /// Returns [`AutomationServiceError::Domain`] for an empty automation
    /// name, [`AutomationServiceError::SupersedeFailed`] when confirmed
    /// cancellation reports failure, and repository errors from the status
    /// write (or from reads under [`FailurePolicy::FailClosed`]). An active
    /// run that cannot be read fails the start under either policy with
    /// [`AutomationRepositoryError::MalformedRecord`].
    pub async fn start_automation(
        &self,
        request: StartAutomationRequest,
    ) -> AutomationServiceResult<StartAutomationOutcome> {
        let target = request.target;
        let mut status =
            AutomationStatus::new(&request.automation_name, AutomationPhase::Pending)?;
        let scope = AutomationScope::new(
            target.account_id,
            target.user_id,
            Some(target.stage_id),
            Some(target.platform_id),
        )?;

        let existing = match self.statuses.find_active(&scope).await {
            Err(err @ AutomationRepositoryError::MalformedRecord { .. }) => {
                error!(error = %err, "active automation status is unreadable; not starting");
                return Err(err.into());
            }
            result => self.recover("find_pending_or_running", result, Vec::new)?,
        };
        if !existing.is_empty() {
            if !request.force() {
                return Ok(StartAutomationOutcome::RequiresConfirmation { existing });
            }
            let mut cancel_request = CancelAutomationsRequest::for_target(&target);
            if let Some(actor) = request.started_by() {
                cancel_request = cancel_request.with_stopped_by(actor);
            }
            if !self.cancel_existing_automations(cancel_request).await? {
                return Err(AutomationServiceError::SupersedeFailed {
                    existing: existing.len(),
                });
            }
        }

        let excluded = self.exclusion_status_ids().await?;
        let lead_ids = self.select_leads(target.stage_id, &excluded).await?;
        let actions = self.resolve_stage_actions(target.stage_id).await?;
        if lead_ids.is_empty() || actions.is_empty() {
            return Ok(StartAutomationOutcome::NothingToRun {
                lead_count: lead_ids.len(),
                action_count: actions.len(),
            });
        }

        status = status
            .with_detail("lead_ids", to_detail(&lead_ids)?)?
            .with_detail("actions", to_detail(&actions)?)?;
        if let Some(actor) = request.started_by() {
            status = status.with_detail("started_by", actor.into())?;
        }

        let record = self
            .save_automation_state(SaveAutomationStateRequest::new(target, status.to_value()?))
            .await?;
        info!(
            id = %record.id(),
            stage_id = %target.stage_id,
            platform_id = %target.platform_id,
            leads = lead_ids.len(),
            actions = actions.len(),
            "automation run started"
        );
        Ok(StartAutomationOutcome::Started(record))
    }
}

fn to_detail<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, AutomationDomainError> {
    serde_json::to_value(value)
        .map_err(|err| AutomationDomainError::MalformedStatus(err.to_string()))
}
