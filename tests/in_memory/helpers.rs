//! Shared helpers for in-memory automation integration tests.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use lead_maestro::automation::{
    adapters::memory::{
        InMemoryAutomationStatusRepository, InMemoryLeadRepository, InMemoryStageActionRepository,
    },
    domain::{
        AccountId, AutomationTarget, Lead, LeadId, LeadStatus, LeadStatusId, PlatformId,
        StageActionDefinition, StageId, UserId,
    },
    services::AutomationService,
};
use lead_maestro::config::AutomationSettings;
use mockable::DefaultClock;
use rstest::fixture;

/// Service type wired to in-memory repositories.
pub type TestService = AutomationService<
    InMemoryAutomationStatusRepository,
    InMemoryLeadRepository,
    InMemoryStageActionRepository,
    DefaultClock,
>;

/// Service plus the repositories it reads from.
pub struct TestContext {
    pub service: TestService,
    pub statuses: Arc<InMemoryAutomationStatusRepository>,
    pub leads: Arc<InMemoryLeadRepository>,
    pub actions: Arc<InMemoryStageActionRepository>,
}

pub const ACCOUNT: AccountId = AccountId::new(3);
pub const USER: UserId = UserId::new(17);
pub const LINKEDIN: PlatformId = PlatformId::new(1);
pub const EMAIL: PlatformId = PlatformId::new(4);
pub const DISCOVERY: StageId = StageId::new(20);
pub const PROPOSAL: StageId = StageId::new(21);
pub const UNSUBSCRIBED: LeadStatusId = LeadStatusId::new(50);
pub const WARM: LeadStatusId = LeadStatusId::new(51);

/// Builds a context with the given settings.
pub fn context_with(settings: AutomationSettings) -> TestContext {
    let statuses = Arc::new(InMemoryAutomationStatusRepository::new());
    let leads = Arc::new(InMemoryLeadRepository::new());
    let actions = Arc::new(InMemoryStageActionRepository::new());
    let service = AutomationService::new(
        Arc::clone(&statuses),
        Arc::clone(&leads),
        Arc::clone(&actions),
        Arc::new(DefaultClock),
    )
    .with_settings(settings);
    for (id, name) in [(UNSUBSCRIBED, "Unsubscribed"), (WARM, "Warm")] {
        leads
            .add_status(LeadStatus {
                id,
                name: name.to_owned(),
            })
            .expect("seed lead status");
    }
    TestContext {
        service,
        statuses,
        leads,
        actions,
    }
}

#[fixture]
pub fn context() -> TestContext {
    context_with(AutomationSettings::default())
}

pub const fn target(platform_id: PlatformId, stage_id: StageId) -> AutomationTarget {
    AutomationTarget {
        account_id: ACCOUNT,
        user_id: USER,
        platform_id,
        stage_id,
    }
}

/// Date `days` before today.
pub fn days_ago(days: u64) -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_sub_days(Days::new(days))
        .expect("date in range")
}

/// Date `days` after today.
pub fn days_ahead(days: u64) -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_add_days(Days::new(days))
        .expect("date in range")
}

pub fn lead(
    id: i64,
    stage_id: StageId,
    status: Option<LeadStatusId>,
    followup_date: Option<NaiveDate>,
) -> Lead {
    Lead {
        id: LeadId::new(id),
        stage_id,
        status,
        followup_date,
    }
}

pub fn action(
    stage_id: StageId,
    sort_order: i32,
    code: &str,
    config: Option<&str>,
    default_config: Option<&str>,
) -> StageActionDefinition {
    StageActionDefinition {
        stage_id,
        sort_order,
        feature_code: code.to_owned(),
        config: config.map(str::to_owned),
        default_config: default_config.map(str::to_owned),
    }
}

impl TestContext {
    /// Seeds one due lead and one action so a run in `stage_id` can start.
    pub fn seed_runnable_stage(&self, stage_id: StageId) {
        self.leads
            .add_lead(lead(1, stage_id, Some(WARM), Some(days_ago(1))))
            .expect("seed lead");
        self.actions
            .add_action(action(stage_id, 1, "view_profile", None, None))
            .expect("seed action");
    }
}
