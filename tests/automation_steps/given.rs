//! Given steps for automation cancellation BDD scenarios.

use super::world::{AutomationWorld, run_async, target};
use chrono::Utc;
use eyre::WrapErr;
use lead_maestro::automation::{
    domain::{
        AutomationPhase, AutomationStatus, Lead, LeadId, NewAutomationStatus,
        StageActionDefinition, StageId,
    },
    ports::AutomationStatusRepository,
};
use mockable::DefaultClock;
use rstest_bdd_macros::given;

fn seed_run(
    world: &mut AutomationWorld,
    base: String,
    phase: AutomationPhase,
    platform_id: i64,
    stage_id: i64,
) -> Result<(), eyre::Report> {
    let status = AutomationStatus::new(&base, phase)?;
    let record = run_async(world.statuses.insert(&NewAutomationStatus::new(
        target(platform_id, stage_id),
        status,
        &DefaultClock,
    )))
    .wrap_err("seed automation run")?;
    world.seeded_runs.insert(base, record.id());
    Ok(())
}

#[given(r#"a pending run "{base}" on platform {platform_id:i64} in stage {stage_id:i64}"#)]
fn pending_run(
    world: &mut AutomationWorld,
    base: String,
    platform_id: i64,
    stage_id: i64,
) -> Result<(), eyre::Report> {
    seed_run(world, base, AutomationPhase::Pending, platform_id, stage_id)
}

#[given(r#"a running run "{base}" on platform {platform_id:i64} in stage {stage_id:i64}"#)]
fn running_run(
    world: &mut AutomationWorld,
    base: String,
    platform_id: i64,
    stage_id: i64,
) -> Result<(), eyre::Report> {
    seed_run(world, base, AutomationPhase::InProgress, platform_id, stage_id)
}

#[given("a due lead {lead_id:i64} in stage {stage_id:i64}")]
fn due_lead(
    world: &mut AutomationWorld,
    lead_id: i64,
    stage_id: i64,
) -> Result<(), eyre::Report> {
    world
        .leads
        .add_lead(Lead {
            id: LeadId::new(lead_id),
            stage_id: StageId::new(stage_id),
            status: None,
            followup_date: Some(Utc::now().date_naive()),
        })
        .wrap_err("seed lead")
}

#[given(r#"action "{code}" configured for stage {stage_id:i64}"#)]
fn configured_action(
    world: &mut AutomationWorld,
    code: String,
    stage_id: i64,
) -> Result<(), eyre::Report> {
    let sort_order = world.next_sort_order;
    world.next_sort_order += 1;
    world
        .actions
        .add_action(StageActionDefinition {
            stage_id: StageId::new(stage_id),
            sort_order,
            feature_code: code,
            config: None,
            default_config: None,
        })
        .wrap_err("seed stage action")
}
