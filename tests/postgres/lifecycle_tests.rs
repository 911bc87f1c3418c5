//! Starting and superseding runs over the `PostgreSQL` adapters.

use crate::postgres::helpers::{
    LINKEDIN, OUTREACH, PostgresContext, days_from_today, now, postgres_context, target,
};
use lead_maestro::automation::{
    ports::AutomationStatusRepository,
    services::{StartAutomationOutcome, StartAutomationRequest},
};
use rstest::rstest;
use serde_json::json;

fn seed_runnable_stage(context: &PostgresContext) {
    context.insert_lead(OUTREACH, None, Some(days_from_today(0)));
    let feature = context.insert_feature("send_email", Some(r#"{"template":"intro"}"#));
    context.insert_stage_action(OUTREACH, feature, 1, None);
}

#[rstest]
fn unreadable_active_run_still_blocks_a_new_start(postgres_context: PostgresContext) {
    let context = postgres_context;
    seed_runnable_stage(&context);
    let broken = context.insert_raw_status(
        target(LINKEDIN, OUTREACH),
        now(),
        json!({"name": "outreach_in_progress", "result": ["not", "an", "object"]}),
    );
    let service = context.service();

    let outcome = context
        .rt
        .block_on(service.start_automation(StartAutomationRequest::new(
            target(LINKEDIN, OUTREACH),
            "outreach",
        )))
        .expect("start is evaluated");

    let existing = match outcome {
        StartAutomationOutcome::RequiresConfirmation { existing } => existing,
        other => panic!("expected confirmation, got {other:?}"),
    };
    assert_eq!(
        existing.iter().map(|record| record.id()).collect::<Vec<_>>(),
        vec![broken]
    );
}

#[rstest]
fn confirmed_start_cancels_and_repairs_unreadable_run(postgres_context: PostgresContext) {
    let context = postgres_context;
    seed_runnable_stage(&context);
    let broken = context.insert_raw_status(
        target(LINKEDIN, OUTREACH),
        now(),
        json!({"name": "outreach_pending", "result": 7}),
    );
    let service = context.service();

    let outcome = context
        .rt
        .block_on(service.start_automation(
            StartAutomationRequest::new(target(LINKEDIN, OUTREACH), "outreach")
                .confirmed()
                .with_started_by("user:12"),
        ))
        .expect("confirmed start succeeds");
    let previous = context
        .rt
        .block_on(context.statuses.find_by_id(broken))
        .expect("cancelled row parses again")
        .expect("row exists");

    let record = match outcome {
        StartAutomationOutcome::Started(record) => record,
        other => panic!("expected a started run, got {other:?}"),
    };
    assert_eq!(record.status().name(), "outreach_pending");
    assert_eq!(record.status().detail("started_by"), Some(&json!("user:12")));
    assert_eq!(previous.status().name(), "outreach_cancelled");
    let result = previous.status().result().expect("result block rebuilt");
    assert!(result.stopped());
    assert_eq!(result.stopped_by(), Some("user:12"));
}
