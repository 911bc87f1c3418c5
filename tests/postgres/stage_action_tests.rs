//! Stage action catalogue queries against a real `PostgreSQL` database.

use crate::postgres::helpers::{FOLLOW_UP, OUTREACH, PostgresContext, postgres_context};
use lead_maestro::automation::{domain::StageId, ports::StageActionRepository};
use rstest::rstest;
use serde_json::json;

fn seed(context: &PostgresContext) {
    let email = context.insert_feature("send_email", Some(r#"{"template":"intro"}"#));
    let connect = context.insert_feature("linkedin_connect", None);
    context.insert_stage_action(OUTREACH, email, 2, None);
    context.insert_stage_action(OUTREACH, connect, 1, Some(r#"{"note":"hi"}"#));
    context.insert_stage_action(OUTREACH, email, 2, Some(r#"{"template":"follow"}"#));
    context.insert_stage_action(FOLLOW_UP, connect, 0, None);
}

#[rstest]
fn actions_come_back_in_sort_order_with_feature_data(postgres_context: PostgresContext) {
    let context = postgres_context;
    seed(&context);

    let actions = context
        .rt
        .block_on(context.actions.find_by_stage(OUTREACH))
        .expect("lookup succeeds");

    let summary: Vec<_> = actions
        .iter()
        .map(|action| {
            (
                action.sort_order,
                action.feature_code.as_str(),
                action.config.as_deref(),
                action.default_config.as_deref(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, "linkedin_connect", Some(r#"{"note":"hi"}"#), None),
            (2, "send_email", None, Some(r#"{"template":"intro"}"#)),
            (
                2,
                "send_email",
                Some(r#"{"template":"follow"}"#),
                Some(r#"{"template":"intro"}"#)
            ),
        ]
    );
    assert!(actions.iter().all(|action| action.stage_id == OUTREACH));
}

#[rstest]
fn resolved_actions_prefer_per_action_config(postgres_context: PostgresContext) {
    let context = postgres_context;
    seed(&context);
    let service = context.service();

    let resolved = context
        .rt
        .block_on(service.resolve_stage_actions(OUTREACH))
        .expect("resolution succeeds");

    let flat: Vec<_> = resolved
        .iter()
        .map(|action| serde_json::to_value(action).expect("serialisable"))
        .collect();
    assert_eq!(
        flat,
        vec![
            json!({"action_name": "linkedin_connect", "note": "hi"}),
            json!({"action_name": "send_email", "template": "intro"}),
            json!({"action_name": "send_email", "template": "follow"}),
        ]
    );
}

#[rstest]
fn stage_without_actions_is_empty(postgres_context: PostgresContext) {
    let context = postgres_context;
    seed(&context);

    let actions = context
        .rt
        .block_on(context.actions.find_by_stage(StageId::new(99)))
        .expect("lookup succeeds");

    assert!(actions.is_empty());
}
