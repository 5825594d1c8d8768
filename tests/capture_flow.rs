mod common;

use common::{hole_inputs, setup_app};
use molistats_lib::{
    auth::commands as auth_commands,
    capture::{commands as capture_commands, CaptureOutcome, CaptureStatus},
    cli::{execute, Commands},
    dashboard::commands as dashboard_commands,
    models::{HoleInput, SelectionPolicy},
    stats::HoleValidationError,
};

async fn sign_up(state: &molistats_lib::AppState) -> String {
    auth_commands::sign_up(state, "ana@example.com".into(), "birdie1".into(), None)
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn last_hole_saves_the_round() {
    let (_dir, state) = setup_app();
    let user_id = sign_up(&state).await;

    capture_commands::start_round(&state, "La Moraleja".into(), Some(9))
        .await
        .unwrap();

    let mut saved = None;
    for input in hole_inputs(9, 5) {
        match capture_commands::record_hole(&state, input).await.unwrap() {
            CaptureOutcome::Next { snapshot } => {
                assert_eq!(snapshot.status, CaptureStatus::InProgress)
            }
            CaptureOutcome::Saved { round } => saved = Some(round),
        }
    }

    let round = saved.expect("round saved on the last hole");
    assert_eq!(round.user_id, user_id);
    assert_eq!(round.summary.hole_count, 9);
    assert_eq!(round.summary.total_score, 45);

    let snapshot = capture_commands::get_capture_state(&state).await.unwrap();
    assert_eq!(snapshot.status, CaptureStatus::Completed);
    assert_eq!(snapshot.saved_round_id.as_deref(), Some(round.id.as_str()));

    let view = dashboard_commands::get_dashboard(&state, Some(SelectionPolicy::All))
        .await
        .unwrap();
    assert_eq!(view.rounds.len(), 1);
    let averages = view.averages.unwrap();
    assert_eq!(averages.average_score, 90.0);
    assert!(averages.eighteen_hole.is_none());
    assert_eq!(averages.nine_hole.unwrap().average_score, 45.0);
}

#[tokio::test]
async fn repeating_the_first_hole_does_not_save_the_round() {
    let (_dir, state) = setup_app();
    let user_id = sign_up(&state).await;
    capture_commands::start_round(&state, "Neguri".into(), Some(9))
        .await
        .unwrap();

    for _ in 0..9 {
        let outcome = capture_commands::record_hole(&state, HoleInput::blank(1))
            .await
            .unwrap();
        assert!(matches!(outcome, CaptureOutcome::Next { .. }));
    }

    let snapshot = capture_commands::get_capture_state(&state).await.unwrap();
    assert_eq!(snapshot.status, CaptureStatus::InProgress);
    assert_eq!(snapshot.current_hole, 2);
    assert_eq!(snapshot.recorded_holes.len(), 1);
    assert!(state
        .db
        .list_rounds(&user_id, SelectionPolicy::All)
        .await
        .unwrap()
        .is_empty());

    assert!(capture_commands::record_hole(&state, HoleInput::blank(5))
        .await
        .is_err());
}

#[tokio::test]
async fn record_command_rejects_a_file_with_a_repeated_hole() {
    let (dir, state) = setup_app();
    let user_id = sign_up(&state).await;

    let mut inputs = hole_inputs(9, 4);
    inputs[8].hole_number = 8;
    let file = dir.path().join("holes.json");
    std::fs::write(&file, serde_json::to_string(&inputs).unwrap()).unwrap();

    let err = execute(
        Commands::Record {
            course: "Golf de Ibiza".into(),
            holes: Some(9),
            file,
        },
        &state,
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.downcast_ref::<HoleValidationError>(),
        Some(&HoleValidationError::DuplicateHole(8))
    );

    let snapshot = capture_commands::get_capture_state(&state).await.unwrap();
    assert_eq!(snapshot.status, CaptureStatus::Idle);
    assert!(state
        .db
        .list_rounds(&user_id, SelectionPolicy::All)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn record_command_saves_a_shuffled_file_in_hole_order() {
    let (dir, state) = setup_app();
    let user_id = sign_up(&state).await;

    let mut inputs = hole_inputs(9, 4);
    inputs.reverse();
    let file = dir.path().join("holes.json");
    std::fs::write(&file, serde_json::to_string(&inputs).unwrap()).unwrap();

    execute(
        Commands::Record {
            course: "Golf de Ibiza".into(),
            holes: Some(9),
            file,
        },
        &state,
    )
    .await
    .unwrap();

    let rounds = state
        .db
        .list_rounds(&user_id, SelectionPolicy::All)
        .await
        .unwrap();
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].summary.hole_count, 9);
    assert_eq!(rounds[0].summary.total_score, 36);
}

#[tokio::test]
async fn partial_round_can_be_saved_and_holes_prefilled() {
    let (_dir, state) = setup_app();
    sign_up(&state).await;

    capture_commands::start_round(&state, "El Saler".into(), Some(18))
        .await
        .unwrap();
    for input in hole_inputs(3, 4) {
        capture_commands::record_hole(&state, input).await.unwrap();
    }

    let back = capture_commands::previous_hole(&state).await.unwrap();
    assert_eq!(back.current_hole, 3);
    let prefilled = capture_commands::get_hole_input(&state, 2).await.unwrap();
    assert_eq!(prefilled.hole_number, 2);
    assert_eq!(prefilled.score, 4);
    let blank = capture_commands::get_hole_input(&state, 12).await.unwrap();
    assert_eq!(blank.hole_number, 12);

    let round = capture_commands::save_round(&state).await.unwrap();
    assert_eq!(round.summary.hole_count, 3);
    assert_eq!(round.summary.total_score, 12);
}

#[tokio::test]
async fn invalid_holes_are_rejected_without_touching_the_draft() {
    let (_dir, state) = setup_app();
    sign_up(&state).await;
    capture_commands::start_round(&state, "Valderrama".into(), Some(9))
        .await
        .unwrap();

    let mut input = hole_inputs(1, 4).remove(0);
    input.par = 7;
    assert!(capture_commands::record_hole(&state, input).await.is_err());

    let snapshot = capture_commands::get_capture_state(&state).await.unwrap();
    assert_eq!(snapshot.current_hole, 1);
    assert!(snapshot.recorded_holes.is_empty());
}

#[tokio::test]
async fn saving_needs_a_signed_in_user_and_keeps_the_draft() {
    let (_dir, state) = setup_app();
    capture_commands::start_round(&state, "PGA Catalunya".into(), Some(9))
        .await
        .unwrap();
    assert!(capture_commands::save_round(&state).await.is_err());

    let mut last = None;
    for input in hole_inputs(9, 4) {
        last = Some(capture_commands::record_hole(&state, input).await);
    }
    assert!(last.unwrap().is_err());

    let snapshot = capture_commands::get_capture_state(&state).await.unwrap();
    assert_eq!(snapshot.status, CaptureStatus::InProgress);
    assert_eq!(snapshot.recorded_holes.len(), 9);

    sign_up(&state).await;
    let round = capture_commands::save_round(&state).await.unwrap();
    assert_eq!(round.summary.hole_count, 9);
}

#[tokio::test]
async fn cancel_discards_the_draft() {
    let (_dir, state) = setup_app();
    capture_commands::start_round(&state, "Sotogrande".into(), None)
        .await
        .unwrap();
    let snapshot = capture_commands::get_capture_state(&state).await.unwrap();
    assert_eq!(u8::from(snapshot.hole_count), 18);

    capture_commands::cancel_round(&state).await.unwrap();
    let snapshot = capture_commands::get_capture_state(&state).await.unwrap();
    assert_eq!(snapshot.status, CaptureStatus::Idle);
    assert!(capture_commands::save_round(&state).await.is_err());
}

#[tokio::test]
async fn delete_refreshes_the_dashboard() {
    let (_dir, state) = setup_app();
    let user_id = sign_up(&state).await;

    let first = state
        .db
        .insert_round(&user_id, &common::summary(18, 4, 0))
        .await
        .unwrap();
    state
        .db
        .insert_round(&user_id, &common::summary(9, 5, 1))
        .await
        .unwrap();

    let view = dashboard_commands::delete_round(&state, first.id.clone(), None)
        .await
        .unwrap();
    assert_eq!(view.rounds.len(), 1);
    let averages = view.averages.unwrap();
    assert_eq!(averages.round_count, 1);
    assert!(averages.eighteen_hole.is_none());

    let view = dashboard_commands::delete_round(&state, view.rounds[0].id.clone(), None)
        .await
        .unwrap();
    assert!(view.rounds.is_empty());
    assert!(view.averages.is_none());
}

#[tokio::test]
async fn dashboard_requires_sign_in_and_uses_the_default_filter() {
    let (_dir, state) = setup_app();
    assert!(dashboard_commands::get_dashboard(&state, None).await.is_err());

    let user_id = sign_up(&state).await;
    for day in 0..3 {
        state
            .db
            .insert_round(&user_id, &common::summary(18, 4, day))
            .await
            .unwrap();
    }

    dashboard_commands::set_default_policy(&state, SelectionPolicy::LastRound)
        .await
        .unwrap();
    let view = dashboard_commands::get_dashboard(&state, None).await.unwrap();
    assert_eq!(view.policy, SelectionPolicy::LastRound);
    assert_eq!(view.rounds.len(), 1);
    assert_eq!(view.averages.unwrap().round_count, 1);
}

#[tokio::test]
async fn cannot_delete_another_users_round() {
    let (_dir, state) = setup_app();
    let owner_id = sign_up(&state).await;
    let round = state
        .db
        .insert_round(&owner_id, &common::summary(18, 4, 0))
        .await
        .unwrap();

    auth_commands::sign_up(&state, "luis@example.com".into(), "eagle22".into(), None)
        .await
        .unwrap();
    let err = dashboard_commands::delete_round(&state, round.id.clone(), None)
        .await
        .unwrap_err();
    assert!(err.contains("belongs to another user"));

    let kept = state.db.get_round(&round.id).await.unwrap();
    assert_eq!(kept.map(|round| round.user_id), Some(owner_id));
}

#[tokio::test]
async fn deleting_an_unknown_round_reloads_the_view() {
    let (_dir, state) = setup_app();
    let user_id = sign_up(&state).await;
    state
        .db
        .insert_round(&user_id, &common::summary(9, 5, 0))
        .await
        .unwrap();

    let view = dashboard_commands::delete_round(&state, "no-such-round".into(), None)
        .await
        .unwrap();
    assert_eq!(view.rounds.len(), 1);
    assert_eq!(view.averages.unwrap().round_count, 1);
}
