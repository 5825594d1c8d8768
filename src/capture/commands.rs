use crate::{
    capture::{CaptureController, CaptureOutcome, CaptureSnapshot},
    models::{HoleCount, HoleInput, StoredRound},
    AppState,
};

fn controller_from_state(state: &AppState) -> CaptureController {
    state.capture.clone()
}

pub async fn get_capture_state(state: &AppState) -> Result<CaptureSnapshot, String> {
    Ok(controller_from_state(state).snapshot().await)
}

/// `hole_count` falls back to the configured default.
pub async fn start_round(
    state: &AppState,
    course_name: String,
    hole_count: Option<u8>,
) -> Result<CaptureSnapshot, String> {
    let hole_count = match hole_count {
        Some(holes) => HoleCount::try_from(holes)?,
        None => state.settings.default_hole_count(),
    };
    controller_from_state(state)
        .start_round(&course_name, hole_count)
        .await
        .map_err(|e| e.to_string())
}

pub async fn record_hole(state: &AppState, input: HoleInput) -> Result<CaptureOutcome, String> {
    controller_from_state(state)
        .record_hole(&input)
        .await
        .map_err(|e| format!("{e:#}"))
}

pub async fn previous_hole(state: &AppState) -> Result<CaptureSnapshot, String> {
    controller_from_state(state)
        .previous_hole()
        .await
        .map_err(|e| e.to_string())
}

pub async fn get_hole_input(state: &AppState, hole_number: u8) -> Result<HoleInput, String> {
    Ok(controller_from_state(state)
        .hole_input(hole_number)
        .await
        .unwrap_or_else(|| HoleInput::blank(hole_number)))
}

pub async fn save_round(state: &AppState) -> Result<StoredRound, String> {
    controller_from_state(state)
        .save_round()
        .await
        .map_err(|e| e.to_string())
}

pub async fn cancel_round(state: &AppState) -> Result<(), String> {
    controller_from_state(state)
        .cancel_round()
        .await
        .map_err(|e| e.to_string())
}
