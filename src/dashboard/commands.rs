use crate::{
    dashboard::{self, DashboardView},
    models::{SelectionPolicy, StoredRound},
    AppState,
};

fn signed_in_user_id(state: &AppState) -> Result<String, String> {
    state
        .auth
        .current_user()
        .map(|user| user.id)
        .ok_or_else(|| "sign in to view your statistics".to_string())
}

/// `policy` falls back to the configured default.
pub async fn get_dashboard(
    state: &AppState,
    policy: Option<SelectionPolicy>,
) -> Result<DashboardView, String> {
    let user_id = signed_in_user_id(state)?;
    let policy = policy.unwrap_or_else(|| state.settings.default_policy());
    dashboard::load_dashboard(&state.db, &user_id, policy)
        .await
        .map_err(|e| e.to_string())
}

pub async fn list_rounds(
    state: &AppState,
    policy: Option<SelectionPolicy>,
) -> Result<Vec<StoredRound>, String> {
    let user_id = signed_in_user_id(state)?;
    let policy = policy.unwrap_or_else(|| state.settings.default_policy());
    state
        .db
        .list_rounds(&user_id, policy)
        .await
        .map_err(|e| e.to_string())
}

pub async fn delete_round(
    state: &AppState,
    round_id: String,
    policy: Option<SelectionPolicy>,
) -> Result<DashboardView, String> {
    let user_id = signed_in_user_id(state)?;
    let policy = policy.unwrap_or_else(|| state.settings.default_policy());
    dashboard::delete_round_and_reload(&state.db, &user_id, &round_id, policy)
        .await
        .map_err(|e| e.to_string())
}

pub async fn set_default_policy(state: &AppState, policy: SelectionPolicy) -> Result<(), String> {
    state
        .settings
        .set_default_policy(policy)
        .map_err(|e| e.to_string())
}
