use crate::{models::User, AppState};

/// Keep the persisted session in step with the identity provider.
fn remember_session(state: &AppState, user: Option<&User>) -> Result<(), String> {
    state
        .settings
        .set_session_user_id(user.map(|user| user.id.clone()))
        .map_err(|e| e.to_string())
}

pub async fn sign_up(
    state: &AppState,
    email: String,
    password: String,
    name: Option<String>,
) -> Result<User, String> {
    let user = state
        .auth
        .sign_up(&email, &password, name.as_deref())
        .await
        .map_err(|e| e.to_string())?;
    remember_session(state, Some(&user))?;
    Ok(user)
}

pub async fn sign_in(state: &AppState, email: String, password: String) -> Result<User, String> {
    let user = state
        .auth
        .sign_in(&email, &password)
        .await
        .map_err(|e| e.to_string())?;
    remember_session(state, Some(&user))?;
    Ok(user)
}

pub async fn sign_out(state: &AppState) -> Result<(), String> {
    state.auth.sign_out();
    remember_session(state, None)
}

pub async fn get_current_user(state: &AppState) -> Result<Option<User>, String> {
    Ok(state.auth.current_user())
}

/// Sign back in as the user stored in settings, if any.
pub async fn restore_session(state: &AppState) -> Result<Option<User>, String> {
    let Some(user_id) = state.settings.session_user_id() else {
        return Ok(None);
    };
    let user = state
        .auth
        .restore(&user_id)
        .await
        .map_err(|e| e.to_string())?;
    if user.is_none() {
        remember_session(state, None)?;
    }
    Ok(user)
}
