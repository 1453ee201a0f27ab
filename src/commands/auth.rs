use serde::Serialize;

use crate::models::AuthUser;
use crate::services::{api_client::SocialApi, session_service};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub is_signed_in: bool,
    pub username: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Sign in with email and password; the returned user is also persisted as
/// the local session.
#[tauri::command]
pub async fn login(email: String, password: String) -> Result<AuthUser, String> {
    let api = SocialApi::from_config()?;
    let user = api
        .login(&email, &password)
        .await
        .map_err(|e| e.to_string())?;

    session_service::start_session(&user)?;

    Ok(user)
}

#[tauri::command]
pub async fn register(
    username: String,
    email: String,
    password: String,
) -> Result<AuthUser, String> {
    let api = SocialApi::from_config()?;
    let user = api
        .register(&username, &email, &password)
        .await
        .map_err(|e| e.to_string())?;

    session_service::start_session(&user)?;

    Ok(user)
}

/// The locally persisted session, checked on startup.
#[tauri::command]
pub fn current_session() -> Result<SessionStatus, String> {
    let session = session_service::load_session()?;

    Ok(SessionStatus {
        is_signed_in: session.username.is_some(),
        username: session.username,
        email: session.email,
        display_name: session.display_name,
    })
}

#[tauri::command]
pub fn signout() -> Result<(), String> {
    session_service::clear_session()
}
