use std::fs;
use serde::{Deserialize, Serialize};

use crate::models::AuthUser;
use super::config_service::get_app_data_dir;

/// Locally persisted sign-in state. The backend is session-less; the client
/// just remembers who signed in so the app reopens on the right account.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Session {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub signed_in_at: Option<i64>,
}

fn get_session_path() -> Result<std::path::PathBuf, String> {
    Ok(get_app_data_dir()?.join("session.json"))
}

pub fn load_session() -> Result<Session, String> {
    let session_path = get_session_path()?;

    if !session_path.exists() {
        return Ok(Session::default());
    }

    let content = fs::read_to_string(&session_path)
        .map_err(|e| format!("Failed to read session: {}", e))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse session: {}", e))
}

pub fn save_session(session: &Session) -> Result<(), String> {
    let session_path = get_session_path()?;
    let content = serde_json::to_string_pretty(session)
        .map_err(|e| format!("Failed to serialize session: {}", e))?;
    fs::write(&session_path, content)
        .map_err(|e| format!("Failed to write session: {}", e))?;
    Ok(())
}

pub fn clear_session() -> Result<(), String> {
    let session_path = get_session_path()?;
    if session_path.exists() {
        fs::remove_file(&session_path)
            .map_err(|e| format!("Failed to remove session: {}", e))?;
    }
    Ok(())
}

/// Persist a fresh session after a successful login or registration.
pub fn start_session(user: &AuthUser) -> Result<Session, String> {
    let session = Session {
        username: Some(user.username.clone()),
        email: Some(user.email.clone()),
        display_name: Some(user.display_name.clone()),
        signed_in_at: Some(chrono::Utc::now().timestamp()),
    };

    save_session(&session)?;

    Ok(session)
}
