use crate::models::{FollowStatus, Participant, ProfileView};
use crate::services::api_client::SocialApi;

#[tauri::command]
pub async fn fetch_profile(username: String) -> Result<ProfileView, String> {
    let api = SocialApi::from_config()?;
    api.fetch_profile(&username)
        .await
        .map_err(|e| e.to_string())
}

/// Update display name and profile picture (a data URI, or empty to keep
/// the image unset).
#[tauri::command]
pub async fn update_profile(
    username: String,
    display_name: String,
    profile_picture: String,
) -> Result<(), String> {
    let api = SocialApi::from_config()?;
    api.update_profile(&username, &display_name, &profile_picture)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn follow_status(follower: String, following: String) -> Result<FollowStatus, String> {
    let api = SocialApi::from_config()?;
    api.follow_status(&follower, &following)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn toggle_follow(follower: String, following: String) -> Result<FollowStatus, String> {
    let api = SocialApi::from_config()?;
    api.toggle_follow(&follower, &following)
        .await
        .map_err(|e| e.to_string())
}

/// Who follows the user; the recipient picker for new conversations.
#[tauri::command]
pub async fn list_followers(username: String) -> Result<Vec<Participant>, String> {
    let api = SocialApi::from_config()?;
    api.fetch_followers(&username)
        .await
        .map_err(|e| e.to_string())
}
