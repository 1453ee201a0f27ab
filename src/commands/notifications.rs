use crate::models::Notification;
use crate::services::api_client::SocialApi;

#[tauri::command]
pub async fn fetch_notifications(username: String) -> Result<Vec<Notification>, String> {
    let api = SocialApi::from_config()?;
    api.fetch_notifications(&username)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn mark_notification_read(id: i64) -> Result<(), String> {
    let api = SocialApi::from_config()?;
    api.mark_notification_read(id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn mark_all_notifications_read(username: String) -> Result<(), String> {
    let api = SocialApi::from_config()?;
    api.mark_all_notifications_read(&username)
        .await
        .map_err(|e| e.to_string())
}

/// Unread notification count for the tab badge.
#[tauri::command]
pub async fn unread_notification_count(username: String) -> Result<i64, String> {
    let api = SocialApi::from_config()?;
    api.unread_notification_count(&username)
        .await
        .map_err(|e| e.to_string())
}
