use crate::models::FeedPost;
use crate::services::api_client::SocialApi;

/// Posts from the people the user follows, newest first.
#[tauri::command]
pub async fn fetch_feed(username: String) -> Result<Vec<FeedPost>, String> {
    let api = SocialApi::from_config()?;
    api.fetch_feed(&username).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_post(username: String, content: String) -> Result<FeedPost, String> {
    let content = content.trim().to_string();
    if content.is_empty() {
        return Err("Post content is required".to_string());
    }

    let api = SocialApi::from_config()?;
    api.create_post(&username, &content)
        .await
        .map_err(|e| e.to_string())
}
