use crate::models::{Comment, LikeStatus, PostView};
use crate::services::api_client::SocialApi;

#[tauri::command]
pub async fn view_post(id: i64) -> Result<PostView, String> {
    let api = SocialApi::from_config()?;
    api.view_post(id).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn like_status(post_id: i64, username: String) -> Result<LikeStatus, String> {
    let api = SocialApi::from_config()?;
    api.like_status(post_id, &username)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn toggle_like(post_id: i64, username: String) -> Result<LikeStatus, String> {
    let api = SocialApi::from_config()?;
    api.toggle_like(post_id, &username)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn create_comment(
    post_id: i64,
    username: String,
    content: String,
) -> Result<Comment, String> {
    let content = content.trim().to_string();
    if content.is_empty() {
        return Err("Comment content is required".to_string());
    }

    let api = SocialApi::from_config()?;
    api.create_comment(post_id, &username, &content)
        .await
        .map_err(|e| e.to_string())
}
