use crate::models::UserSearchResult;
use crate::services::api_client::SocialApi;

#[tauri::command]
pub async fn search_users(query: String) -> Result<Vec<UserSearchResult>, String> {
    // An empty query always means an empty result; skip the round trip.
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let api = SocialApi::from_config()?;
    api.search_users(&query).await.map_err(|e| e.to_string())
}
