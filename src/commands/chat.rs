use std::time::Duration;

use tauri::{AppHandle, Emitter, Manager, State};
use tracing::warn;

use crate::models::{ConversationPreview, CreatedConversation};
use crate::services::api_client::SocialApi;
use crate::services::chat_service::{self, ChatState, ConversationSnapshot};

// Fixed poll cadence for an open chat screen. No backoff, no jitter; a
// failed tick just waits for the next one.
const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Open a conversation view: register it, do the initial fetch, and start
/// the poll loop. Returns the initial snapshot; later updates arrive as
/// `conversation-updated` events whenever a poll changes the view.
#[tauri::command]
pub async fn open_conversation(
    app: AppHandle,
    state: State<'_, ChatState>,
    conversation_id: i64,
    username: String,
) -> Result<ConversationSnapshot, String> {
    if conversation_id <= 0 {
        return Err("Invalid conversation id".to_string());
    }
    if username.trim().is_empty() {
        return Err("Username is required".to_string());
    }

    let epoch = state.open(conversation_id, username);

    // Initial fetch. An error leaves an empty view for the poll loop to
    // fill in on a later tick.
    match SocialApi::from_config() {
        Ok(api) => {
            if let Err(e) = chat_service::poll_conversation(&api, &state, conversation_id, epoch).await
            {
                warn!("initial fetch failed for conversation {conversation_id}: {e}");
            }
        }
        Err(e) => warn!("API client unavailable: {e}"),
    }

    let snapshot = state
        .snapshot(conversation_id)
        .ok_or("Conversation closed")?;

    tauri::async_runtime::spawn(poll_loop(app, conversation_id, epoch));

    Ok(snapshot)
}

/// Tear down the view when the chat screen unmounts. The poll loop notices
/// on its next tick and exits; an in-flight fetch is discarded by the epoch
/// check.
#[tauri::command]
pub fn close_conversation(state: State<'_, ChatState>, conversation_id: i64) -> Result<(), String> {
    state.close(conversation_id);
    Ok(())
}

/// Send the current draft. Returns the updated snapshot on success; on
/// failure the draft is restored (see `message_draft`) so the input can be
/// re-populated.
#[tauri::command]
pub async fn send_chat_message(
    state: State<'_, ChatState>,
    conversation_id: i64,
) -> Result<Option<ConversationSnapshot>, String> {
    let api = SocialApi::from_config()?;
    chat_service::send_draft(&api, &state, conversation_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn set_message_draft(
    state: State<'_, ChatState>,
    conversation_id: i64,
    text: String,
) -> Result<(), String> {
    state.set_draft(conversation_id, text);
    Ok(())
}

#[tauri::command]
pub fn message_draft(state: State<'_, ChatState>, conversation_id: i64) -> Result<String, String> {
    Ok(state.draft(conversation_id).unwrap_or_default())
}

#[tauri::command]
pub async fn list_conversations(username: String) -> Result<Vec<ConversationPreview>, String> {
    let api = SocialApi::from_config()?;
    api.fetch_conversations(&username)
        .await
        .map_err(|e| e.to_string())
}

/// Start (or reuse) a conversation with a recipient, posting the first
/// message in the same call.
#[tauri::command]
pub async fn create_conversation(
    creator: String,
    recipient: String,
    message: String,
) -> Result<CreatedConversation, String> {
    let message = message.trim().to_string();
    if message.is_empty() {
        return Err("Message is required".to_string());
    }

    let api = SocialApi::from_config()?;
    api.create_conversation(&creator, &recipient, &message)
        .await
        .map_err(|e| e.to_string())
}

/// Unread message count for the tab badge.
#[tauri::command]
pub async fn unread_message_count(username: String) -> Result<i64, String> {
    let api = SocialApi::from_config()?;
    api.unread_message_count(&username)
        .await
        .map_err(|e| e.to_string())
}

async fn poll_loop(app: AppHandle, conversation_id: i64, epoch: u64) {
    loop {
        tokio::time::sleep(POLL_INTERVAL).await;

        let state = app.state::<ChatState>();
        if !state.is_live(conversation_id, epoch) {
            break;
        }

        let api = match SocialApi::from_config() {
            Ok(api) => api,
            Err(e) => {
                warn!("API client unavailable: {e}");
                continue;
            }
        };

        match chat_service::poll_conversation(&api, &state, conversation_id, epoch).await {
            Ok(Some(snapshot)) => {
                if let Err(e) = app.emit("conversation-updated", &snapshot) {
                    warn!("failed to emit conversation update: {e}");
                }
            }
            // Unchanged; nothing for the view to do.
            Ok(None) => {}
            // The view keeps its last good state; the next tick retries.
            Err(e) => warn!("poll failed for conversation {conversation_id}: {e}"),
        }
    }
}
