mod commands;
mod models;
mod services;

use commands::*;
use services::chat_service::ChatState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(ChatState::default())
        .invoke_handler(tauri::generate_handler![
            // Config commands
            get_base_url,
            set_base_url,
            get_theme,
            set_theme,
            get_config,
            // Auth commands
            login,
            register,
            current_session,
            signout,
            // Feed commands
            fetch_feed,
            create_post,
            // Post commands
            view_post,
            like_status,
            toggle_like,
            create_comment,
            // Chat commands
            open_conversation,
            close_conversation,
            send_chat_message,
            set_message_draft,
            message_draft,
            list_conversations,
            create_conversation,
            unread_message_count,
            // Notification commands
            fetch_notifications,
            mark_notification_read,
            mark_all_notifications_read,
            unread_notification_count,
            // Profile commands
            fetch_profile,
            update_profile,
            follow_status,
            toggle_follow,
            list_followers,
            // Search commands
            search_users,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
