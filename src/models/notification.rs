use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
}

/// A notification with the sender's display data joined in by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub username: String,
    pub sender_name: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub comment_id: Option<i64>,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub sender_display_name: String,
    #[serde(default)]
    pub sender_profile_picture: String,
}
