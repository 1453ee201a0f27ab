use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One message in a conversation, as returned by the backend. Immutable on
/// the client; the message list is only ever replaced or appended to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub sender: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

/// The other user in a conversation, for header/avatar rendering.
/// `profile_picture` is either empty or a data URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub profile_picture: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationPreview {
    pub id: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub participants: Vec<Participant>,
    pub last_message: Message,
    pub unread_count: i64,
}

/// Response to creating a conversation with its initial message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedConversation {
    pub conversation_id: i64,
    pub message_id: i64,
}
