mod message;
mod notification;
mod post;
mod user;

pub use message::*;
pub use notification::*;
pub use post::*;
pub use user::*;

use serde::{Deserialize, Deserializer};

/// Unread counter payload shared by the message and notification endpoints.
#[derive(Debug, Clone, serde::Serialize, Deserialize)]
pub struct UnreadCount {
    pub count: i64,
}

// The backend serializes empty Go slices as JSON null; treat null as empty
// wherever a list is nested inside another payload.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
