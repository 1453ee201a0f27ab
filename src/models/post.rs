use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post with its author's display data and counters. The feed, the post
/// view, and the create-post response all share this shape; create-post
/// omits the author display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPost {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub profile_picture: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes_count: i64,
    pub comments_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub profile_picture: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub post: FeedPost,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeStatus {
    pub is_liked: bool,
    pub count: i64,
}
