use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login/register response: the authenticated user's display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub username: String,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub profile_picture: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub profile_picture: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A post as it appears on a profile page. The backend emits these ids as
/// JSON strings, unlike every other post id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePost {
    pub id: String,
    #[serde(default)]
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
pub struct ProfileView {
    pub user: UserProfile,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub posts: Vec<ProfilePost>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSearchResult {
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub profile_picture: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowStatus {
    #[serde(rename = "isFollowing")]
    pub is_following: bool,
}
