use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::models::{
    AuthUser, Comment, ConversationPreview, CreatedConversation, FeedPost, FollowStatus,
    LikeStatus, Message, Notification, Participant, PostView, ProfileView, UnreadCount,
    UserProfile, UserSearchResult,
};
use super::config_service;

/// Failures talking to the backend. The three cases are handled identically
/// by callers (log, keep prior state), but the split keeps the messages
/// useful.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API error ({status}): {body}")]
    Status { status: StatusCode, body: String },
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

/// JSON client for the social backend.
pub struct SocialApi {
    client: Client,
    base_url: String,
}

impl SocialApi {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client pointed at the configured backend.
    pub fn from_config() -> Result<Self, String> {
        let base_url = config_service::get_base_url()?;
        Ok(Self::new(&base_url))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(response.json::<T>().await?)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: String,
        body: serde_json::Value,
    ) -> Result<T, ApiError> {
        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(response.json::<T>().await?)
    }

    async fn put_no_body(&self, url: String) -> Result<(), ApiError> {
        let response = self.client.put(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, ApiError> {
        self.post_json(
            format!("{}/api/login", self.base_url),
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, ApiError> {
        self.post_json(
            format!("{}/api/register", self.base_url),
            serde_json::json!({ "username": username, "email": email, "password": password }),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Feed & posts
    // ------------------------------------------------------------------

    pub async fn fetch_feed(&self, username: &str) -> Result<Vec<FeedPost>, ApiError> {
        let url = format!(
            "{}/api/feed?username={}",
            self.base_url,
            urlencoding::encode(username)
        );
        let feed: Option<Vec<FeedPost>> = self.get_json(url).await?;
        Ok(feed.unwrap_or_default())
    }

    pub async fn create_post(&self, username: &str, content: &str) -> Result<FeedPost, ApiError> {
        self.post_json(
            format!("{}/api/posts/create", self.base_url),
            serde_json::json!({ "username": username, "content": content }),
        )
        .await
    }

    pub async fn view_post(&self, id: i64) -> Result<PostView, ApiError> {
        self.get_json(format!("{}/api/posts/view?id={}", self.base_url, id))
            .await
    }

    pub async fn like_status(&self, post_id: i64, username: &str) -> Result<LikeStatus, ApiError> {
        let url = format!(
            "{}/api/posts/like/status?post_id={}&username={}",
            self.base_url,
            post_id,
            urlencoding::encode(username)
        );
        self.get_json(url).await
    }

    pub async fn toggle_like(&self, post_id: i64, username: &str) -> Result<LikeStatus, ApiError> {
        self.post_json(
            format!("{}/api/posts/like", self.base_url),
            serde_json::json!({ "post_id": post_id, "username": username }),
        )
        .await
    }

    pub async fn create_comment(
        &self,
        post_id: i64,
        username: &str,
        content: &str,
    ) -> Result<Comment, ApiError> {
        self.post_json(
            format!("{}/api/comments/create", self.base_url),
            serde_json::json!({ "post_id": post_id, "username": username, "content": content }),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Profiles & follows
    // ------------------------------------------------------------------

    pub async fn fetch_profile(&self, username: &str) -> Result<ProfileView, ApiError> {
        let url = format!(
            "{}/api/profile?username={}",
            self.base_url,
            urlencoding::encode(username)
        );
        let value: serde_json::Value = self.get_json(url).await?;
        parse_profile(value)
    }

    pub async fn update_profile(
        &self,
        username: &str,
        display_name: &str,
        profile_picture: &str,
    ) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .post_json(
                format!("{}/api/profile/update", self.base_url),
                serde_json::json!({
                    "username": username,
                    "display_name": display_name,
                    "profile_picture": profile_picture,
                }),
            )
            .await?;
        Ok(())
    }

    pub async fn follow_status(
        &self,
        follower: &str,
        following: &str,
    ) -> Result<FollowStatus, ApiError> {
        let url = format!(
            "{}/api/follow/status?follower={}&following={}",
            self.base_url,
            urlencoding::encode(follower),
            urlencoding::encode(following)
        );
        self.get_json(url).await
    }

    pub async fn toggle_follow(
        &self,
        follower: &str,
        following: &str,
    ) -> Result<FollowStatus, ApiError> {
        self.post_json(
            format!("{}/api/follow/toggle", self.base_url),
            serde_json::json!({ "follower": follower, "following": following }),
        )
        .await
    }

    pub async fn fetch_followers(&self, username: &str) -> Result<Vec<Participant>, ApiError> {
        let url = format!(
            "{}/api/followers?username={}",
            self.base_url,
            urlencoding::encode(username)
        );
        let followers: Option<Vec<Participant>> = self.get_json(url).await?;
        Ok(followers.unwrap_or_default())
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<UserSearchResult>, ApiError> {
        let url = format!(
            "{}/api/search/users?q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        let results: Option<Vec<UserSearchResult>> = self.get_json(url).await?;
        Ok(results.unwrap_or_default())
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub async fn fetch_notifications(&self, username: &str) -> Result<Vec<Notification>, ApiError> {
        let url = format!(
            "{}/api/notifications?username={}",
            self.base_url,
            urlencoding::encode(username)
        );
        let notifications: Option<Vec<Notification>> = self.get_json(url).await?;
        Ok(notifications.unwrap_or_default())
    }

    pub async fn mark_notification_read(&self, id: i64) -> Result<(), ApiError> {
        self.put_no_body(format!("{}/api/notifications/read?id={}", self.base_url, id))
            .await
    }

    pub async fn mark_all_notifications_read(&self, username: &str) -> Result<(), ApiError> {
        let url = format!(
            "{}/api/notifications/read-all?username={}",
            self.base_url,
            urlencoding::encode(username)
        );
        self.put_no_body(url).await
    }

    pub async fn unread_notification_count(&self, username: &str) -> Result<i64, ApiError> {
        let url = format!(
            "{}/api/notifications/unread-count?username={}",
            self.base_url,
            urlencoding::encode(username)
        );
        let count: UnreadCount = self.get_json(url).await?;
        Ok(count.count)
    }

    // ------------------------------------------------------------------
    // Conversations & messages
    // ------------------------------------------------------------------

    pub async fn fetch_conversations(
        &self,
        username: &str,
    ) -> Result<Vec<ConversationPreview>, ApiError> {
        let url = format!(
            "{}/api/conversations?username={}",
            self.base_url,
            urlencoding::encode(username)
        );
        let conversations: Option<Vec<ConversationPreview>> = self.get_json(url).await?;
        Ok(conversations.unwrap_or_default())
    }

    pub async fn fetch_messages(
        &self,
        conversation_id: i64,
        username: &str,
    ) -> Result<Vec<Message>, ApiError> {
        let url = format!(
            "{}/api/messages?conversation_id={}&username={}",
            self.base_url,
            conversation_id,
            urlencoding::encode(username)
        );
        let messages: Option<Vec<Message>> = self.get_json(url).await?;
        Ok(messages.unwrap_or_default())
    }

    pub async fn send_message(
        &self,
        conversation_id: i64,
        sender: &str,
        content: &str,
    ) -> Result<Message, ApiError> {
        self.post_json(
            format!("{}/api/messages/send", self.base_url),
            serde_json::json!({
                "conversation_id": conversation_id,
                "sender": sender,
                "content": content,
            }),
        )
        .await
    }

    pub async fn create_conversation(
        &self,
        creator: &str,
        recipient: &str,
        message: &str,
    ) -> Result<CreatedConversation, ApiError> {
        self.post_json(
            format!("{}/api/conversations/create", self.base_url),
            serde_json::json!({ "creator": creator, "recipient": recipient, "message": message }),
        )
        .await
    }

    pub async fn unread_message_count(&self, username: &str) -> Result<i64, ApiError> {
        let url = format!(
            "{}/api/messages/unread-count?username={}",
            self.base_url,
            urlencoding::encode(username)
        );
        let count: UnreadCount = self.get_json(url).await?;
        Ok(count.count)
    }
}

/// The profile endpoint wraps the user in a `{user, posts}` envelope, but
/// some responses carry the user object bare; accept both.
fn parse_profile(value: serde_json::Value) -> Result<ProfileView, ApiError> {
    if value.get("user").is_some() {
        Ok(serde_json::from_value(value)?)
    } else {
        let user: UserProfile = serde_json::from_value(value)?;
        Ok(ProfileView {
            user,
            posts: Vec::new(),
        })
    }
}
