//! Client-side state for one open conversation: a polled message list, a
//! once-only resolved participant, and the compose draft. Everything else in
//! the app is fetch-and-render; this is the one place local state has to be
//! reconciled against the server across time.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::warn;

use crate::models::{ConversationPreview, Message, Participant};
use super::api_client::{ApiError, SocialApi};

/// The slice of the backend the conversation view talks to. `SocialApi` is
/// the real implementation; tests drive the reconciliation logic with an
/// in-memory fake.
#[async_trait::async_trait]
pub trait ChatApi: Send + Sync {
    async fn fetch_messages(
        &self,
        conversation_id: i64,
        username: &str,
    ) -> Result<Vec<Message>, ApiError>;

    async fn fetch_conversations(&self, username: &str)
        -> Result<Vec<ConversationPreview>, ApiError>;

    async fn fetch_participant(&self, username: &str) -> Result<Participant, ApiError>;

    async fn send_message(
        &self,
        conversation_id: i64,
        sender: &str,
        content: &str,
    ) -> Result<Message, ApiError>;
}

#[async_trait::async_trait]
impl ChatApi for SocialApi {
    async fn fetch_messages(
        &self,
        conversation_id: i64,
        username: &str,
    ) -> Result<Vec<Message>, ApiError> {
        SocialApi::fetch_messages(self, conversation_id, username).await
    }

    async fn fetch_conversations(
        &self,
        username: &str,
    ) -> Result<Vec<ConversationPreview>, ApiError> {
        SocialApi::fetch_conversations(self, username).await
    }

    async fn fetch_participant(&self, username: &str) -> Result<Participant, ApiError> {
        let user = self.fetch_profile(username).await?.user;
        let display_name = if user.display_name.is_empty() {
            user.username.clone()
        } else {
            user.display_name
        };

        Ok(Participant {
            username: user.username,
            display_name,
            profile_picture: user.profile_picture,
        })
    }

    async fn send_message(
        &self,
        conversation_id: i64,
        sender: &str,
        content: &str,
    ) -> Result<Message, ApiError> {
        SocialApi::send_message(self, conversation_id, sender, content).await
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageGroup {
    pub date: String,
    pub messages: Vec<Message>,
}

/// Render-ready view handed to the webview. Groups are recomputed for every
/// snapshot because the "Today"/"Yesterday" labels depend on the wall clock,
/// not just the message data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSnapshot {
    pub conversation_id: i64,
    pub participant: Option<Participant>,
    pub groups: Vec<MessageGroup>,
}

/// State of one open conversation screen.
#[derive(Debug)]
struct ConversationController {
    conversation_id: i64,
    viewer: String,
    epoch: u64,
    messages: Vec<Message>,
    participant: Option<Participant>,
    draft: String,
}

impl ConversationController {
    fn new(conversation_id: i64, viewer: String, epoch: u64) -> Self {
        Self {
            conversation_id,
            viewer,
            epoch,
            messages: Vec::new(),
            participant: None,
            draft: String::new(),
        }
    }

    /// Replace the message list with a freshly fetched one. Returns false
    /// when the fetched list equals the stored one, so identical polls never
    /// produce a re-render signal.
    fn apply_messages(&mut self, fetched: Vec<Message>) -> bool {
        if fetched == self.messages {
            return false;
        }

        self.messages = fetched;
        true
    }

    /// Store the resolved participant. Resolution happens at most once per
    /// view; an already-resolved participant is never overwritten.
    fn set_participant(&mut self, participant: Participant) -> bool {
        if self.participant.is_some() {
            return false;
        }

        self.participant = Some(participant);
        true
    }

    fn push_sent(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Take the draft for sending: trimmed, cleared from the controller.
    /// Returns None when there is nothing to send.
    fn take_draft(&mut self) -> Option<String> {
        let text = self.draft.trim().to_string();
        self.draft.clear();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn restore_draft(&mut self, text: String) {
        self.draft = text;
    }

    fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            conversation_id: self.conversation_id,
            participant: self.participant.clone(),
            groups: group_by_date(&self.messages, Local::now().date_naive()),
        }
    }
}

/// Registry of open conversation views, managed by Tauri. The epoch stamped
/// into each entry is the liveness guard: an async result is applied only
/// while the entry still carries the epoch the call started with, so a
/// closed or re-opened screen never receives stale state.
#[derive(Default)]
pub struct ChatState {
    sessions: Mutex<HashMap<i64, ConversationController>>,
    next_epoch: AtomicU64,
}

impl ChatState {
    /// Register a fresh view for the conversation, replacing any previous
    /// one. Returns the epoch that in-flight work must present to apply
    /// results.
    pub fn open(&self, conversation_id: i64, viewer: String) -> u64 {
        let epoch = self.next_epoch.fetch_add(1, Ordering::Relaxed) + 1;
        self.sessions.lock().insert(
            conversation_id,
            ConversationController::new(conversation_id, viewer, epoch),
        );
        epoch
    }

    pub fn close(&self, conversation_id: i64) {
        self.sessions.lock().remove(&conversation_id);
    }

    pub fn is_live(&self, conversation_id: i64, epoch: u64) -> bool {
        self.sessions
            .lock()
            .get(&conversation_id)
            .is_some_and(|session| session.epoch == epoch)
    }

    pub fn snapshot(&self, conversation_id: i64) -> Option<ConversationSnapshot> {
        self.sessions
            .lock()
            .get(&conversation_id)
            .map(|session| session.snapshot())
    }

    pub fn set_draft(&self, conversation_id: i64, text: String) {
        if let Some(session) = self.sessions.lock().get_mut(&conversation_id) {
            session.draft = text;
        }
    }

    pub fn draft(&self, conversation_id: i64) -> Option<String> {
        self.sessions
            .lock()
            .get(&conversation_id)
            .map(|session| session.draft.clone())
    }
}

/// One poll tick: fetch the authoritative message list, reconcile it into
/// the local view, and resolve the other participant if not yet known.
/// Returns a fresh snapshot when anything changed, None when the view is
/// unchanged or no longer live. A fetch error propagates without touching
/// state; a failed poll must not blank an already-populated view.
pub async fn poll_conversation(
    api: &dyn ChatApi,
    state: &ChatState,
    conversation_id: i64,
    epoch: u64,
) -> Result<Option<ConversationSnapshot>, ApiError> {
    let viewer = {
        let sessions = state.sessions.lock();
        match sessions.get(&conversation_id) {
            Some(session) if session.epoch == epoch => session.viewer.clone(),
            _ => return Ok(None),
        }
    };

    let fetched = api.fetch_messages(conversation_id, &viewer).await?;

    let (mut changed, needs_participant) = {
        let mut sessions = state.sessions.lock();
        match sessions.get_mut(&conversation_id) {
            Some(session) if session.epoch == epoch => (
                session.apply_messages(fetched.clone()),
                session.participant.is_none(),
            ),
            _ => return Ok(None),
        }
    };

    if needs_participant {
        match resolve_participant(api, &fetched, conversation_id, &viewer).await {
            Ok(Some(participant)) => {
                let mut sessions = state.sessions.lock();
                if let Some(session) = sessions.get_mut(&conversation_id) {
                    if session.epoch == epoch && session.set_participant(participant) {
                        changed = true;
                    }
                }
            }
            // Leave the participant unset; the next poll retries the chain.
            Ok(None) => {}
            Err(e) => warn!("participant resolution failed for conversation {conversation_id}: {e}"),
        }
    }

    if !changed {
        return Ok(None);
    }

    let sessions = state.sessions.lock();
    match sessions.get(&conversation_id) {
        Some(session) if session.epoch == epoch => Ok(Some(session.snapshot())),
        _ => Ok(None),
    }
}

/// Submit the compose draft. The draft is cleared up front; on failure the
/// trimmed text is restored so nothing the user typed is lost, and no
/// message is appended. On success the server-returned message is appended
/// immediately rather than waiting for the next poll.
pub async fn send_draft(
    api: &dyn ChatApi,
    state: &ChatState,
    conversation_id: i64,
) -> Result<Option<ConversationSnapshot>, ApiError> {
    let (viewer, epoch, text) = {
        let mut sessions = state.sessions.lock();
        let Some(session) = sessions.get_mut(&conversation_id) else {
            return Ok(None);
        };
        let Some(text) = session.take_draft() else {
            return Ok(None);
        };
        (session.viewer.clone(), session.epoch, text)
    };

    match api.send_message(conversation_id, &viewer, &text).await {
        Ok(message) => {
            let mut sessions = state.sessions.lock();
            match sessions.get_mut(&conversation_id) {
                Some(session) if session.epoch == epoch => {
                    session.push_sent(message);
                    Ok(Some(session.snapshot()))
                }
                _ => Ok(None),
            }
        }
        Err(e) => {
            let mut sessions = state.sessions.lock();
            if let Some(session) = sessions.get_mut(&conversation_id) {
                if session.epoch == epoch {
                    session.restore_draft(text);
                }
            }
            Err(e)
        }
    }
}

/// Derive the other participant's handle from the sender set of a fetched
/// message list: two senders one of which is the viewer → the other one; a
/// single sender that is not the viewer → that sender. Anything else (empty
/// or ambiguous) returns None and the conversation-list fallback applies.
fn derive_other_sender(messages: &[Message], viewer: &str) -> Option<String> {
    let senders: BTreeSet<&str> = messages.iter().map(|m| m.sender.as_str()).collect();

    if senders.len() == 2 && senders.contains(viewer) {
        senders
            .into_iter()
            .find(|sender| *sender != viewer)
            .map(str::to_string)
    } else if senders.len() == 1 {
        senders
            .into_iter()
            .next()
            .filter(|sender| *sender != viewer)
            .map(str::to_string)
    } else {
        None
    }
}

async fn resolve_participant(
    api: &dyn ChatApi,
    messages: &[Message],
    conversation_id: i64,
    viewer: &str,
) -> Result<Option<Participant>, ApiError> {
    let handle = match derive_other_sender(messages, viewer) {
        Some(handle) => Some(handle),
        None => other_participant_handle(api, conversation_id, viewer).await?,
    };

    match handle {
        Some(handle) => api.fetch_participant(&handle).await.map(Some),
        None => Ok(None),
    }
}

/// Fallback resolution: look the conversation up in the viewer's
/// conversation list and take the participant whose handle is not the
/// viewer's. A missing conversation or empty participant list resolves to
/// None.
async fn other_participant_handle(
    api: &dyn ChatApi,
    conversation_id: i64,
    viewer: &str,
) -> Result<Option<String>, ApiError> {
    let conversations = api.fetch_conversations(viewer).await?;

    Ok(conversations
        .into_iter()
        .find(|conversation| conversation.id == conversation_id)
        .and_then(|conversation| {
            conversation
                .participants
                .into_iter()
                .find(|participant| participant.username != viewer)
        })
        .map(|participant| participant.username))
}

/// Partition an ordered message list into date-labeled groups. Input order
/// is preserved inside each group and groups appear in first-seen order.
/// Pure; `today` is the viewer's current local calendar day.
pub fn group_by_date(messages: &[Message], today: NaiveDate) -> Vec<MessageGroup> {
    let mut groups: Vec<MessageGroup> = Vec::new();

    for message in messages {
        let label = date_label(&message.created_at, today);
        match groups.iter_mut().find(|group| group.date == label) {
            Some(group) => group.messages.push(message.clone()),
            None => groups.push(MessageGroup {
                date: label,
                messages: vec![message.clone()],
            }),
        }
    }

    groups
}

fn date_label(timestamp: &DateTime<Utc>, today: NaiveDate) -> String {
    let day = timestamp.with_timezone(&Local).date_naive();

    if day == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(day) {
        "Yesterday".to_string()
    } else if day.year() == today.year() {
        day.format("%b %-d").to_string()
    } else {
        day.format("%b %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::AtomicUsize;

    fn msg(id: i64, sender: &str, content: &str) -> Message {
        Message {
            id,
            conversation_id: 42,
            sender: sender.to_string(),
            content: content.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            read: false,
        }
    }

    fn participant(username: &str, display_name: &str) -> Participant {
        Participant {
            username: username.to_string(),
            display_name: display_name.to_string(),
            profile_picture: String::new(),
        }
    }

    fn flatten(snapshot: &ConversationSnapshot) -> Vec<Message> {
        snapshot
            .groups
            .iter()
            .flat_map(|group| group.messages.clone())
            .collect()
    }

    #[derive(Default)]
    struct FakeChatApi {
        messages: Mutex<Vec<Message>>,
        messages_fail: Mutex<bool>,
        conversations: Mutex<Vec<ConversationPreview>>,
        profiles: Mutex<HashMap<String, Participant>>,
        send_reply: Mutex<Option<Message>>,
        sent: Mutex<Vec<(i64, String, String)>>,
        message_calls: AtomicUsize,
        conversation_calls: AtomicUsize,
        profile_calls: AtomicUsize,
    }

    impl FakeChatApi {
        fn with_messages(messages: Vec<Message>) -> Self {
            let api = Self::default();
            *api.messages.lock() = messages;
            api
        }

        fn add_profile(&self, p: Participant) {
            self.profiles.lock().insert(p.username.clone(), p);
        }

        fn server_error() -> ApiError {
            ApiError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            }
        }
    }

    #[async_trait::async_trait]
    impl ChatApi for FakeChatApi {
        async fn fetch_messages(
            &self,
            _conversation_id: i64,
            _username: &str,
        ) -> Result<Vec<Message>, ApiError> {
            self.message_calls.fetch_add(1, Ordering::SeqCst);
            if *self.messages_fail.lock() {
                return Err(Self::server_error());
            }
            Ok(self.messages.lock().clone())
        }

        async fn fetch_conversations(
            &self,
            _username: &str,
        ) -> Result<Vec<ConversationPreview>, ApiError> {
            self.conversation_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.conversations.lock().clone())
        }

        async fn fetch_participant(&self, username: &str) -> Result<Participant, ApiError> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            self.profiles
                .lock()
                .get(username)
                .cloned()
                .ok_or_else(Self::server_error)
        }

        async fn send_message(
            &self,
            conversation_id: i64,
            sender: &str,
            content: &str,
        ) -> Result<Message, ApiError> {
            self.sent
                .lock()
                .push((conversation_id, sender.to_string(), content.to_string()));
            self.send_reply.lock().clone().ok_or_else(Self::server_error)
        }
    }

    #[tokio::test]
    async fn identical_poll_produces_no_update() {
        let api = FakeChatApi::with_messages(vec![msg(1, "alice", "hi"), msg(2, "bob", "hey")]);
        api.add_profile(participant("bob", "Bob"));
        let state = ChatState::default();
        let epoch = state.open(42, "alice".to_string());

        let first = poll_conversation(&api, &state, 42, epoch).await.unwrap();
        assert!(first.is_some());

        let second = poll_conversation(&api, &state, 42, epoch).await.unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn changed_poll_replaces_list_wholesale() {
        let api = FakeChatApi::with_messages(vec![msg(1, "alice", "hi")]);
        api.add_profile(participant("bob", "Bob"));
        let state = ChatState::default();
        let epoch = state.open(42, "alice".to_string());

        poll_conversation(&api, &state, 42, epoch).await.unwrap();

        *api.messages.lock() = vec![msg(1, "alice", "hi"), msg(2, "bob", "hey")];
        let snapshot = poll_conversation(&api, &state, 42, epoch)
            .await
            .unwrap()
            .expect("new message should produce an update");

        let messages = flatten(&snapshot);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].sender, "bob");
    }

    #[tokio::test]
    async fn participant_is_resolved_once_and_kept() {
        let api = FakeChatApi::with_messages(vec![msg(1, "alice", "hi"), msg(2, "bob", "hey")]);
        api.add_profile(participant("bob", "Bob"));
        let state = ChatState::default();
        let epoch = state.open(42, "alice".to_string());

        let snapshot = poll_conversation(&api, &state, 42, epoch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.participant.as_ref().unwrap().display_name, "Bob");

        // New content and a changed profile must not disturb the stored
        // participant.
        api.add_profile(participant("bob", "Bobby"));
        *api.messages.lock() = vec![
            msg(1, "alice", "hi"),
            msg(2, "bob", "hey"),
            msg(3, "bob", "you there?"),
        ];

        let snapshot = poll_conversation(&api, &state, 42, epoch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snapshot.participant.as_ref().unwrap().display_name, "Bob");
        assert_eq!(api.profile_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn two_sender_set_resolves_without_fallback() {
        let api = FakeChatApi::with_messages(vec![msg(1, "alice", "hi"), msg(2, "bob", "hey")]);
        api.add_profile(participant("bob", "Bob"));
        let state = ChatState::default();
        let epoch = state.open(42, "alice".to_string());

        let snapshot = poll_conversation(&api, &state, 42, epoch)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(snapshot.participant.unwrap().username, "bob");
        assert_eq!(api.conversation_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn single_foreign_sender_resolves_without_fallback() {
        let api = FakeChatApi::with_messages(vec![msg(1, "bob", "hey"), msg(2, "bob", "hello?")]);
        api.add_profile(participant("bob", "Bob"));
        let state = ChatState::default();
        let epoch = state.open(42, "alice".to_string());

        let snapshot = poll_conversation(&api, &state, 42, epoch)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(snapshot.participant.unwrap().username, "bob");
        assert_eq!(api.conversation_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn viewer_only_sender_set_uses_conversation_fallback() {
        let api = FakeChatApi::with_messages(vec![msg(1, "alice", "anyone home?")]);
        api.add_profile(participant("bob", "Bob"));
        *api.conversations.lock() = vec![ConversationPreview {
            id: 42,
            participants: vec![participant("bob", "Bob")],
            last_message: msg(1, "alice", "anyone home?"),
            unread_count: 0,
        }];
        let state = ChatState::default();
        let epoch = state.open(42, "alice".to_string());

        let snapshot = poll_conversation(&api, &state, 42, epoch)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(snapshot.participant.unwrap().username, "bob");
        assert_eq!(api.conversation_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unresolved_participant_is_retried_on_later_polls() {
        // Empty conversation and the fallback finds nothing either: the
        // header stays unresolved and every poll retries the chain.
        let api = FakeChatApi::with_messages(Vec::new());
        let state = ChatState::default();
        let epoch = state.open(42, "alice".to_string());

        assert!(poll_conversation(&api, &state, 42, epoch)
            .await
            .unwrap()
            .is_none());
        assert!(poll_conversation(&api, &state, 42, epoch)
            .await
            .unwrap()
            .is_none());

        assert_eq!(api.conversation_calls.load(Ordering::SeqCst), 2);
        assert!(state.snapshot(42).unwrap().participant.is_none());
    }

    #[tokio::test]
    async fn poll_failure_preserves_previous_state() {
        let api = FakeChatApi::with_messages(vec![msg(1, "bob", "hey")]);
        api.add_profile(participant("bob", "Bob"));
        let state = ChatState::default();
        let epoch = state.open(42, "alice".to_string());

        poll_conversation(&api, &state, 42, epoch).await.unwrap();

        *api.messages_fail.lock() = true;
        let result = poll_conversation(&api, &state, 42, epoch).await;
        assert!(result.is_err());

        let snapshot = state.snapshot(42).unwrap();
        assert_eq!(flatten(&snapshot).len(), 1);
        assert_eq!(snapshot.participant.unwrap().username, "bob");
    }

    #[tokio::test]
    async fn stale_epoch_is_discarded_before_fetching() {
        let api = FakeChatApi::with_messages(vec![msg(1, "bob", "hey")]);
        let state = ChatState::default();
        let stale = state.open(42, "alice".to_string());
        let _fresh = state.open(42, "alice".to_string());

        let result = poll_conversation(&api, &state, 42, stale).await.unwrap();

        assert!(result.is_none());
        assert_eq!(api.message_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn closed_conversation_ignores_in_flight_results() {
        let api = FakeChatApi::with_messages(vec![msg(1, "bob", "hey")]);
        let state = ChatState::default();
        let epoch = state.open(42, "alice".to_string());
        state.close(42);

        let result = poll_conversation(&api, &state, 42, epoch).await.unwrap();

        assert!(result.is_none());
        assert!(state.snapshot(42).is_none());
    }

    #[tokio::test]
    async fn send_appends_server_message_immediately() {
        let api = FakeChatApi::with_messages(Vec::new());
        *api.send_reply.lock() = Some(msg(7, "alice", "hello"));
        let state = ChatState::default();
        state.open(42, "alice".to_string());
        state.set_draft(42, "  hello  ".to_string());

        let snapshot = send_draft(&api, &state, 42)
            .await
            .unwrap()
            .expect("successful send should produce an update");

        let messages = flatten(&snapshot);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[0].sender, "alice");
        assert_eq!(messages[0].conversation_id, 42);

        // The submitted content was trimmed and the draft cleared.
        assert_eq!(api.sent.lock()[0], (42, "alice".to_string(), "hello".to_string()));
        assert_eq!(state.draft(42).unwrap(), "");
    }

    #[tokio::test]
    async fn failed_send_restores_draft_and_appends_nothing() {
        let api = FakeChatApi::with_messages(Vec::new());
        let state = ChatState::default();
        state.open(42, "alice".to_string());
        state.set_draft(42, " hello ".to_string());

        let result = send_draft(&api, &state, 42).await;

        assert!(result.is_err());
        assert_eq!(state.draft(42).unwrap(), "hello");
        assert!(flatten(&state.snapshot(42).unwrap()).is_empty());
    }

    #[tokio::test]
    async fn blank_draft_is_never_submitted() {
        let api = FakeChatApi::with_messages(Vec::new());
        let state = ChatState::default();
        state.open(42, "alice".to_string());
        state.set_draft(42, "   ".to_string());

        let result = send_draft(&api, &state, 42).await.unwrap();

        assert!(result.is_none());
        assert!(api.sent.lock().is_empty());
    }

    #[test]
    fn derive_other_sender_covers_the_rule_table() {
        let viewer = "alice";

        let both = vec![msg(1, "alice", "hi"), msg(2, "bob", "hey")];
        assert_eq!(derive_other_sender(&both, viewer), Some("bob".to_string()));

        let them_only = vec![msg(1, "bob", "hey")];
        assert_eq!(derive_other_sender(&them_only, viewer), Some("bob".to_string()));

        let viewer_only = vec![msg(1, "alice", "hi"), msg(2, "alice", "hello?")];
        assert_eq!(derive_other_sender(&viewer_only, viewer), None);

        assert_eq!(derive_other_sender(&[], viewer), None);

        let group = vec![msg(1, "bob", "a"), msg(2, "carol", "b"), msg(3, "dave", "c")];
        assert_eq!(derive_other_sender(&group, viewer), None);
    }

    #[test]
    fn grouping_splits_today_and_yesterday() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
        let earlier = now - Duration::days(1);
        let today = now.with_timezone(&Local).date_naive();

        let mut old = msg(1, "bob", "yesterday's news");
        old.created_at = earlier;
        let mut a = msg(2, "alice", "morning");
        a.created_at = now;
        let mut b = msg(3, "bob", "afternoon");
        b.created_at = now;

        let groups = group_by_date(&[old, a, b], today);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, "Yesterday");
        assert_eq!(groups[0].messages.len(), 1);
        assert_eq!(groups[1].date, "Today");
        assert_eq!(groups[1].messages.len(), 2);
        // Order within the group follows the input sequence.
        assert_eq!(groups[1].messages[0].content, "morning");
        assert_eq!(groups[1].messages[1].content, "afternoon");
    }

    #[test]
    fn grouping_labels_older_dates_absolutely() {
        let old = Utc.with_ymd_and_hms(2022, 6, 15, 12, 0, 0).unwrap();
        let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let mut message = msg(1, "bob", "archive");
        message.created_at = old;

        let groups = group_by_date(&[message], today);

        assert_eq!(groups.len(), 1);
        assert!(groups[0].date.starts_with("Jun"));
        assert!(groups[0].date.ends_with("2022"));
    }

    #[test]
    fn grouping_omits_the_year_for_the_current_year() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let mut message = msg(1, "bob", "recent");
        message.created_at = ts;

        let groups = group_by_date(&[message], today);

        assert!(groups[0].date.starts_with("Jun"));
        assert!(!groups[0].date.contains("2024"));
    }

    #[test]
    fn grouping_is_stable_for_interleaved_days() {
        // A backend that returns days out of order keeps first-seen group
        // order rather than re-sorting.
        let day_one = Utc.with_ymd_and_hms(2022, 3, 1, 12, 0, 0).unwrap();
        let day_two = Utc.with_ymd_and_hms(2022, 3, 3, 12, 0, 0).unwrap();
        let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let mut a = msg(1, "alice", "first");
        a.created_at = day_two;
        let mut b = msg(2, "bob", "second");
        b.created_at = day_one;
        let mut c = msg(3, "alice", "third");
        c.created_at = day_two;

        let groups = group_by_date(&[a, b, c], today);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].messages.len(), 2);
        assert_eq!(groups[0].messages[0].content, "first");
        assert_eq!(groups[0].messages[1].content, "third");
        assert_eq!(groups[1].messages[0].content, "second");
    }
}
