//! Chat session state: transcript, in-flight reply and the send flow.

use chrono::Utc;
use futures_util::StreamExt;

use crate::chat::notification::Notification;
use crate::client::ChatClient;
use crate::error::ChatError;
use crate::models::{AssistantMessage, ChatMessage, ChatTurn};
use crate::sse::DeltaFragment;
use crate::traits::HttpClient;

/// Id of the greeting that opens every transcript.
pub const GREETING_ID: i64 = 1;

pub const GREETING: &str = "👋 Hi there! Welcome to the EdTech Expo! I'm your AI assistant. \
Ask me about speakers, exhibitors, registration or the event schedule.";

pub const GREETING_UNAVAILABLE: &str = "👋 Hi there! Welcome to the EdTech Expo! I'm your AI assistant. \
The chat service is currently unavailable. Please contact us through other channels for assistance.";

/// A submitted message waiting for its reply.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReply {
    pub user_message_id: i64,
    /// Conversation so far, ending with the new user turn
    pub history: Vec<ChatTurn>,
}

/// One chat widget's conversation.
///
/// At most one reply is in flight; input submitted meanwhile is ignored.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    /// True between `submit` and `complete_reply`/`fail_reply`
    loading: bool,
    reply: Option<AssistantMessage>,
    last_id: i64,
}

impl ChatSession {
    /// Start a transcript with the greeting for an enabled or disabled backend.
    pub fn new(enabled: bool) -> Self {
        let greeting = if enabled { GREETING } else { GREETING_UNAVAILABLE };
        Self {
            messages: vec![ChatMessage::bot(GREETING_ID, greeting)],
            loading: false,
            reply: None,
            last_id: GREETING_ID,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The reply currently being streamed, if any.
    pub fn reply(&self) -> Option<&AssistantMessage> {
        self.reply.as_ref()
    }

    /// Millisecond timestamp, bumped when needed so ids strictly increase.
    fn next_id(&mut self) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    /// Transcript as history turns, without the greeting.
    pub fn history(&self) -> Vec<ChatTurn> {
        self.messages
            .iter()
            .filter(|message| message.id != GREETING_ID)
            .map(ChatMessage::to_turn)
            .collect()
    }

    /// Record user input and return the history to send.
    ///
    /// Returns `None` for blank input or while a reply is in flight.
    pub fn submit(&mut self, input: &str) -> Option<PendingReply> {
        if input.trim().is_empty() || self.loading {
            return None;
        }

        let id = self.next_id();
        self.messages.push(ChatMessage::user(id, input));
        self.loading = true;

        Some(PendingReply {
            user_message_id: id,
            history: self.history(),
        })
    }

    /// Add the empty assistant placeholder that fragments are appended to.
    pub fn begin_reply(&mut self) -> i64 {
        let id = self.next_id();
        self.messages.push(ChatMessage::bot(id, ""));
        self.reply = Some(AssistantMessage::new(id));
        id
    }

    /// Append a fragment to the in-flight reply, returning its running text.
    pub fn append_delta(&mut self, fragment: &DeltaFragment) -> Option<&str> {
        let reply = self.reply.as_mut()?;
        reply.append(fragment);

        let id = reply.id();
        let message = self.messages.iter_mut().find(|message| message.id == id)?;
        message.text = reply.text().to_string();
        Some(&message.text)
    }

    /// Finish the in-flight reply and return its final text.
    pub fn complete_reply(&mut self) -> String {
        self.loading = false;
        match self.reply.take() {
            Some(mut reply) => {
                reply.finalize();
                reply.text().to_string()
            }
            None => String::new(),
        }
    }

    /// Abandon the in-flight reply after `err`.
    ///
    /// The placeholder is removed; earlier messages, including the user's,
    /// stay in the transcript.
    pub fn fail_reply(&mut self, err: &ChatError) -> Notification {
        tracing::warn!("Chat error [{}]: {}", err.error_code(), err);
        if let Some(reply) = self.reply.take() {
            self.messages.retain(|message| message.id != reply.id());
        }
        self.loading = false;
        Notification::from_error(err)
    }

    /// Submit `input` and stream the reply through `client`.
    ///
    /// `on_update` receives the running reply text after every fragment.
    /// Returns `Ok(None)` when the input was ignored.
    pub async fn send<C, F>(
        &mut self,
        client: &ChatClient<C>,
        input: &str,
        mut on_update: F,
    ) -> Result<Option<String>, Notification>
    where
        C: HttpClient,
        F: FnMut(&str),
    {
        let Some(pending) = self.submit(input) else {
            return Ok(None);
        };

        let mut fragments = match client.stream(&pending.history).await {
            Ok(fragments) => fragments,
            Err(e) => return Err(self.fail_reply(&e)),
        };

        self.begin_reply();
        while let Some(item) = fragments.next().await {
            match item {
                Ok(fragment) => {
                    if let Some(text) = self.append_delta(&fragment) {
                        on_update(text);
                    }
                }
                Err(e) => return Err(self.fail_reply(&e)),
            }
        }

        Ok(Some(self.complete_reply()))
    }
}
