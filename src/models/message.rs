use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sse::DeltaFragment;

/// Role of a turn in the conversation history sent upstream
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A message shown in the chat transcript
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: i64,
    pub text: String,
    /// True for assistant (and greeting) messages
    pub is_bot: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            is_bot: false,
            created_at: Utc::now(),
        }
    }

    pub fn bot(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            is_bot: true,
            created_at: Utc::now(),
        }
    }

    pub fn role(&self) -> MessageRole {
        if self.is_bot {
            MessageRole::Assistant
        } else {
            MessageRole::User
        }
    }

    /// This message as a history turn.
    pub fn to_turn(&self) -> ChatTurn {
        ChatTurn {
            role: self.role(),
            content: self.text.clone(),
        }
    }
}

/// One entry of the conversation history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// The reply being assembled from streamed fragments.
///
/// Text is the concatenation of every appended fragment in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantMessage {
    id: i64,
    text: String,
    is_complete: bool,
}

impl AssistantMessage {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            text: String::new(),
            is_complete: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Always true; kept for parity with [`ChatMessage::is_bot`].
    pub fn is_bot(&self) -> bool {
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Append a fragment. Ignored once the message is complete.
    pub fn append(&mut self, fragment: &DeltaFragment) {
        if !self.is_complete {
            self.text.push_str(fragment.as_str());
        }
    }

    /// Mark the message finished; further fragments are ignored.
    pub fn finalize(&mut self) {
        self.is_complete = true;
    }

    /// The transcript form of this message.
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage::bot(self.id, self.text.clone())
    }
}
