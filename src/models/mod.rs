mod message;
mod request;

pub use message::{AssistantMessage, ChatMessage, ChatTurn, MessageRole};
pub use request::ChatRequest;
