use serde::{Deserialize, Serialize};

use super::message::ChatTurn;

/// Body of a streaming chat-completions request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub messages: Vec<ChatTurn>,
    pub stream: bool,
}

impl ChatRequest {
    /// Streaming request for `messages`.
    pub fn new(messages: Vec<ChatTurn>) -> Self {
        Self {
            model: None,
            messages,
            stream: true,
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_model() {
        let request = ChatRequest::new(vec![ChatTurn::user("When is the expo?")]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "messages": [{"role": "user", "content": "When is the expo?"}],
                "stream": true
            })
        );
    }

    #[test]
    fn test_request_with_model() {
        let request = ChatRequest::new(Vec::new()).with_model(Some("gpt-4o-mini".to_string()));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["stream"], true);
    }
}
