//! Mock implementations for test fixtures.
//!
//! This module re-exports the mock implementations from `expo_chat::adapters::mock`
//! and provides additional test-specific mock configurations.

#[allow(unused_imports)]
pub use expo_chat::adapters::mock::{MockHttpClient, MockResponse};

use expo_chat::client::ChatClient;
use expo_chat::config::ChatConfig;
use expo_chat::traits::HttpError;

/// Endpoint used with the mock HTTP client.
#[allow(dead_code)]
pub const MOCK_URL: &str = "https://chat.expo.test/v1/chat/completions";

/// Configuration for setting up mock chat responses.
#[allow(dead_code)]
pub struct MockHttpConfig {
    client: MockHttpClient,
}

#[allow(dead_code)]
impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a streamed body delivered in the given chunks.
    pub fn with_stream<I, S>(self, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.client.set_response(MOCK_URL, MockResponse::chunks(chunks));
        self
    }

    /// Configures an error status response.
    pub fn with_error_response(self, status: u16, message: &str) -> Self {
        self.client.set_response(
            MOCK_URL,
            MockResponse::Error(HttpError::ServerError {
                status,
                message: message.to_string(),
            }),
        );
        self
    }

    /// Builds the configured MockHttpClient.
    pub fn build(self) -> MockHttpClient {
        self.client
    }

    /// Builds a chat client pointed at [`MOCK_URL`].
    pub fn build_client(self) -> ChatClient<MockHttpClient> {
        ChatClient::with_http(ChatConfig::new().with_endpoint(MOCK_URL), self.client)
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
