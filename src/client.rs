//! Streaming chat client.
//!
//! Sends the conversation history to a chat-completions endpoint and turns
//! the event-stream response into an ordered stream of text fragments.

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;

use crate::adapters::ReqwestHttpClient;
use crate::config::ChatConfig;
use crate::error::{ChatError, ChatResult};
use crate::models::{ChatRequest, ChatTurn};
use crate::sse::{DeltaFragment, StreamDecoder, Utf8StreamDecoder};
use crate::traits::{ByteStream, DeltaDecoder, Headers, HttpClient};

/// Fragments of one reply, in arrival order.
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<DeltaFragment, ChatError>> + Send>>;

/// Client for a streaming chat-completions backend.
pub struct ChatClient<C: HttpClient = ReqwestHttpClient> {
    config: ChatConfig,
    http: C,
}

impl ChatClient<ReqwestHttpClient> {
    /// Create a client backed by reqwest.
    pub fn new(config: ChatConfig) -> Self {
        let http = ReqwestHttpClient::with_connect_timeout(Duration::from_secs(
            config.connect_timeout_secs,
        ));
        Self { config, http }
    }
}

impl<C: HttpClient> ChatClient<C> {
    /// Create a client with a custom HTTP implementation.
    pub fn with_http(config: ChatConfig, http: C) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        if let Some(key) = &self.config.api_key {
            headers.insert("Authorization".to_string(), format!("Bearer {}", key));
        }
        headers
    }

    fn new_decoder(&self) -> StreamDecoder {
        match self.config.max_pending_bytes {
            Some(limit) => StreamDecoder::new().with_max_pending_bytes(limit),
            None => StreamDecoder::new(),
        }
    }

    /// Request a reply to `history` and stream its fragments.
    ///
    /// Fails before streaming when the backend is disabled, the request
    /// cannot be sent, or the status is not a success. A read failure during
    /// the body is yielded as the stream's last item.
    pub async fn stream(&self, history: &[ChatTurn]) -> ChatResult<DeltaStream> {
        let Some(url) = self.config.endpoint.as_deref() else {
            return Err(ChatError::Unavailable);
        };

        let request = ChatRequest::new(history.to_vec()).with_model(self.config.model.clone());
        let body = serde_json::to_string(&request)?;

        tracing::debug!("Opening chat stream to {} ({} turns)", url, history.len());
        let bytes = self
            .http
            .post_stream(url, &body, &self.headers())
            .await
            .map_err(|e| {
                tracing::warn!("Chat request failed: {}", e);
                ChatError::from(e)
            })?;

        Ok(decode_byte_stream(bytes, self.new_decoder()))
    }

    /// Request a reply and wait for the whole text.
    pub async fn collect_reply(&self, history: &[ChatTurn]) -> ChatResult<String> {
        let mut fragments = self.stream(history).await?;
        let mut reply = String::new();
        while let Some(fragment) = fragments.next().await {
            reply.push_str(fragment?.as_str());
        }
        Ok(reply)
    }
}

struct DecodeState<D> {
    /// Response body; `None` once it is finished or abandoned
    body: Option<ByteStream>,
    utf8: Utf8StreamDecoder,
    decoder: D,
    ready: VecDeque<DeltaFragment>,
}

/// Decode a response body into fragments.
///
/// Reading stops as soon as the decoder reaches `Done`; the rest of the
/// body is dropped unread. A body that ends without the sentinel is flushed.
pub fn decode_byte_stream<D>(body: ByteStream, decoder: D) -> DeltaStream
where
    D: DeltaDecoder + 'static,
{
    let state = DecodeState {
        body: Some(body),
        utf8: Utf8StreamDecoder::new(),
        decoder,
        ready: VecDeque::new(),
    };

    let fragments = stream::unfold(state, |mut state| async move {
        loop {
            if let Some(fragment) = state.ready.pop_front() {
                return Some((Ok(fragment), state));
            }

            if state.decoder.is_done() {
                state.body = None;
            }

            let body = state.body.as_mut()?;
            let next = body.next().await;

            match next {
                Some(Ok(chunk)) => {
                    let text = state.utf8.decode(&chunk);
                    state.ready.extend(state.decoder.feed(&text));
                }
                Some(Err(e)) => {
                    tracing::warn!("Chat stream read failed: {}", e);
                    state.body = None;
                    return Some((Err(ChatError::StreamRead(e)), state));
                }
                None => {
                    tracing::debug!("Chat stream closed without sentinel");
                    let tail = state.utf8.finish();
                    state.ready.extend(state.decoder.feed(&tail));
                    state.ready.extend(state.decoder.flush());
                    state.body = None;
                }
            }
        }
    });

    Box::pin(fragments)
}
