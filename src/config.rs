//! Chat client configuration.
//!
//! The backend is disabled unless an endpoint is configured, either through
//! the builder or the `EXPO_CHAT_*` environment variables.

/// Chat completions endpoint
pub const ENV_URL: &str = "EXPO_CHAT_URL";
/// Bearer token sent with each request
pub const ENV_API_KEY: &str = "EXPO_CHAT_API_KEY";
/// Model name forwarded in the request body
pub const ENV_MODEL: &str = "EXPO_CHAT_MODEL";
/// Connect timeout in seconds
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "EXPO_CHAT_CONNECT_TIMEOUT_SECS";
/// Cap on bytes buffered behind an unparsable line
pub const ENV_MAX_PENDING_BYTES: &str = "EXPO_CHAT_MAX_PENDING_BYTES";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 60;

/// Configuration for [`crate::client::ChatClient`].
///
/// # Example
///
/// ```ignore
/// use expo_chat::config::ChatConfig;
///
/// let config = ChatConfig::default()
///     .with_endpoint("https://api.example.com/v1/chat/completions")
///     .with_model("gpt-4o-mini");
/// assert!(config.is_enabled());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Chat completions URL; `None` disables the backend
    pub endpoint: Option<String>,
    /// Bearer token for the `Authorization` header
    pub api_key: Option<String>,
    /// Model name, omitted from the request when unset
    pub model: Option<String>,
    /// Connect timeout in seconds (default: 60)
    pub connect_timeout_secs: u64,
    /// Optional cap on bytes buffered behind a line that never parses
    pub max_pending_bytes: Option<usize>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            max_pending_bytes: None,
        }
    }
}

impl ChatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_max_pending_bytes(mut self, limit: usize) -> Self {
        self.max_pending_bytes = Some(limit);
        self
    }

    /// Whether a backend endpoint is configured.
    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Build config from `EXPO_CHAT_*` environment variables.
    ///
    /// Blank values count as unset. Unparsable numbers keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.endpoint = env_string(ENV_URL);
        config.api_key = env_string(ENV_API_KEY);
        config.model = env_string(ENV_MODEL);

        if let Some(secs) = env_parsed::<u64>(ENV_CONNECT_TIMEOUT_SECS) {
            config.connect_timeout_secs = secs;
        }
        config.max_pending_bytes = env_parsed::<usize>(ENV_MAX_PENDING_BYTES);

        config
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env_string(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}
