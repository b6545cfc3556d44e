//! Chat API configuration parsed from environment variables.

pub const DEFAULT_API_BASE_URL: &str = "https://wonchulhee-korean-law-chatbot.hf.space";

/// Errors produced while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {var}={value:?} is not a whole number of seconds")]
    InvalidSeconds { var: &'static str, value: String },
}

/// Optional client timeouts. `None` leaves the HTTP client's default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatTimeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub base_url: String,
    pub timeouts: ChatTimeouts,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_string(), timeouts: ChatTimeouts::default() }
    }
}

impl ChatConfig {
    /// Build config from environment variables. All are optional:
    /// - `LAWCHAT_API_BASE_URL`: default [`DEFAULT_API_BASE_URL`]
    /// - `LAWCHAT_REQUEST_TIMEOUT_SECS`: unset means no explicit timeout
    /// - `LAWCHAT_CONNECT_TIMEOUT_SECS`: unset means no explicit timeout
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSeconds`] if a timeout is set but not a
    /// non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("LAWCHAT_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let timeouts = ChatTimeouts {
            request_secs: env_parse_secs("LAWCHAT_REQUEST_TIMEOUT_SECS")?,
            connect_secs: env_parse_secs("LAWCHAT_CONNECT_TIMEOUT_SECS")?,
        };
        Ok(Self::default().with_base_url(&base_url).with_timeouts(timeouts))
    }

    /// Replace the base URL, dropping any trailing `/`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: ChatTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

fn env_parse_secs(var: &'static str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(var) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidSeconds { var, value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
