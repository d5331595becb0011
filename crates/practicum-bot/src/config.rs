//! Environment-sourced settings for the watcher.

use std::env;

use thiserror::Error;

/// Environment variable holding the Practicum API OAuth token.
pub const PRACTICUM_TOKEN_ENV: &str = "PRACTICUM_TOKEN";
/// Environment variable holding the Practicum API base URL.
pub const PRACTICUM_API_URL_ENV: &str = "PRACTICUM_API_URL";
/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_TOKEN";
/// Environment variable holding the target chat id.
pub const TELEGRAM_CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Errors raised while assembling [`Settings`].
///
/// Unlike everything else in this crate, these are fatal: the process
/// refuses to start without a complete configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required variables are unset or empty.
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),

    /// The chat id is not an integer Telegram chat identifier.
    #[error("TELEGRAM_CHAT_ID must be an integer chat id, got `{0}`")]
    InvalidChatId(String),
}

/// Startup configuration, read from the process environment exactly once.
///
/// Components receive the resolved values from here; nothing touches the
/// environment after startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// OAuth token for the Practicum API.
    pub practicum_token: String,
    /// Base URL of the Practicum API.
    pub practicum_api_url: String,
    /// Telegram bot token.
    pub telegram_token: String,
    /// Chat that receives every notification.
    pub telegram_chat_id: i64,
}

impl Settings {
    /// Reads and validates all required variables.
    ///
    /// Every missing or empty name is collected before failing, so one
    /// restart fixes the whole environment instead of revealing one
    /// variable per attempt.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let practicum_token = require(PRACTICUM_TOKEN_ENV, &mut missing);
        let practicum_api_url = require(PRACTICUM_API_URL_ENV, &mut missing);
        let telegram_token = require(TELEGRAM_TOKEN_ENV, &mut missing);
        let chat_id_raw = require(TELEGRAM_CHAT_ID_ENV, &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let telegram_chat_id = chat_id_raw
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidChatId(chat_id_raw.clone()))?;

        Ok(Self {
            practicum_token,
            practicum_api_url,
            telegram_token,
            telegram_chat_id,
        })
    }
}

/// Reads one variable, recording its name when unset or blank.
fn require(name: &str, missing: &mut Vec<String>) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            missing.push(name.to_string());
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_distinguishes_set_and_blank() {
        // Unique names so parallel tests cannot interfere.
        env::set_var("PRACTICUM_WATCH_TEST_SET", "value");
        env::set_var("PRACTICUM_WATCH_TEST_BLANK", "   ");
        env::remove_var("PRACTICUM_WATCH_TEST_UNSET");

        let mut missing = Vec::new();
        assert_eq!(require("PRACTICUM_WATCH_TEST_SET", &mut missing), "value");
        assert!(missing.is_empty());

        require("PRACTICUM_WATCH_TEST_BLANK", &mut missing);
        require("PRACTICUM_WATCH_TEST_UNSET", &mut missing);
        assert_eq!(
            missing,
            vec!["PRACTICUM_WATCH_TEST_BLANK", "PRACTICUM_WATCH_TEST_UNSET"]
        );
    }

    // One test drives every from_env state so the canonical variable
    // names are never mutated from two tests at once.
    #[test]
    fn test_from_env_states() {
        for name in [
            PRACTICUM_TOKEN_ENV,
            PRACTICUM_API_URL_ENV,
            TELEGRAM_TOKEN_ENV,
            TELEGRAM_CHAT_ID_ENV,
        ] {
            env::remove_var(name);
        }

        match Settings::from_env() {
            Err(ConfigError::Missing(names)) => assert_eq!(
                names,
                vec![
                    PRACTICUM_TOKEN_ENV,
                    PRACTICUM_API_URL_ENV,
                    TELEGRAM_TOKEN_ENV,
                    TELEGRAM_CHAT_ID_ENV,
                ]
            ),
            other => panic!("expected all names to be reported, got {other:?}"),
        }

        env::set_var(PRACTICUM_TOKEN_ENV, "practicum-token");
        env::set_var(PRACTICUM_API_URL_ENV, "https://practicum.example/api/");
        env::set_var(TELEGRAM_TOKEN_ENV, "telegram-token");
        env::set_var(TELEGRAM_CHAT_ID_ENV, "not-a-number");

        match Settings::from_env() {
            Err(ConfigError::InvalidChatId(raw)) => assert_eq!(raw, "not-a-number"),
            other => panic!("expected chat id rejection, got {other:?}"),
        }

        env::set_var(TELEGRAM_CHAT_ID_ENV, "-1001234567890");

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.practicum_token, "practicum-token");
        assert_eq!(settings.practicum_api_url, "https://practicum.example/api/");
        assert_eq!(settings.telegram_token, "telegram-token");
        assert_eq!(settings.telegram_chat_id, -1_001_234_567_890);

        for name in [
            PRACTICUM_TOKEN_ENV,
            PRACTICUM_API_URL_ENV,
            TELEGRAM_TOKEN_ENV,
            TELEGRAM_CHAT_ID_ENV,
        ] {
            env::remove_var(name);
        }
    }
}
