use std::env;

use crate::error::{Error, Result};

/// Environment variable holding the OpenWeatherMap API key.
pub const API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Runtime configuration, read once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// The binary loads `.env` into the environment before calling this, so
    /// keys in a local `.env` file are picked up too.
    pub fn from_env() -> Result<Self> {
        Self::from_api_key(env::var(API_KEY_VAR).ok())
    }

    fn from_api_key(raw: Option<String>) -> Result<Self> {
        match raw {
            Some(api_key) if !api_key.trim().is_empty() => Ok(Self { api_key }),
            _ => Err(Error::MissingApiKey),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_rejected() {
        let err = Config::from_api_key(None).unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
        assert!(err.to_string().contains(API_KEY_VAR));
    }

    #[test]
    fn blank_key_is_rejected() {
        let err = Config::from_api_key(Some("   ".to_string())).unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }

    #[test]
    fn present_key_is_loaded() {
        let cfg = Config::from_api_key(Some("OPEN_KEY".to_string())).expect("key must be accepted");
        assert_eq!(cfg.api_key, "OPEN_KEY");
    }
}
