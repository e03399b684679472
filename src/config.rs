//! Configuration types for feed-comments

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path, time::Duration};

/// Localization key for the comments screen title
pub const COMMENTS_VIEW_TITLE_KEY: &str = "COMMENTS_VIEW_TITLE";

/// Localization key for the message shown when loading fails
pub const COMMENTS_VIEW_CONNECTION_ERROR_KEY: &str = "COMMENTS_VIEW_CONNECTION_ERROR";

/// Main configuration for feed-comments
///
/// Every field has a default, so an empty JSON object is a valid config.
///
/// # Examples
///
/// ```
/// use feed_comments::config::Config;
///
/// let config = Config::from_json_str(r#"{ "http": { "timeout": 10 } }"#).unwrap();
/// assert_eq!(config.http.timeout.as_secs(), 10);
/// assert_eq!(config.localization.string("COMMENTS_VIEW_TITLE"), "Comments");
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// User-facing strings
    #[serde(default)]
    pub localization: LocalizationConfig,
}

impl Config {
    /// Parse and validate a JSON configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or under the same
    /// conditions as [`Config::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Check that every value is usable
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout.is_zero() {
            return Err(Error::Config {
                message: "timeout must be greater than zero".to_string(),
                key: Some("http.timeout".to_string()),
            });
        }

        if self.http.user_agent.trim().is_empty() {
            return Err(Error::Config {
                message: "user agent must not be empty".to_string(),
                key: Some("http.user_agent".to_string()),
            });
        }

        Ok(())
    }
}

/// HTTP transport configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request (default: "feed-comments/<version>")
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Localized strings keyed by fixed localization keys
///
/// Lookups fall back to the built-in English string, then to the key itself.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LocalizationConfig {
    /// Overrides for the built-in strings
    #[serde(default)]
    pub strings: HashMap<String, String>,
}

impl LocalizationConfig {
    /// Look up the string for `key`
    pub fn string(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .or_else(|| default_string(key).map(str::to_string))
            .unwrap_or_else(|| key.to_string())
    }
}

fn default_string(key: &str) -> Option<&'static str> {
    match key {
        COMMENTS_VIEW_TITLE_KEY => Some("Comments"),
        COMMENTS_VIEW_CONNECTION_ERROR_KEY => Some("Couldn't connect to server"),
        _ => None,
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("feed-comments/{}", env!("CARGO_PKG_VERSION"))
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
