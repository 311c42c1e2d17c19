//! Client configuration read from the environment.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl ClientConfig {
    /// Reads `TODOLIST_API_URL` and `TODOLIST_API_KEY`. Unset or empty
    /// variables fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            base_url: non_empty("TODOLIST_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: non_empty("TODOLIST_API_KEY"),
        }
    }
}
