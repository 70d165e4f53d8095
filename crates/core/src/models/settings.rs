use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Runtime settings for the core: display currency, hosted schema, provider keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The currency dashboards default to when none is requested (e.g., "ARS", "USD").
    pub default_currency: String,

    /// Database schema the hosted store reads from and writes to.
    pub schema: String,

    /// Base URL of the regional exchange listing API.
    pub exchange_api_url: String,

    /// Optional API keys for providers that accept them.
    /// Keys: provider name (e.g., "coincap"). Values: the API key string.
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            schema: "public".to_string(),
            exchange_api_url: "https://dolarapi.com".to_string(),
            api_keys: HashMap::new(),
        }
    }
}
