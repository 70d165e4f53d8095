use std::env;

use finmate_core::models::settings::Settings;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_schema: String,
    pub default_currency: String,
    pub exchange_api_url: String,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
    pub coincap_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let supabase_url = var("SUPABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("SUPABASE_URL must be set"))?;
        let supabase_anon_key = var("SUPABASE_ANON_KEY")
            .ok_or_else(|| anyhow::anyhow!("SUPABASE_ANON_KEY must be set"))?;
        let port: u16 = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a port number, got '{raw}'"))?,
            None => 3000,
        };

        Ok(Self {
            port,
            supabase_url,
            supabase_anon_key,
            supabase_schema: var("SUPABASE_SCHEMA").unwrap_or_else(|| "public".to_string()),
            default_currency: var("DEFAULT_CURRENCY")
                .unwrap_or_else(|| "USD".to_string())
                .to_uppercase(),
            exchange_api_url: var("EXCHANGE_API_URL")
                .unwrap_or_else(|| "https://dolarapi.com".to_string()),
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            coincap_api_key: var("COINCAP_API_KEY"),
        })
    }

    /// Core settings derived from the environment.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings {
            default_currency: self.default_currency.clone(),
            schema: self.supabase_schema.clone(),
            exchange_api_url: self.exchange_api_url.clone(),
            ..Settings::default()
        };
        if let Some(key) = &self.coincap_api_key {
            settings.api_keys.insert("coincap".to_string(), key.clone());
        }
        settings
    }
}

/// Comma-separated origins, blanks dropped.
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
