use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::quote::ExchangeRate;
use super::traits::ExchangeRateProvider;

const PROVIDER: &str = "DolarApi";

/// Regional exchange listing: buy/sell quotes of the dollar per exchange
/// house ("oficial", "blue", "bolsa", "contadoconliqui", ...), in pesos.
///
/// - **Free**: No API key.
/// - **Endpoint**: `{base}/v1/dolares`
pub struct DolarApiProvider {
    client: Client,
    base_url: String,
}

impl DolarApiProvider {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

// ── DolarApi response types ─────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DolarEntry {
    moneda: String,
    casa: String,
    nombre: String,
    compra: Option<f64>,
    venta: Option<f64>,
    fecha_actualizacion: Option<DateTime<Utc>>,
}

impl From<DolarEntry> for ExchangeRate {
    fn from(e: DolarEntry) -> Self {
        ExchangeRate {
            name: e.nombre,
            house: e.casa,
            currency: e.moneda.to_uppercase(),
            quote_currency: "ARS".to_string(),
            buy: e.compra,
            sell: e.venta,
            updated_at: e.fecha_actualizacion,
        }
    }
}

#[async_trait]
impl ExchangeRateProvider for DolarApiProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn list_rates(&self) -> Result<Vec<ExchangeRate>, CoreError> {
        let url = format!("{}/v1/dolares", self.base_url);
        let entries: Vec<DolarEntry> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::api(PROVIDER, format!("Failed to parse listing: {e}")))?;

        if entries.is_empty() {
            return Err(CoreError::api(PROVIDER, "Empty listing"));
        }

        Ok(entries.into_iter().map(ExchangeRate::from).collect())
    }
}
