use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::forex::{ForexOperation, NewForexOperation};
use crate::models::investment::{InvestmentOperation, NewInvestment};
use crate::models::settings::Settings;
use crate::models::transaction::{NewTransaction, Transaction};
use crate::models::transfer::{NewTransfer, Transfer};
use super::{Store, StoreConnector, Table};

/// Connection parameters shared by every user session.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,

    /// Public anon key, sent as the `apikey` header
    pub anon_key: String,

    /// Postgres schema selected through the profile headers
    pub schema: String,
}

impl SupabaseConfig {
    pub fn new(url: &str, anon_key: &str, schema: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            schema: schema.to_string(),
        }
    }

    /// Connection parameters using the schema chosen in `settings`.
    pub fn from_settings(url: &str, anon_key: &str, settings: &Settings) -> Self {
        Self::new(url, anon_key, &settings.schema)
    }
}

/// Builds one HTTP client and hands out per-token stores that share it.
pub struct SupabaseConnector {
    client: Client,
    config: Arc<SupabaseConfig>,
}

impl SupabaseConnector {
    pub fn new(config: SupabaseConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            config: Arc::new(config),
        }
    }
}

impl StoreConnector for SupabaseConnector {
    fn connect(&self, access_token: &str) -> Arc<dyn Store> {
        Arc::new(SupabaseStore {
            client: self.client.clone(),
            config: Arc::clone(&self.config),
            access_token: access_token.to_string(),
        })
    }
}

/// PostgREST client for the record tables, acting as one user.
///
/// - **Reads**: `GET /rest/v1/{table}?select=*&order=date.asc`
/// - **Writes**: `POST /rest/v1/{table}` with `Prefer: return=representation`
///
/// Row-level security on the backend scopes every query to the token's user.
pub struct SupabaseStore {
    client: Client,
    config: Arc<SupabaseConfig>,
    access_token: String,
}

impl SupabaseStore {
    fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.config.anon_key)
            .bearer_auth(&self.access_token)
    }

    async fn select<T: DeserializeOwned>(&self, table: Table) -> Result<Vec<T>, CoreError> {
        let req = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "*"), ("order", "date.asc")])
            .header("Accept-Profile", &self.config.schema);

        let resp = self.authorized(req).send().await?;
        let resp = Self::check(table, resp).await?;

        let rows: Vec<T> = resp.json().await.map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse '{table}' rows: {e}"))
        })?;
        tracing::debug!(%table, rows = rows.len(), "fetched rows");
        Ok(rows)
    }

    async fn insert<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: Table,
        body: &B,
    ) -> Result<T, CoreError> {
        let req = self
            .client
            .post(self.table_url(table))
            .header("Content-Profile", &self.config.schema)
            .header("Prefer", "return=representation")
            .json(body);

        let resp = self.authorized(req).send().await?;
        let resp = Self::check(table, resp).await?;

        let mut rows: Vec<T> = resp.json().await.map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse inserted '{table}' row: {e}"))
        })?;
        if rows.is_empty() {
            return Err(CoreError::Store {
                table: table.to_string(),
                status: 200,
                message: "insert returned no row".into(),
            });
        }
        tracing::info!(%table, "inserted row");
        Ok(rows.swap_remove(0))
    }

    /// Map non-success statuses onto `CoreError`, keeping the body for the log.
    async fn check(table: Table, resp: Response) -> Result<Response, CoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        if status.as_u16() == 401 {
            return Err(CoreError::NotAuthenticated(format!(
                "'{table}' rejected the access token"
            )));
        }
        Err(CoreError::Store {
            table: table.to_string(),
            status: status.as_u16(),
            message: body,
        })
    }
}

#[async_trait]
impl Store for SupabaseStore {
    async fn list_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        self.select(Table::Transactions).await
    }

    async fn insert_transaction(&self, new: NewTransaction) -> Result<Transaction, CoreError> {
        self.insert(Table::Transactions, &new).await
    }

    async fn list_investments(&self) -> Result<Vec<InvestmentOperation>, CoreError> {
        self.select(Table::Investments).await
    }

    async fn insert_investment(&self, new: NewInvestment) -> Result<InvestmentOperation, CoreError> {
        self.insert(Table::Investments, &new).await
    }

    async fn list_forex(&self) -> Result<Vec<ForexOperation>, CoreError> {
        self.select(Table::Forex).await
    }

    async fn insert_forex(&self, new: NewForexOperation) -> Result<ForexOperation, CoreError> {
        self.insert(Table::Forex, &new).await
    }

    async fn list_transfers(&self) -> Result<Vec<Transfer>, CoreError> {
        self.select(Table::Transfers).await
    }

    async fn insert_transfer(&self, new: NewTransfer) -> Result<Transfer, CoreError> {
        self.insert(Table::Transfers, &new).await
    }
}
