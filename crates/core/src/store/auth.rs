use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::errors::CoreError;
use super::supabase::SupabaseConfig;

const PROVIDER: &str = "Supabase Auth";

/// The signed-in user as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Tokens returned by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Seconds until `access_token` expires
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: AuthUser,
}

/// Password sign-in and session checks.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), CoreError>;
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, CoreError>;
}

/// GoTrue endpoints under `{url}/auth/v1`.
pub struct SupabaseAuth {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseAuth {
    pub fn new(config: SupabaseConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url, path)
    }

    /// Credential and token rejections become `NotAuthenticated`; anything else is upstream trouble.
    async fn check(resp: Response) -> Result<Response, CoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        match status.as_u16() {
            400 | 401 | 403 | 422 => Err(CoreError::NotAuthenticated(body)),
            code => Err(CoreError::api(PROVIDER, format!("HTTP {code}: {body}"))),
        }
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[async_trait]
impl Authenticator for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError> {
        let resp = self
            .client
            .post(self.url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.config.anon_key)
            .json(&PasswordGrant { email, password })
            .send()
            .await?;
        let resp = Self::check(resp).await?;

        let session: Session = resp
            .json()
            .await
            .map_err(|e| CoreError::api(PROVIDER, format!("Failed to parse session: {e}")))?;
        tracing::info!(user = %session.user.id, "signed in");
        Ok(session)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), CoreError> {
        let resp = self
            .client
            .post(self.url("logout"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, CoreError> {
        let resp = self
            .client
            .get(self.url("user"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        let resp = Self::check(resp).await?;

        resp.json()
            .await
            .map_err(|e| CoreError::api(PROVIDER, format!("Failed to parse user: {e}")))
    }
}
