//! HTTP clients for the hosted backend: the identity endpoint that resolves
//! the current session and the relational endpoint holding profile rows.
//! Both are thin pass-throughs; all session and row storage is owned by the
//! backend. A timeout or 5xx is surfaced as a typed failure, never as
//! "absent" or "no role".

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::error;

use crate::config::Config;
use crate::identity::{
    AccessError, IdentityService, Principal, ProfileStore, RequestContext, Role,
};

/// Shared reqwest client honoring the configured per-request timeout.
pub fn http_client(cfg: &Config) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(cfg.request_timeout)
        .build()?;
    Ok(client)
}

#[derive(Debug, Deserialize)]
struct BackendUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Client for `GET {base}/auth/v1/user`, authenticated with the caller's
/// bearer token.
#[derive(Clone)]
pub struct BackendIdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BackendIdentityClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(http: reqwest::Client, cfg: &Config) -> Self {
        Self::new(http, cfg.backend_url.clone(), cfg.backend_key.clone())
    }
}

#[async_trait]
impl IdentityService for BackendIdentityClient {
    async fn current_principal(
        &self,
        ctx: &RequestContext,
    ) -> Result<Option<Principal>, AccessError> {
        // No token means no session; not worth a round trip.
        let Some(token) = ctx.access_token.as_deref() else {
            return Ok(None);
        };
        let url = format!("{}/auth/v1/user", self.base_url);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| AccessError::IdentityUnavailable(e.to_string()))?;
        match resp.status() {
            // Expired or bogus token: a normal anonymous outcome
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            s if s.is_success() => {
                let user: BackendUser = resp
                    .json()
                    .await
                    .map_err(|e| AccessError::IdentityUnavailable(e.to_string()))?;
                Ok(Some(Principal {
                    id: user.id,
                    email: user.email,
                }))
            }
            s => {
                error!("identity service returned {}", s);
                Err(AccessError::IdentityUnavailable(format!("status {}", s)))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    #[serde(default)]
    role: Option<String>,
}

/// Client for the profile table, queried by exact principal-id match:
/// `GET {base}/rest/v1/profiles?id=eq.{pid}&select=role`.
#[derive(Clone)]
pub struct BackendProfileClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BackendProfileClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(http: reqwest::Client, cfg: &Config) -> Self {
        Self::new(http, cfg.backend_url.clone(), cfg.backend_key.clone())
    }
}

#[async_trait]
impl ProfileStore for BackendProfileClient {
    async fn role_for(&self, principal_id: &str) -> Result<Option<Role>, AccessError> {
        let url = format!("{}/rest/v1/profiles", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[
                ("id", format!("eq.{}", principal_id)),
                ("select", "role".to_string()),
            ])
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| AccessError::ProfileLookupFailed(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            error!("profile store returned {}", status);
            return Err(AccessError::ProfileLookupFailed(format!("status {}", status)));
        }
        let rows: Vec<ProfileRow> = resp
            .json()
            .await
            .map_err(|e| AccessError::ProfileLookupFailed(e.to_string()))?;
        // At most one row per principal; missing rows and values outside the
        // role set both resolve to None
        Ok(rows
            .into_iter()
            .next()
            .and_then(|r| r.role)
            .and_then(|s| Role::parse(&s)))
    }
}
