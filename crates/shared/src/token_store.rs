//! Expiring credentials for the integrations that need them, kept in a small
//! JSON file between runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::error::{DigestError, Result};
use crate::http;

/// An upstream whose requests need an expiring access token.
///
/// Stored under its integer id so files written by older deployments still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Integration {
    Reddit,
}

impl Integration {
    pub const ALL: [Integration; 1] = [Integration::Reddit];

    pub fn api_name(self) -> &'static str {
        match self {
            Integration::Reddit => "reddit",
        }
    }
}

impl From<Integration> for u8 {
    fn from(integration: Integration) -> Self {
        match integration {
            Integration::Reddit => 0,
        }
    }
}

impl TryFrom<u8> for Integration {
    type Error = String;

    fn try_from(id: u8) -> std::result::Result<Self, Self::Error> {
        match id {
            0 => Ok(Integration::Reddit),
            other => Err(format!("unknown integration id {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub api: String,
    pub access_token: String,
    pub token_type: String,
    /// Unix seconds.
    pub expires_at: i64,
}

impl Credential {
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

/// Client-credentials grant as returned by the token endpoint.
#[derive(Debug, Deserialize)]
struct AccessGrant {
    access_token: String,
    token_type: String,
    expires_in: i64,
    #[serde(default)]
    #[allow(dead_code)]
    scope: Option<String>,
}

/// Performs the integration-specific token exchange.
pub struct Authenticator {
    client: Client,
    reddit_token_url: Url,
    reddit_client_id: String,
    reddit_client_secret: String,
}

impl Authenticator {
    pub fn new(
        client: Client,
        reddit_token_url: Url,
        reddit_client_id: String,
        reddit_client_secret: String,
    ) -> Self {
        Self {
            client,
            reddit_token_url,
            reddit_client_id,
            reddit_client_secret,
        }
    }

    /// Exchanges client identity for a fresh credential that expires `expires_in`
    /// seconds after `now`.
    pub async fn exchange(&self, integration: Integration, now: i64) -> Result<Credential> {
        match integration {
            Integration::Reddit => {
                let request = self
                    .client
                    .post(self.reddit_token_url.clone())
                    .basic_auth(&self.reddit_client_id, Some(&self.reddit_client_secret))
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .header("Accept", "application/json")
                    .body("grant_type=client_credentials&scope=read");

                let grant: AccessGrant = http::fetch_json(request, "reddit token").await?;
                let expires_at = expiry(now, grant.expires_in).ok_or(DigestError::InvalidLifetime {
                    endpoint: "reddit token".to_string(),
                    expires_in: grant.expires_in,
                })?;
                info!(expires_in = grant.expires_in, "refreshed reddit credential");

                Ok(Credential {
                    api: integration.api_name().to_string(),
                    access_token: grant.access_token,
                    token_type: grant.token_type,
                    expires_at,
                })
            }
        }
    }
}

/// Absolute expiry for a grant lasting `expires_in` seconds, or `None` when the
/// lifetime is not positive or does not fit.
fn expiry(now: i64, expires_in: i64) -> Option<i64> {
    if expires_in <= 0 {
        return None;
    }
    now.checked_add(expires_in)
}

/// Owns the credential set and the file it lives in.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
    tokens: BTreeMap<Integration, Credential>,
}

impl TokenStore {
    /// Reads the store at `path`. A missing or unreadable file yields an empty set.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tokens = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(tokens) => tokens,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "credential store is corrupt, refreshing all tokens");
                    BTreeMap::new()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to open credential store, refreshing all tokens");
                BTreeMap::new()
            }
        };

        Self { path, tokens }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, integration: Integration) -> Option<&Credential> {
        self.tokens.get(&integration)
    }

    pub fn insert(&mut self, integration: Integration, credential: Credential) {
        self.tokens.insert(integration, credential);
    }

    /// Returns a credential for `integration` that is still valid at `now`,
    /// exchanging for a new one first if it is missing or expired.
    pub async fn get_valid(
        &mut self,
        integration: Integration,
        auth: &Authenticator,
        now: i64,
    ) -> Result<Credential> {
        if let Some(credential) = self.tokens.get(&integration) {
            if !credential.is_expired(now) {
                return Ok(credential.clone());
            }
        }

        info!(api = integration.api_name(), "refreshing credential");
        let credential = auth.exchange(integration, now).await?;
        self.tokens.insert(integration, credential.clone());
        Ok(credential)
    }

    /// Brings every managed integration up to date, then writes the full set
    /// back even when nothing changed.
    pub async fn refresh_all(&mut self, auth: &Authenticator, now: i64) -> Result<()> {
        for integration in Integration::ALL {
            self.get_valid(integration, auth, now).await?;
        }
        self.persist()
    }

    pub fn persist(&self) -> Result<()> {
        let contents = serde_json::to_string(&self.tokens).map_err(DigestError::Serialize)?;
        fs::write(&self.path, contents).map_err(|source| DigestError::Store {
            path: self.path.clone(),
            source,
        })
    }
}

pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}
