use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::AuthError;

#[derive(Debug, Clone, Error)]
pub enum KeySetError {
    #[error("key set request failed: {0}")]
    Request(String),

    #[error("invalid key set: {0}")]
    Invalid(String),
}

/// Where the identity provider publishes its signing keys
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn fetch(&self) -> Result<JwkSet, KeySetError>;
}

/// Fetches `/.well-known/jwks.json` from the identity provider
pub struct HttpKeySource {
    client: reqwest::Client,
    url: String,
}

impl HttpKeySource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, KeySetError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| KeySetError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl KeySource for HttpKeySource {
    async fn fetch(&self) -> Result<JwkSet, KeySetError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| KeySetError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| KeySetError::Request(e.to_string()))?;

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| KeySetError::Invalid(e.to_string()))
    }
}

/// A fixed key set, e.g. loaded from disk for offline deployments
pub struct StaticKeySource {
    keys: JwkSet,
}

impl StaticKeySource {
    pub fn new(keys: JwkSet) -> Self {
        Self { keys }
    }

    pub fn from_json(json: &str) -> Result<Self, KeySetError> {
        let keys = serde_json::from_str(json).map_err(|e| KeySetError::Invalid(e.to_string()))?;
        Ok(Self::new(keys))
    }

    pub fn from_file(path: &Path) -> Result<Self, KeySetError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| KeySetError::Invalid(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn fetch(&self) -> Result<JwkSet, KeySetError> {
        Ok(self.keys.clone())
    }
}

/// Process-scoped cache of the published key set.
///
/// Populated lazily on first use and refreshed only when a token names a
/// `kid` that is not in the cached set. Concurrent first lookups may each
/// fetch; the last writer wins and every writer stores a complete set.
pub struct KeySetCache {
    source: Arc<dyn KeySource>,
    attempts: u32,
    retry_delay: Duration,
    keys: RwLock<Option<Arc<JwkSet>>>,
}

impl KeySetCache {
    pub fn new(source: Arc<dyn KeySource>) -> Self {
        Self {
            source,
            attempts: 1,
            retry_delay: Duration::from_millis(250),
            keys: RwLock::new(None),
        }
    }

    /// Total fetch attempts per refresh. Values below one are treated as one.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub async fn resolve(&self, kid: &str) -> Result<Jwk, AuthError> {
        if let Some(keys) = self.keys.read().await.as_ref() {
            if let Some(jwk) = keys.find(kid) {
                return Ok(jwk.clone());
            }
        }

        let keys = self.refresh().await?;
        keys.find(kid)
            .cloned()
            .ok_or_else(|| AuthError::InvalidKey(format!("Unable to find the appropriate key '{}'", kid)))
    }

    async fn refresh(&self) -> Result<Arc<JwkSet>, AuthError> {
        let mut attempt = 1;
        loop {
            match self.source.fetch().await {
                Ok(set) => {
                    let set = Arc::new(set);
                    *self.keys.write().await = Some(Arc::clone(&set));
                    info!(keys = set.keys.len(), "Refreshed signing key set");
                    return Ok(set);
                }
                Err(e) if attempt < self.attempts => {
                    warn!(attempt, "Signing key fetch failed, retrying: {}", e);
                    attempt += 1;
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => {
                    warn!(attempt, "Signing key fetch failed: {}", e);
                    return Err(AuthError::KeySetUnavailable(e.to_string()));
                }
            }
        }
    }
}
