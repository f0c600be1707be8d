pub mod jwks;

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AuthConfig;

pub use jwks::{HttpKeySource, KeySetCache, KeySetError, KeySource, StaticKeySource};

/// Why a request was refused. Each step of the gate has its own kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0}")]
    AuthHeader(String),

    #[error("{0}")]
    InvalidToken(String),

    #[error("{0}")]
    InvalidKey(String),

    #[error("{0}")]
    InvalidClaims(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("{0}")]
    MalformedClaims(String),

    #[error("Permission '{0}' not found in token")]
    Forbidden(String),

    #[error("Signing keys unavailable: {0}")]
    KeySetUnavailable(String),
}

impl AuthError {
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::AuthHeader(_) => 400,
            AuthError::InvalidToken(_) => 400,
            AuthError::InvalidKey(_) => 400,
            AuthError::InvalidClaims(_) => 401,
            AuthError::ExpiredToken => 401,
            AuthError::MalformedClaims(_) => 400,
            AuthError::Forbidden(_) => 403,
            AuthError::KeySetUnavailable(_) => 503,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::AuthHeader(_) => "invalid_header",
            AuthError::InvalidToken(_) => "invalid_token",
            AuthError::InvalidKey(_) => "invalid_key",
            AuthError::InvalidClaims(_) => "invalid_claims",
            AuthError::ExpiredToken => "token_expired",
            AuthError::MalformedClaims(_) => "malformed_claims",
            AuthError::Forbidden(_) => "forbidden",
            AuthError::KeySetUnavailable(_) => "key_set_unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

/// Verified token claims, alive for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub iss: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<BTreeSet<String>>,
}

/// Expected issuer, audience and accepted algorithms
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub issuer: String,
    pub audience: String,
    pub algorithms: Vec<Algorithm>,
}

impl AuthSettings {
    pub fn from_config(config: &AuthConfig) -> Result<Self, jsonwebtoken::errors::Error> {
        let algorithms = config
            .algorithms
            .iter()
            .map(|name| Algorithm::from_str(name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            issuer: config.issuer(),
            audience: config.audience.clone(),
            algorithms,
        })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.algorithms.first().copied().unwrap_or(Algorithm::RS256));
        if !self.algorithms.is_empty() {
            validation.algorithms = self.algorithms.clone();
        }
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = 0;
        validation
    }
}

/// Validates bearer tokens against the identity provider's keys and
/// enforces a required permission string.
pub struct AuthGate {
    settings: AuthSettings,
    keys: KeySetCache,
}

impl AuthGate {
    pub fn new(settings: AuthSettings, keys: KeySetCache) -> Self {
        Self { settings, keys }
    }

    /// Build the gate from configuration, preferring an on-disk key set
    pub fn from_config(config: &AuthConfig) -> anyhow::Result<Self> {
        let settings = AuthSettings::from_config(config)?;

        let source: Arc<dyn KeySource> = match &config.jwks_file {
            Some(path) => Arc::new(StaticKeySource::from_file(path)?),
            None => Arc::new(HttpKeySource::new(
                config.jwks_url(),
                Duration::from_secs(config.jwks_fetch_timeout_secs),
            )?),
        };
        let keys = KeySetCache::new(source).with_attempts(config.jwks_fetch_attempts);

        Ok(Self::new(settings, keys))
    }

    /// Run the full check: header, structure, key, signature and claims, permission
    pub async fn authorize(&self, headers: &HeaderMap, permission: &str) -> Result<Claims, AuthError> {
        let token = bearer_token(headers)?;
        let claims = self.verify(token).await?;
        check_permission(&claims, permission)?;
        Ok(claims)
    }

    /// Decode and verify a raw token without any permission requirement
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        if token.split('.').count() != 3 {
            return Err(AuthError::InvalidToken("Token must have three parts".to_string()));
        }

        let header = decode_header(token)
            .map_err(|e| AuthError::InvalidToken(format!("Unable to parse authentication token: {}", e)))?;

        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidKey("Token header has no key id".to_string()))?;

        let jwk = self.keys.resolve(&kid).await?;
        let key = DecodingKey::from_jwk(&jwk)
            .map_err(|e| AuthError::InvalidKey(format!("Unusable signing key '{}': {}", kid, e)))?;

        let data = decode::<Claims>(token, &key, &self.settings.validation()).map_err(classify)?;
        Ok(data.claims)
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        ErrorKind::InvalidSignature => AuthError::InvalidClaims("Token signature is invalid".to_string()),
        ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
            AuthError::InvalidClaims("Incorrect claims. Please check the audience and issuer".to_string())
        }
        ErrorKind::MissingRequiredClaim(claim) => AuthError::InvalidClaims(format!("Missing required claim '{}'", claim)),
        ErrorKind::ImmatureSignature | ErrorKind::InvalidAlgorithm | ErrorKind::InvalidSubject => {
            AuthError::InvalidClaims(err.to_string())
        }
        ErrorKind::Json(_) => AuthError::MalformedClaims(format!("Claims do not have the expected shape: {}", err)),
        ErrorKind::InvalidKeyFormat | ErrorKind::InvalidRsaKey(_) | ErrorKind::InvalidEcdsaKey => {
            AuthError::InvalidKey(err.to_string())
        }
        _ => AuthError::InvalidToken(format!("Unable to parse authentication token: {}", err)),
    }
}

/// Extract the token from exactly one `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let mut values = headers.get_all(AUTHORIZATION).iter();
    let value = values
        .next()
        .ok_or_else(|| AuthError::AuthHeader("Authorization header is expected".to_string()))?;
    if values.next().is_some() {
        return Err(AuthError::AuthHeader("Only one Authorization header is allowed".to_string()));
    }

    let value = value
        .to_str()
        .map_err(|_| AuthError::AuthHeader("Authorization header is not valid text".to_string()))?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        (Some(scheme), _, _) if !scheme.eq_ignore_ascii_case("bearer") => Err(AuthError::AuthHeader(
            "Authorization header must start with \"Bearer\"".to_string(),
        )),
        (Some(_), None, _) => Err(AuthError::AuthHeader("Token not found".to_string())),
        _ => Err(AuthError::AuthHeader("Authorization header must be bearer token".to_string())),
    }
}

pub fn check_permission(claims: &Claims, permission: &str) -> Result<(), AuthError> {
    let permissions = claims
        .permissions
        .as_ref()
        .ok_or_else(|| AuthError::MalformedClaims("Permissions not included in token".to_string()))?;

    if permissions.contains(permission) {
        Ok(())
    } else {
        Err(AuthError::Forbidden(permission.to_string()))
    }
}
