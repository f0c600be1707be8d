#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use fsnd_api::app::{coffee_app, trivia_app};
use fsnd_api::auth::{AuthGate, AuthSettings, KeySetCache, KeySource, StaticKeySource};
use fsnd_api::config::SecurityConfig;
use fsnd_api::database::models::{Category, Drink, Question};
use fsnd_api::database::{seed, MemoryStore};
use fsnd_api::state::{CoffeeState, TriviaState};

pub const ISSUER: &str = "https://fsnd-test.example.com/";
pub const AUDIENCE: &str = "https://coffee-api/";
pub const KID: &str = "test-key-1";

pub const JWKS: &str = include_str!("../fixtures/jwks.json");
const SIGNING_KEY: &[u8] = include_bytes!("../fixtures/test_key.pem");

pub const PER_PAGE: usize = 10;

fn security() -> SecurityConfig {
    SecurityConfig {
        cors_origins: vec!["*".to_string()],
    }
}

/// Trivia router over seeded in-memory stores
pub fn trivia() -> Router {
    trivia_app(
        TriviaState {
            questions: Arc::new(MemoryStore::<Question>::seeded(seed::questions())),
            categories: Arc::new(MemoryStore::<Category>::seeded(seed::categories())),
            questions_per_page: PER_PAGE,
        },
        &security(),
    )
}

/// Coffee router over a seeded in-memory store, trusting the fixture key set
pub fn coffee() -> Router {
    coffee_with_keys(Arc::new(StaticKeySource::from_json(JWKS).expect("fixture jwks")))
}

/// Coffee router whose gate resolves signing keys from `source`
pub fn coffee_with_keys(source: Arc<dyn KeySource>) -> Router {
    let settings = AuthSettings {
        issuer: ISSUER.to_string(),
        audience: AUDIENCE.to_string(),
        algorithms: vec![Algorithm::RS256],
    };
    let gate = Arc::new(AuthGate::new(settings, KeySetCache::new(source)));

    coffee_app(
        CoffeeState {
            drinks: Arc::new(MemoryStore::<Drink>::seeded(seed::drinks())),
            gate,
        },
        &security(),
    )
}

/// RS256 token signed with the fixture key; `exp_offset` is relative to now
pub fn token(permissions: &[&str], exp_offset: i64) -> String {
    sign(&claims(permissions, exp_offset))
}

pub fn claims(permissions: &[&str], exp_offset: i64) -> Value {
    let now = chrono::Utc::now().timestamp();
    json!({
        "sub": "auth0|integration",
        "iss": ISSUER,
        "aud": AUDIENCE,
        "iat": now,
        "exp": now + exp_offset,
        "permissions": permissions,
    })
}

/// Sign arbitrary claims with the fixture key under `KID`
pub fn sign(claims: &Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(KID.to_string());
    encode(&header, claims, &EncodingKey::from_rsa_pem(SIGNING_KEY).expect("fixture key")).expect("sign token")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Drive one request through the router and decode the JSON body
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await.context("router failed")?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body for {}", uri))?
    };

    Ok(TestResponse { status, body })
}

pub async fn get(app: &Router, uri: &str) -> Result<TestResponse> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> Result<TestResponse> {
    send(app, Method::POST, uri, Some(body), None).await
}

/// Assert the error envelope and its status
pub fn assert_error(res: &TestResponse, status: u16) {
    assert_eq!(res.status.as_u16(), status, "unexpected status, body: {}", res.body);
    assert_eq!(res.body["success"], json!(false));
    assert_eq!(res.body["error"], json!(status));
    assert!(res.body["message"].is_string(), "missing message: {}", res.body);
}
