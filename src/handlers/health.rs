use axum::extract::State;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::{CoffeeState, TriviaState};

fn healthy() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "status": "ok",
        "storage": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}

fn degraded(e: impl std::fmt::Display) -> ApiError {
    tracing::error!("Health check failed: {}", e);
    ApiError::service_unavailable("storage unavailable")
}

/// GET /health (trivia)
pub async fn trivia(State(state): State<TriviaState>) -> ApiResult<Value> {
    state.questions.ping().await.map_err(degraded)?;
    state.categories.ping().await.map_err(degraded)?;
    Ok(healthy())
}

/// GET /health (coffee)
pub async fn coffee(State(state): State<CoffeeState>) -> ApiResult<Value> {
    state.drinks.ping().await.map_err(degraded)?;
    Ok(healthy())
}
