use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn_with_state, map_response},
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{coffee::drinks, health, trivia};
use crate::middleware::{authorize, envelope_method_not_allowed, not_found, RequirePermission};
use crate::state::{CoffeeState, TriviaState};

pub fn trivia_app(state: TriviaState, security: &SecurityConfig) -> Router {
    use trivia::{categories, questions, quizzes};

    Router::new()
        .route("/categories", get(categories::list))
        .route("/categories/:id/questions", get(categories::questions))
        .route("/questions", get(questions::list).post(questions::create))
        .route("/questions/:id", delete(questions::delete))
        .route("/questions/search", post(questions::search))
        .route("/quizzes", post(quizzes::play))
        .route("/health", get(health::trivia))
        .fallback(not_found)
        .with_state(state)
        .layer(map_response(envelope_method_not_allowed))
        .layer(cors_layer(security))
        .layer(TraceLayer::new_for_http())
}

pub fn coffee_app(state: CoffeeState, security: &SecurityConfig) -> Router {
    let gate = state.gate.clone();

    Router::new()
        .route(
            "/drinks",
            get(drinks::list).merge(
                post(drinks::create)
                    .route_layer(from_fn_with_state(RequirePermission::new(&gate, "post:drinks"), authorize)),
            ),
        )
        .route(
            "/drinks-detail",
            get(drinks::detail)
                .route_layer(from_fn_with_state(RequirePermission::new(&gate, "get:drinks-detail"), authorize)),
        )
        .route(
            "/drinks/:id",
            patch(drinks::update)
                .route_layer(from_fn_with_state(RequirePermission::new(&gate, "patch:drinks"), authorize))
                .merge(
                    delete(drinks::delete)
                        .route_layer(from_fn_with_state(RequirePermission::new(&gate, "delete:drinks"), authorize)),
                ),
        )
        .route("/health", get(health::coffee))
        .fallback(not_found)
        .with_state(state)
        .layer(map_response(envelope_method_not_allowed))
        .layer(cors_layer(security))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins = if security.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            security
                .cors_origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([Method::GET, Method::PATCH, Method::POST, Method::DELETE, Method::OPTIONS])
}
