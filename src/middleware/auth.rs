use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthGate, Claims};
use crate::error::ApiError;

/// Authenticated caller, inserted into request extensions once the gate passes
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub subject: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
        }
    }
}

/// State for one guarded route: the shared gate plus the permission it demands
#[derive(Clone)]
pub struct RequirePermission {
    gate: Arc<AuthGate>,
    permission: &'static str,
}

impl RequirePermission {
    pub fn new(gate: &Arc<AuthGate>, permission: &'static str) -> Self {
        Self {
            gate: Arc::clone(gate),
            permission,
        }
    }
}

/// Permission middleware, used with `from_fn_with_state(RequirePermission::new(..), authorize)`
pub async fn authorize(
    State(required): State<RequirePermission>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();
    let claims = required.gate.authorize(&parts.headers, required.permission).await?;

    tracing::debug!(sub = %claims.sub, permission = required.permission, "Authorized request");
    parts.extensions.insert(AuthUser::from(claims));

    Ok(next.run(Request::from_parts(parts, body)).await)
}
