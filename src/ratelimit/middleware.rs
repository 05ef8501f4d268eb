use super::limiter::RateLimiter;
use crate::api::identity::ClientIdentity;
use crate::errors::ApiError;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

/// Rejects the request with `429` once the caller has used up the current window.
pub async fn enforce_rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    identity: ClientIdentity,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !limiter.check_now(identity.as_str()).is_allowed() {
        return Err(ApiError::RateLimited);
    }
    Ok(next.run(request).await)
}
