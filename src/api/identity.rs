//! Caller Identity
//!
//! The owner key for favorites and the rate-limit identity are both an opaque
//! string. Deriving it from the request is the job of this extractor, not of the
//! core: here it is the peer IP address, as the deployment has no authentication.

use crate::errors::ApiError;
use axum::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity(pub String);

impl ClientIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ConnectInfo(addr) = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::MissingIdentity)?;
        Ok(Self(addr.ip().to_string()))
    }
}
