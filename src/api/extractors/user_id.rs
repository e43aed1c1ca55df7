//! User id path extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::config::ENTITY_USER;
use crate::errors::AppError;

/// Integer user id taken from the `/:id` path segment.
///
/// A segment that is not an `i32` (non-numeric or out of range) cannot
/// name a stored user, so it is rejected as `NotFound` rather than with
/// axum's plain-text path rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(path = %parts.uri.path(), "Unusable user id: {}", e.body_text());
                AppError::not_found(ENTITY_USER)
            })?;

        Ok(UserId(id))
    }
}
