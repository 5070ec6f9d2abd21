//! `AuthUser` extractor — pulls the JWT from the Authorization header,
//! verifies it, and injects a request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use nimbus_core::error::AppError;
use nimbus_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthenticated("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthenticated("Invalid Authorization header format"))?;

        let user_id = state.jwt.verify(token)?;
        Ok(AuthUser(RequestContext::new(user_id)))
    }
}
