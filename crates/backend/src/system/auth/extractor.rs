use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use contracts::system::auth::TokenClaims;

use super::Principal;

/// Extractor for the principal of an authenticated request
/// Usage in handlers: `async fn handler(CurrentUser(principal): CurrentUser) -> Response`
pub struct CurrentUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // TokenClaims are set by the auth middleware
        parts
            .extensions
            .get::<TokenClaims>()
            .map(|claims| CurrentUser(Principal::from(claims)))
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
