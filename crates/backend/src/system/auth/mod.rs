pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod verifier;

use axum::http::StatusCode;
use contracts::system::auth::{TokenClaims, UserInfo};
use thiserror::Error;

/// Authenticated identity a request runs as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub is_admin: bool,
}

impl From<&TokenClaims> for Principal {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            username: claims.sub.clone(),
            is_admin: claims.is_admin,
        }
    }
}

impl From<&Principal> for UserInfo {
    fn from(principal: &Principal) -> Self {
        Self {
            username: principal.username.clone(),
            is_admin: principal.is_admin,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing or malformed Authorization header")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("admin privileges required")]
    Forbidden,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
        }
    }
}
