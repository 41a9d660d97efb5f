use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

use super::Principal;
use crate::shared::config::AuthConfig;

/// Issues and validates HS256 access tokens
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    lifetime_hours: i64,
}

impl TokenIssuer {
    pub fn new(secret: String, lifetime_hours: i64) -> Self {
        Self {
            secret,
            lifetime_hours,
        }
    }

    pub fn from_config(auth: &AuthConfig) -> Self {
        let secret = match &auth.jwt_secret {
            Some(secret) if !secret.trim().is_empty() => secret.clone(),
            _ => {
                tracing::warn!("No jwt_secret configured, tokens will not survive a restart");
                generate_jwt_secret()
            }
        };
        Self::new(secret, auth.token_lifetime_hours)
    }

    /// Generate JWT access token for `principal`
    pub fn issue(&self, principal: &Principal) -> Result<String> {
        let now = Utc::now();
        let exp = (now + chrono::Duration::hours(self.lifetime_hours)).timestamp() as usize;
        let iat = now.timestamp() as usize;

        let claims = TokenClaims {
            sub: principal.username.clone(),
            is_admin: principal.is_admin,
            exp,
            iat,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to encode JWT token")
    }

    /// Validate JWT token and extract claims
    pub fn validate(&self, token: &str) -> Result<TokenClaims> {
        let token_data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Failed to decode JWT token")?;

        Ok(token_data.claims)
    }
}

/// Generate a cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(name: &str, is_admin: bool) -> Principal {
        Principal {
            username: name.to_string(),
            is_admin,
        }
    }

    #[test]
    fn issued_token_carries_principal() {
        let issuer = TokenIssuer::new("test-secret".into(), 1);
        let token = issuer.issue(&principal("NYC", false)).unwrap();
        let claims = issuer.validate(&token).unwrap();
        assert_eq!(claims.sub, "NYC");
        assert!(!claims.is_admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn foreign_or_expired_tokens_are_rejected() {
        let issuer = TokenIssuer::new("test-secret".into(), 1);
        let other = TokenIssuer::new("other-secret".into(), 1);
        let token = other.issue(&principal("admin", true)).unwrap();
        assert!(issuer.validate(&token).is_err());

        let expired = TokenIssuer::new("test-secret".into(), -2);
        let token = expired.issue(&principal("admin", true)).unwrap();
        assert!(issuer.validate(&token).is_err());
        assert!(issuer.validate("not-a-jwt").is_err());
    }

    #[test]
    fn generated_secrets_differ() {
        let a = TokenIssuer::from_config(&AuthConfig::default());
        let b = TokenIssuer::from_config(&AuthConfig::default());
        assert_ne!(a.secret, b.secret);
        assert_eq!(a.secret.len(), 44);
    }
}
