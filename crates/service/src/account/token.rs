use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token error: {0}")]
    Jwt(String),
}

/// Claims carried by an issued token; `sub` is the account id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: i32,
    pub exp: usize,
}

/// Collaborator issuing and validating opaque authentication tokens.
pub trait TokenIssuer: Send + Sync {
    fn sign(&self, user_id: i32) -> Result<String, TokenError>;
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}

/// HS256 JWT issuer with a fixed time-to-live.
pub struct JwtTokenIssuer {
    secret: String,
    ttl: Duration,
}

impl JwtTokenIssuer {
    pub fn new(secret: impl Into<String>, ttl_hours: i64) -> Self {
        Self { secret: secret.into(), ttl: Duration::hours(ttl_hours) }
    }

    /// Build from the auth section of the app config; `None` when no
    /// signing secret is configured.
    pub fn from_config(cfg: &configs::AuthConfig) -> Option<Self> {
        cfg.jwt_secret
            .as_ref()
            .map(|secret| Self::new(secret.clone(), cfg.token_ttl_hours))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn sign(&self, user_id: i32) -> Result<String, TokenError> {
        let exp = (Utc::now() + self.ttl).timestamp() as usize;
        let claims = TokenClaims { sub: user_id, exp };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(self.secret.as_bytes()))
            .map_err(|e| TokenError::Jwt(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| TokenError::Jwt(e.to_string()))
    }
}

/// Deterministic issuer for tests and doc examples.
pub mod mock {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::{TokenClaims, TokenError, TokenIssuer};

    #[derive(Default)]
    pub struct MockTokenIssuer {
        pub sign_calls: AtomicUsize,
        pub fail: AtomicBool,
    }

    impl TokenIssuer for MockTokenIssuer {
        fn sign(&self, user_id: i32) -> Result<String, TokenError> {
            self.sign_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(TokenError::Jwt("signing unavailable".into()));
            }
            Ok(format!("token-{user_id}"))
        }

        fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
            let sub = token
                .strip_prefix("token-")
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| TokenError::Jwt("malformed token".into()))?;
            Ok(TokenClaims { sub, exp: usize::MAX })
        }
    }
}
