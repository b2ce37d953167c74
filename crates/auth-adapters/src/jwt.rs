//! HS256 JWT implementation of `TokenAuthority`.
//!
//! Tokens carry the user identifier and an expiry; nothing is stored server-side.

use chrono::{Duration, Utc};
use domains::{DomainError, DomainResult, TokenAuthority, TokenCheck};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Sessions last five minutes unless configured otherwise.
pub fn default_token_ttl() -> Duration {
    Duration::minutes(5)
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: i64,
    exp: i64,
}

pub struct JwtTokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokenAuthority {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }
}

impl TokenAuthority for JwtTokenAuthority {
    fn issue(&self, user_id: i64) -> DomainResult<String> {
        let claims = Claims {
            id: user_id,
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|err| {
            tracing::error!(error = %err, user_id, "token signing failed");
            DomainError::Internal("token signing failed".into())
        })
    }

    fn verify(&self, token: &str, user_id: i64) -> TokenCheck {
        let claims = match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => data.claims,
            Err(err) => {
                tracing::debug!(error = %err, "token rejected");
                return match err.kind() {
                    ErrorKind::InvalidSignature => TokenCheck::SignatureInvalid,
                    _ => TokenCheck::Malformed,
                };
            }
        };

        if claims.id != user_id {
            return TokenCheck::IdentifierMismatch;
        }
        TokenCheck::Authorized
    }
}
