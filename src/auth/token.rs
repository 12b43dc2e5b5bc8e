use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bearer tokens are valid for 24 hours from issuance. There is no refresh
/// or rotation: a token lives until this expiry or until the process secret
/// changes.
const TOKEN_TTL_HOURS: i64 = 24;

/// Represents the claims encoded within a bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: Uuid,
    /// Expiration timestamp (seconds since epoch).
    pub exp: u64,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: u64,
}

/// Issues and verifies signed bearer tokens.
///
/// Constructed once at startup from the process-wide signing secret and
/// shared read-only for the process lifetime. The secret is never read from
/// the environment on the request path and never derived from user input.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Generates a signed token for the given user, expiring in 24 hours.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let expiration = now
            .checked_add_signed(chrono::Duration::hours(TOKEN_TTL_HOURS))
            .expect("valid timestamp")
            .timestamp() as u64;

        let claims = Claims {
            sub: user_id,
            exp: expiration,
            iat: now.timestamp() as u64,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token string and decodes its claims.
    ///
    /// The signature is checked against the process secret, then the embedded
    /// expiry against the current time. Every failure mode (malformed token,
    /// bad signature, expired) collapses into the same `Unauthorized` error
    /// so callers cannot tell which check rejected the token.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))
    }
}
