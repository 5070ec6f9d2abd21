//! Bearer-token verification.
//!
//! Nimbus does not issue credentials; it verifies HS256 access tokens
//! minted by the external credential service that shares the signing
//! secret, and extracts the user id from the `sub` claim.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nimbus_core::config::auth::AuthConfig;
use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;

/// Access token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user id.
    pub sub: Uuid,
    /// Expiry as a unix timestamp.
    pub exp: u64,
}

/// Validates access tokens against the shared secret.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier").finish_non_exhaustive()
    }
}

impl JwtVerifier {
    /// Creates a verifier from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway_seconds;
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies a token and returns the user id it names.
    pub fn verify(&self, token: &str) -> AppResult<Uuid> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|e| AppError::unauthenticated(format!("Invalid token: {e}")))
    }
}
