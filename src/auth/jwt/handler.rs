//! Core token service implementation

use super::types::{Claims, TokenService, TokenSubject};
use crate::config::AuthConfig;
use crate::utils::error::{Result, SecurityError};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

impl TokenService {
    /// Create a new token service
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime: config.jwt_expiration,
            issuer: "estate-security".to_string(),
        }
    }

    /// Issue a session token for a subject
    pub async fn issue(&self, subject: &TokenSubject) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| SecurityError::internal(format!("System time error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: subject.subject_id.clone(),
            email: subject.email.clone(),
            roles: subject.roles.clone(),
            iat: now,
            exp: now + self.lifetime,
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)?;

        debug!("Issued session token for subject: {}", subject.subject_id);
        Ok(token)
    }

    /// Verify and decode a session token
    ///
    /// Fails on a bad signature, a structurally malformed token, or an
    /// expired one. Expiry has no grace period.
    pub async fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("Token verification failed: {}", e);
            SecurityError::InvalidToken(e)
        })?;

        debug!("Token verified for subject: {}", token_data.claims.sub);
        Ok(token_data.claims)
    }

    /// Issue a new token from the claims of a still-valid one
    ///
    /// Only the identity claims carry over; the old token keeps its own
    /// expiry and remains valid until then. An expired token is
    /// rejected, not extended.
    pub async fn refresh(&self, old_token: &str) -> Result<String> {
        let claims = self
            .verify(old_token)
            .await
            .map_err(|e| SecurityError::token_refresh(e.to_string()))?;

        self.issue(&claims.subject()).await
    }
}
