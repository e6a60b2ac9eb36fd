//! Session token types and data structures

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};

/// Token service for session token operations
#[derive(Clone)]
pub struct TokenService {
    /// Encoding key for signing tokens
    pub(super) encoding_key: EncodingKey,
    /// Decoding key for verifying tokens
    pub(super) decoding_key: DecodingKey,
    /// Signing algorithm
    pub(super) algorithm: Algorithm,
    /// Token lifetime in seconds
    pub(super) lifetime: u64,
    /// Token issuer
    pub(super) issuer: String,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("lifetime", &self.lifetime)
            .field("issuer", &self.issuer)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// Identity asserted by a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    /// Subject (account) id
    pub subject_id: String,
    /// Account email
    pub email: String,
    /// Role ids granted to the account
    pub roles: Vec<String>,
}

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account) id
    pub sub: String,
    /// Account email
    pub email: String,
    /// Role ids granted to the account
    pub roles: Vec<String>,
    /// Issued at timestamp (Unix seconds)
    pub iat: u64,
    /// Expiration timestamp, always `iat + lifetime`
    pub exp: u64,
    /// Issuer
    pub iss: String,
    /// Token id
    pub jti: String,
}

impl Claims {
    /// The identity carried by these claims
    pub fn subject(&self) -> TokenSubject {
        TokenSubject {
            subject_id: self.sub.clone(),
            email: self.email.clone(),
            roles: self.roles.clone(),
        }
    }
}
