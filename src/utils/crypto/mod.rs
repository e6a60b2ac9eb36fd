//! Credential hashing and verification
//!
//! One-way password hashing with Argon2 plus the password strength
//! predicate applied before accepting a new credential.

mod password;

pub use password::{hash_password, validate_password_strength, verify_password};
