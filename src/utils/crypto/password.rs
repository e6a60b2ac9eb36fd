//! Password hashing and verification using Argon2

use crate::utils::error::{Result, SecurityError};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// Symbols accepted by the strength predicate
const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SecurityError::hashing(format!("Failed to hash password: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verify a password against its stored hash
///
/// Returns `Ok(false)` on mismatch; a malformed stored hash is a
/// `Comparison` error. The comparison itself is delegated to the
/// Argon2 primitive.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| SecurityError::comparison(format!("Failed to parse password hash: {}", e)))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(SecurityError::comparison(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

/// Check that a password meets the minimum strength requirements
///
/// Pure predicate: length >= 8 with at least one uppercase letter, one
/// lowercase letter, one digit, and one symbol from the accepted set.
pub fn validate_password_strength(password: &str) -> bool {
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    password.chars().count() >= 8 && has_upper && has_lower && has_digit && has_symbol
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== hash_password Tests ====================

    #[test]
    fn test_hash_password_produces_hash() {
        let hash = hash_password("my-secure-password").unwrap();

        assert!(!hash.is_empty());
        // Argon2 hashes start with $argon2
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_hash_password_unique_each_time() {
        let password = "same-password";

        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
    }

    // ==================== verify_password Tests ====================

    #[test]
    fn test_verify_password_correct() {
        let password = "correct-password";
        let hash = hash_password(password).unwrap();

        assert!(verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("original-password").unwrap();

        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        let result = verify_password("password", "not-a-valid-hash");
        assert!(matches!(result, Err(SecurityError::Comparison(_))));
    }

    #[test]
    fn test_verify_password_case_sensitive() {
        let hash = hash_password("CaseSensitive").unwrap();

        assert!(!verify_password("casesensitive", &hash).unwrap());
    }

    // ==================== validate_password_strength Tests ====================

    #[test]
    fn test_strength_accepts_compliant_password() {
        assert!(validate_password_strength("Abcdef1!"));
    }

    #[test]
    fn test_strength_rejects_short_password() {
        // Seven characters, everything else present
        assert!(!validate_password_strength("short1!"));
    }

    #[test]
    fn test_strength_rejects_missing_uppercase() {
        assert!(!validate_password_strength("alllowercase1!"));
    }

    #[test]
    fn test_strength_rejects_missing_lowercase() {
        assert!(!validate_password_strength("ALLUPPERCASE1!"));
    }

    #[test]
    fn test_strength_rejects_missing_digit() {
        assert!(!validate_password_strength("NoDigits!!"));
    }

    #[test]
    fn test_strength_rejects_missing_symbol() {
        assert!(!validate_password_strength("NoSymbols123"));
    }

    #[test]
    fn test_strength_rejects_symbol_outside_set() {
        // Underscore is not in the accepted symbol set
        assert!(!validate_password_strength("Password1_"));
    }
}
