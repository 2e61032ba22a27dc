//! Password hashing with bcrypt.
//!
//! The salt is embedded in the digest, so verification needs nothing but
//! the stored hash.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Well-formed cost-12 digest that matches no real password. Verifying
/// against it costs the same as verifying against a stored hash.
pub const DUMMY_PASSWORD_HASH: &str =
    "$2b$12$EixZaYVK1fsbw1ZfbX3OXePaWxn96p36WQoeG6Lruj3vjPGga31lW";

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Returns `false` for a wrong password and for a malformed digest.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match verify(password, hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("testpassword123").unwrap();
        assert!(!hash.is_empty());
        assert_ne!(hash, "testpassword123");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_verify_correct_and_incorrect() {
        let hash = hash_password("correctpassword").unwrap();
        assert!(verify_password("correctpassword", &hash));
        assert!(!verify_password("wrongpassword", &hash));
    }

    #[test]
    fn test_dummy_hash_is_well_formed() {
        assert!(matches!(verify("rollcall", DUMMY_PASSWORD_HASH), Ok(false)));
        assert!(DUMMY_PASSWORD_HASH.starts_with(&format!("$2b${}$", DEFAULT_COST)));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        assert!(!verify_password("testpassword", "not_a_valid_bcrypt_hash"));
        assert!(!verify_password("testpassword", ""));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hash1 = hash_password("samepassword").unwrap();
        let hash2 = hash_password("samepassword").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("samepassword", &hash1));
        assert!(verify_password("samepassword", &hash2));
    }
}
