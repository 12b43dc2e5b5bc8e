use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a plaintext password with bcrypt.
///
/// Each call draws a fresh random salt, so hashing the same password twice
/// yields two different strings. Salt, cost factor, and digest are all
/// encoded into the returned modular-crypt string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// Verifies a plaintext password against a stored bcrypt string.
///
/// Recomputes the digest with the salt and cost embedded in the stored value
/// and compares in constant time. Returns `false` for a mismatch and also for
/// a malformed stored value: a wrong password is an expected outcome, not an
/// error.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    verify(password, stored_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed));
        assert!(!verify_password("wrong_password", &hashed));
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = "same_password";
        let first = hash_password(password).unwrap();
        let second = hash_password(password).unwrap();

        // Fresh salt per call: two hashes of one plaintext must differ,
        // and both must still verify.
        assert_ne!(first, second);
        assert!(verify_password(password, &first));
        assert!(verify_password(password, &second));
    }

    #[test]
    fn test_hash_does_not_contain_plaintext() {
        let password = "visible_secret";
        let hashed = hash_password(password).unwrap();
        assert!(!hashed.contains(password));
    }

    #[test]
    fn test_verify_with_malformed_hash_is_false() {
        // A garbled stored value is a failed verification, never a panic
        // or an error surfaced to the caller.
        assert!(!verify_password("test_password123", "invalidhashformat"));
        assert!(!verify_password("test_password123", ""));
    }
}
