use sha2::{Digest, Sha256};
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn new_salt() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Hex SHA-256 of `salt || password`.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify_password(salt: &str, password: &str, expected_hash: &str) -> bool {
    hash_password(salt, password) == expected_hash
}
