//! Password hashing with bcrypt.

use bcrypt::{hash, verify};

/// Work factor used for stored password hashes.
pub const PASSWORD_COST: u32 = 8;

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, PASSWORD_COST)
}

/// Returns `Ok(false)` on mismatch; errors only when `hashed` is not a bcrypt hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hashed)
}
