use crate::auth::{AuthError, AuthResult};

/// Hash a plaintext password with bcrypt at the default work factor.
pub fn hash_password(password: &str) -> AuthResult<String> {
    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    Ok(hash)
}

/// Check a plaintext password against a stored bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<()> {
    if bcrypt::verify(password, hash)? {
        Ok(())
    } else {
        Err(AuthError::CredentialMismatch)
    }
}
