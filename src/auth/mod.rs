pub mod password;
pub mod tokens;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Incorrect email and/or password combination")]
    CredentialMismatch,

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Authorization header not included in request")]
    MissingAuthHeader,

    #[error("Malformed authorization header")]
    MalformedAuthHeader,

    #[error("Invalid token signature")]
    SignatureInvalid,

    #[error("Unrecognized token issuer")]
    InvalidIssuer,

    #[error("Token expired")]
    Expired,
}

pub type AuthResult<T> = Result<T, AuthError>;
