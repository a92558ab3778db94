use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::auth::{AuthError, AuthResult};

/// Fixed issuer baked into every session token.
pub const TOKEN_ISSUER: &str = "chirpy";

/// Session TTL used when the caller asks for zero or a negative TTL.
const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Refresh tokens outlive many sessions.
const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issue a signed session token (HS256) for a user. `ttl_seconds` values
/// of zero or less fall back to the 24-hour default.
pub fn issue_session_token(user_id: i64, secret: &str, ttl_seconds: i64) -> AuthResult<String> {
    let ttl = if ttl_seconds > 0 {
        ttl_seconds
    } else {
        DEFAULT_SESSION_TTL_SECS
    };

    let now = Utc::now().timestamp();
    let claims = Claims {
        iss: TOKEN_ISSUER.to_string(),
        sub: user_id.to_string(),
        iat: now,
        exp: now + ttl,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::SignatureInvalid)
}

/// Verify signature, expiry, and issuer, and decode the subject back to a
/// user id. Zero leeway: a token is expired the second its `exp` passes.
pub fn validate_session_token(token: &str, secret: &str) -> AuthResult<i64> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[TOKEN_ISSUER]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
        _ => AuthError::SignatureInvalid,
    })?;

    // the subject is untrusted input like the rest of the claim set
    data.claims
        .sub
        .parse::<i64>()
        .map_err(|_| AuthError::SignatureInvalid)
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(header: Option<&str>) -> AuthResult<&str> {
    extract_scheme_token(header, "Bearer")
}

/// Pull the key out of an `Authorization: ApiKey <key>` header value.
pub fn extract_api_key(header: Option<&str>) -> AuthResult<&str> {
    extract_scheme_token(header, "ApiKey")
}

fn extract_scheme_token<'a>(header: Option<&'a str>, scheme: &str) -> AuthResult<&'a str> {
    let value = header.ok_or(AuthError::MissingAuthHeader)?;
    let mut parts = value.split_ascii_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(s), Some(token), None) if s == scheme => Ok(token),
        _ => Err(AuthError::MalformedAuthHeader),
    }
}

/// Generate a cryptographically random 32-byte hex refresh token and its
/// expiry timestamp.
pub fn generate_refresh_token() -> (String, DateTime<Utc>) {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    let token = hex::encode(bytes);
    let expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);
    (token, expires_at)
}
