//! Session token signing and validation.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session lifetime in seconds (14 days).
pub const SESSION_TTL_SECS: u64 = 1_209_600;

/// Identity carried by a validated session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInfo {
    pub user_id: Uuid,
    pub expires_at: u64,
}

/// Errors returned by [`issue_session_token`] and [`validate_session_token`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("session expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign session token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims of a session token.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user ID (UUID string) |
/// | `exp` | `exp` | expiration, seconds since epoch |
///
/// The role is deliberately absent: it is resolved from the profile on every
/// request so that role changes apply to live sessions.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Sign a session token for `user_id`. Returns the token and its expiry.
pub fn issue_session_token(user_id: Uuid, secret: &str) -> Result<(String, u64), SessionError> {
    let exp = now_secs() + SESSION_TTL_SECS;
    let claims = SessionClaims {
        sub: user_id.to_string(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(SessionError::Signing)?;
    Ok((token, exp))
}

/// Validate a session cookie value.
///
/// Validation: HS256, `exp` checked with the default 60s leeway, required
/// claims `exp` + `sub`.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionInfo, SessionError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => SessionError::InvalidSignature,
        _ => SessionError::Malformed,
    })?;

    let user_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| SessionError::Malformed)?;
    Ok(SessionInfo {
        user_id,
        expires_at: data.claims.exp,
    })
}
