//! Session cookie extractor.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use http::request::Parts;
use uuid::Uuid;

use crate::cookie::SESSION_COOKIE;
use crate::token::validate_session_token;

/// Route anonymous requests are redirected to.
pub const LOGIN_PATH: &str = "/accounts/login/";

/// HMAC key used to sign and validate session tokens.
///
/// Handlers' state must provide it through `FromRef` for [`SessionUser`] to extract.
#[derive(Clone)]
pub struct SessionKey(Arc<str>);

impl SessionKey {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

/// Authenticated caller, read from the session cookie.
///
/// Rejects with a redirect to [`LOGIN_PATH`] when the cookie is absent,
/// expired or forged. Role checks happen in handlers after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub expires_at: u64,
}

impl SessionUser {
    /// Read the session from a cookie jar. `None` for anonymous callers.
    pub fn from_jar(jar: &CookieJar, key: &SessionKey) -> Option<Self> {
        let cookie = jar.get(SESSION_COOKIE)?;
        match validate_session_token(cookie.value(), key.secret()) {
            Ok(info) => Some(Self {
                user_id: info.user_id,
                expires_at: info.expires_at,
            }),
            Err(e) => {
                tracing::debug!(error = %e, "rejected session cookie");
                None
            }
        }
    }
}

/// Rejection for [`SessionUser`]: redirect to the login form.
#[derive(Debug)]
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to(LOGIN_PATH).into_response()
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    SessionKey: FromRef<S>,
{
    type Rejection = LoginRedirect;

    // Read synchronously and return a 'static future, matching the
    // `fn -> impl Future + Send` signature axum-core declares.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let key = SessionKey::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let session = Self::from_jar(&jar, &key);

        async move { session.ok_or(LoginRedirect) }
    }
}
