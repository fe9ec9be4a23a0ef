//! Session helpers for router tests.
//!
//! Handlers read the caller from the `liberalia_session` cookie. `MockSession`
//! signs a real session token so tests can drive the router without logging in.

use axum::http::{HeaderName, HeaderValue, header};
use uuid::Uuid;

use liberalia_auth_types::cookie::SESSION_COOKIE;
use liberalia_auth_types::token::issue_session_token;

/// Session secret shared by router tests.
pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-router-tests";

/// Configurable session injected into test requests.
pub struct MockSession {
    pub user_id: Uuid,
}

impl MockSession {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    /// Signed session token for [`TEST_SESSION_SECRET`].
    pub fn token(&self) -> String {
        let (token, _) = issue_session_token(self.user_id, TEST_SESSION_SECRET)
            .expect("sign test session token");
        token
    }

    /// `Cookie` header as a browser would send it after login.
    pub fn cookie_header(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("{SESSION_COOKIE}={}", self.token()))
            .expect("session cookie is a valid header value");
        (header::COOKIE, value)
    }
}
