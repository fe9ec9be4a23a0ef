//! Session cookie builders.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::token::SESSION_TTL_SECS;

/// Cookie name for the session token.
pub const SESSION_COOKIE: &str = "liberalia_session";

/// Deployment-dependent cookie attributes.
#[derive(Debug, Clone, Default)]
pub struct CookieSettings {
    /// `Domain` attribute. Host-only cookie when `None`.
    pub domain: Option<String>,
    /// `Secure` attribute. Disable only for plain-HTTP local development.
    pub secure: bool,
}

fn session_cookie(value: String, max_age: Duration, settings: &CookieSettings) -> Cookie<'static> {
    let mut builder = Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .max_age(max_age)
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Lax);
    if let Some(domain) = &settings.domain {
        builder = builder.domain(domain.clone());
    }
    builder.build()
}

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use liberalia_auth_types::cookie::{CookieSettings, SESSION_COOKIE, set_session_cookie};
///
/// let settings = CookieSettings { domain: Some("example.com".to_owned()), secure: true };
/// let jar = set_session_cookie(CookieJar::new(), "token".to_owned(), &settings);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(1_209_600)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, value: String, settings: &CookieSettings) -> CookieJar {
    jar.add(session_cookie(
        value,
        Duration::seconds(SESSION_TTL_SECS as i64),
        settings,
    ))
}

/// Clear the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use liberalia_auth_types::cookie::{
///     CookieSettings, SESSION_COOKIE, clear_session_cookie, set_session_cookie,
/// };
///
/// let settings = CookieSettings::default();
/// let jar = set_session_cookie(CookieJar::new(), "token".to_owned(), &settings);
/// let jar = clear_session_cookie(jar, &settings);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "");
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar, settings: &CookieSettings) -> CookieJar {
    jar.add(session_cookie(String::new(), Duration::ZERO, settings))
}
