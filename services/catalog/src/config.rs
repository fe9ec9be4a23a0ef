use anyhow::Context as _;

/// Catalog service configuration loaded from environment variables.
#[derive(Debug)]
pub struct CatalogConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing session tokens. Env var: `SESSION_SECRET`.
    pub session_secret: String,
    /// TCP port to listen on (default 8000). Env var: `CATALOG_PORT`.
    pub catalog_port: u16,
    /// Session cookie `Domain` attribute. Host-only cookie when unset.
    pub cookie_domain: Option<String>,
    /// Session cookie `Secure` attribute (default true). Env var: `COOKIE_SECURE`.
    pub cookie_secure: bool,
}

impl CatalogConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let session_secret = std::env::var("SESSION_SECRET").context("SESSION_SECRET")?;
        if session_secret.len() < MIN_SECRET_LEN {
            anyhow::bail!("SESSION_SECRET must be at least {MIN_SECRET_LEN} bytes");
        }
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL")?,
            session_secret,
            catalog_port: std::env::var("CATALOG_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            cookie_domain: std::env::var("COOKIE_DOMAIN")
                .ok()
                .filter(|v| !v.is_empty()),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        })
    }
}

const MIN_SECRET_LEN: usize = 32;

/// `false`, `0`, `no` and `off` disable a flag; anything else enables it.
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}
