use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use liberalia_auth_types::cookie::CookieSettings;
use liberalia_auth_types::session::SessionKey;
use liberalia_catalog::config::CatalogConfig;
use liberalia_catalog::router::build_router;
use liberalia_catalog::state::AppState;
use liberalia_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = CatalogConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let state = AppState {
        db: Arc::new(db),
        session_key: SessionKey::new(config.session_secret),
        cookies: CookieSettings {
            domain: config.cookie_domain,
            secure: config.cookie_secure,
        },
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.catalog_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("catalog service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
