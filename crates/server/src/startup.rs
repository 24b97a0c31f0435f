use anyhow::{bail, Context};
use tracing::{info, warn};

use crate::routes::{build_router, ServerState};

/// Load config, connect the database, and serve until the listener
/// fails or the process is signalled.
pub async fn run() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config file unavailable, falling back to defaults and environment");
            let mut cfg = configs::AppConfig::default();
            cfg.normalize_and_validate()
                .context("no usable configuration")?;
            cfg
        }
    };
    if cfg.auth.jwt_secret.trim().is_empty() {
        bail!("auth.jwt_secret is empty; set it in config.toml or via JWT_SECRET");
    }

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .context("database connection failed")?;
    info!(event = "db_connected", "database connection established");

    let state = ServerState::new(db, &cfg.auth, &cfg.media);
    let router = build_router(state);

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(event = "listening", %addr, "http server ready");

    axum::serve(listener, router).await.context("server terminated")?;
    Ok(())
}
