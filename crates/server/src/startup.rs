use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, AuthConfig, RevocationBackend};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use service::auth::revocation::{InMemoryRevocationList, RevocationStore, SeaOrmRevocationList};
use service::auth::SessionManager;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Session manager over the configured revocation backend.
pub fn build_sessions(db: &DatabaseConnection, cfg: &AuthConfig) -> Arc<SessionManager> {
    let revoked: Arc<dyn RevocationStore> = match cfg.revocation_store {
        RevocationBackend::Memory => Arc::new(InMemoryRevocationList::new()),
        RevocationBackend::Database => Arc::new(SeaOrmRevocationList::new(db.clone())),
    };
    info!(backend = ?cfg.revocation_store, "revocation store selected");
    Arc::new(SessionManager::from_config(cfg, revoked))
}

/// Router over an already migrated database.
pub fn build_app(db: DatabaseConnection, cfg: &AuthConfig) -> Router {
    let sessions = build_sessions(&db, cfg);
    routes::build_router(ServerState::new(db, sessions), build_cors())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Connect, migrate, and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    if cfg.auth.uses_dev_secret() {
        warn!("JWT_SECRET_KEY not set; signing tokens with the development secret");
    }

    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let app = build_app(db, &cfg.auth);
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting stores api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
