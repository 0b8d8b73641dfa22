use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::{AuthService, SessionManager};
use service::catalog::repo::seaorm::SeaOrmCatalogRepository;
use service::catalog::CatalogService;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub catalog: Arc<CatalogService<SeaOrmCatalogRepository>>,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub sessions: Arc<SessionManager>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, sessions: Arc<SessionManager>) -> Self {
        let catalog = Arc::new(CatalogService::new(Arc::new(SeaOrmCatalogRepository::new(db.clone()))));
        let auth = Arc::new(AuthService::new(Arc::new(SeaOrmAuthRepository::new(db.clone())), sessions.clone()));
        Self { db, catalog, auth, sessions }
    }
}
