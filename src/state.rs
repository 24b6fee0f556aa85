use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    auth::providers::{AuthProvider, LocalAuthProvider},
    config::AppConfig,
    services::ServiceContext,
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    /// Builds state with the local (database-backed) auth provider.
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Arc<Self> {
        let services = ServiceContext::new(&db);
        let provider = LocalAuthProvider::new(
            services.user(),
            services.refresh_token_dao(),
            &config.auth,
        );
        Self::with_provider(config, db, Arc::new(provider))
    }

    pub fn with_provider(
        config: AppConfig,
        db: DatabaseConnection,
        auth: Arc<dyn AuthProvider>,
    ) -> Arc<Self> {
        Arc::new(Self { config, db, auth })
    }
}
