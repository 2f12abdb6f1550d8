//! State shared by every request handler

use crate::config::AppConfig;
use crate::core::auth::AuthProvider;
use crate::core::query::PaginationLimits;
use crate::storage::Database;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            auth,
        }
    }

    pub fn pagination(&self) -> &PaginationLimits {
        &self.config.pagination
    }
}
