//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::state::AppState;
use crate::config::AppConfig;
use crate::core::auth::{AuthProvider, BearerTokenAuth, NoAuthProvider};
use crate::storage::Database;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the petstore HTTP server
///
/// # Example
///
/// ```ignore
/// let db = Database::connect(&config.database).await?;
/// ServerBuilder::new()
///     .with_config(config)
///     .with_database(db)
///     .serve("127.0.0.1:8080")
///     .await?;
/// ```
pub struct ServerBuilder {
    database: Option<Database>,
    config: AppConfig,
    auth: Option<Arc<dyn AuthProvider>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            database: None,
            config: AppConfig::default(),
            auth: None,
        }
    }

    /// Set the database (required)
    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the authentication provider
    ///
    /// Without one, `auth.enabled` selects between [`BearerTokenAuth`] and
    /// [`NoAuthProvider`].
    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth = Some(Arc::new(provider));
        self
    }

    /// Build the state shared by the handlers
    pub fn build_state(self) -> Result<AppState> {
        let database = self
            .database
            .ok_or_else(|| anyhow::anyhow!("Database is required. Call .with_database()"))?;

        let auth = match self.auth {
            Some(provider) => provider,
            None if self.config.auth.enabled => Arc::new(BearerTokenAuth::default()),
            None => Arc::new(NoAuthProvider),
        };

        Ok(AppState::new(database, self.config, auth))
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        Ok(RestExposure::build_router(self.build_state()?))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::AuthContext;
    use axum::http::HeaderMap;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ServerBuilder::new();
        assert!(builder.database.is_none());
        assert!(builder.auth.is_none());
        assert_eq!(builder.config, AppConfig::default());
    }

    #[test]
    fn test_build_without_database_fails() {
        let result = ServerBuilder::new().build();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_auth_enabled_requires_token() {
        let state = ServerBuilder::new()
            .with_database(Database::in_memory().await.unwrap())
            .build_state()
            .unwrap();
        assert!(state.auth.extract_context(&HeaderMap::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_auth_disabled_is_anonymous() {
        let state = ServerBuilder::new()
            .with_config(AppConfig::test_config())
            .with_database(Database::in_memory().await.unwrap())
            .build_state()
            .unwrap();
        let ctx = state.auth.extract_context(&HeaderMap::new()).await.unwrap();
        assert_eq!(ctx, AuthContext::Anonymous);
    }

    #[tokio::test]
    async fn test_explicit_provider_wins() {
        let state = ServerBuilder::new()
            .with_auth_provider(NoAuthProvider)
            .with_database(Database::in_memory().await.unwrap())
            .build_state()
            .unwrap();
        assert!(state.auth.extract_context(&HeaderMap::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_build_produces_router() {
        let router = ServerBuilder::new()
            .with_database(Database::in_memory().await.unwrap())
            .build();
        assert!(router.is_ok());
    }
}
