//! Petstore API server
//!
//! ```text
//! cargo run --example petstore_api -- config/petstore.yaml
//! curl -H 'Authorization: Bearer demo' localhost:8080/api/v3/pets
//! ```

use anyhow::Result;
use petstore::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_yaml_file(&path)?,
        None => AppConfig::default(),
    }
    .apply_env_overrides()?;
    config.logging.init_tracing()?;

    let db = Database::connect(&config.database).await?;
    let addr = config.server.address();

    tracing::info!(
        auth = config.auth.enabled,
        max_limit = config.pagination.max_limit,
        "starting petstore on http://{}{}",
        addr,
        API_PREFIX
    );

    ServerBuilder::new()
        .with_config(config)
        .with_database(db)
        .serve(&addr)
        .await
}
