use std::sync::Arc;

use productos_api::database;
use productos_api::prelude::*;
use productos_api::repository::{InMemoryProductRepository, PgProductRepository};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing
    init_tracing(&config)?;

    // Select the product store: PostgreSQL when configured, in-memory otherwise
    let products: Arc<dyn ProductRepository> = match &config.database {
        Some(db_config) => {
            let pool = database::create_pool(db_config).await?;
            database::ensure_schema(&pool).await?;
            Arc::new(PgProductRepository::new(pool))
        }
        None => {
            warn!("No database configured, using the in-memory product store");
            Arc::new(InMemoryProductRepository::new())
        }
    };

    // Build router and serve
    let state = AppState::new(config.clone(), products);
    let app = api_router(state);

    Server::new(config).serve(app).await?;

    Ok(())
}
