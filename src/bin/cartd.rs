//! cartd: per-user shopping cart HTTP service.
//!
//! ## Architecture
//! ```text
//! [Client] -> [cartd HTTP API] -> [MongoDB cart collection]
//!                  |
//!                  v (reads only)
//!            [Product service /products/bulk]
//! ```
//!
//! ## Configuration
//! - CARTD__SERVER__HOST / CARTD__SERVER__PORT: bind address
//! - CARTD__STORAGE__URI / DATABASE / COLLECTION: MongoDB settings
//! - CARTD__PRODUCT_SERVICE__BASE_URL / TIMEOUT_SECS: enrichment endpoint
//! - CARTD_CONFIG: optional YAML config file path
//! - CARTD_LOG: tracing filter (default "info")

use std::sync::Arc;

use tracing::{error, info};

use cartd::config::Config;
use cartd::enrichment::HttpProductLookup;
use cartd::interfaces::ProductLookup;
use cartd::service::CartService;
use cartd::storage::init_storage;
use cartd::transport;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    cartd::utils::bootstrap::init_tracing();

    let config_path = cartd::utils::bootstrap::parse_config_path();
    let config = Config::load(config_path.as_deref()).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Starting cartd");

    let store = init_storage(&config.storage).await?;
    info!("Storage initialized");

    let products: Arc<dyn ProductLookup> =
        Arc::new(HttpProductLookup::new(&config.product_service)?);
    let service = Arc::new(CartService::new(store, products));

    let app = transport::router(service);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
