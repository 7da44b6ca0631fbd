//! Storage implementations.

use std::sync::Arc;

use tracing::info;

use crate::config::StorageConfig;
use crate::interfaces::CartStore;

pub mod mock;
pub mod mongodb;

pub use mock::MockCartStore;
pub use mongodb::MongoCartStore;

/// Initialize storage based on configuration.
///
/// Connects the process-wide MongoDB client and prepares indexes. The
/// returned store is shared across all requests.
pub async fn init_storage(
    config: &StorageConfig,
) -> Result<Arc<dyn CartStore>, Box<dyn std::error::Error>> {
    info!(
        database = %config.database,
        collection = %config.collection,
        "Storage: mongodb"
    );

    let client = ::mongodb::Client::with_uri_str(&config.uri).await?;
    let store = MongoCartStore::new(&client, &config.database, &config.collection).await?;

    Ok(Arc::new(store))
}
