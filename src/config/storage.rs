//! Storage configuration types.

use serde::Deserialize;

/// MongoDB storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// MongoDB connection URI.
    pub uri: String,
    /// Database name.
    pub database: String,
    /// Collection holding the cart documents.
    pub collection: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "cartd".to_string(),
            collection: "cart".to_string(),
        }
    }
}
