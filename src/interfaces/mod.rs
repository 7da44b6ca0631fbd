//! Seam traits between the orchestrator and its collaborators.
//!
//! The cart store and product lookup are injected as `Arc<dyn ...>` so the
//! service can be exercised against in-memory fakes.

mod cart_store;
mod product_lookup;

pub use cart_store::{CartStore, Result, StorageError};
pub use product_lookup::{LookupError, ProductLookup};
