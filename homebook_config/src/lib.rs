//! On-disk configuration for the booking assistant.

mod schema;

pub use schema::{CatalogConfig, Config, DialogueConfig, StorageConfig};
