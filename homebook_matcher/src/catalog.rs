//! Service catalog index.
//!
//! The catalog is read once per process and shared read-only by every
//! session. A missing or malformed catalog degrades to an empty one.

use homebook_core::Service;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug)]
enum CatalogSource {
    File(PathBuf),
    Inline(Vec<Service>),
}

/// Lazily loaded, memoized list of bookable services.
#[derive(Debug)]
pub struct CatalogIndex {
    source: CatalogSource,
    cache: OnceCell<Arc<[Service]>>,
}

impl CatalogIndex {
    /// Catalog backed by a JSON file of `[{ "name", "keywords" }]`.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: CatalogSource::File(path.into()),
            cache: OnceCell::new(),
        }
    }

    /// Catalog supplied in-process.
    #[must_use]
    pub fn from_services(services: Vec<Service>) -> Self {
        Self {
            source: CatalogSource::Inline(services),
            cache: OnceCell::new(),
        }
    }

    /// Returns the catalog, reading it on first use only.
    ///
    /// Every call after the first returns the same shared slice. A read
    /// or parse failure is logged and yields an empty catalog, which is
    /// then cached like any other result.
    pub async fn load(&self) -> Arc<[Service]> {
        self.cache
            .get_or_init(|| async {
                match self.read().await {
                    Ok(services) => {
                        info!("Loaded {} services into catalog", services.len());
                        Arc::from(dedup_by_name(services))
                    }
                    Err(e) => {
                        error!("Catalog unavailable, continuing with no services: {e}");
                        Arc::from(Vec::new())
                    }
                }
            })
            .await
            .clone()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cache.initialized()
    }

    async fn read(&self) -> Result<Vec<Service>, CatalogError> {
        match &self.source {
            CatalogSource::Inline(services) => Ok(services.clone()),
            CatalogSource::File(path) => {
                let content =
                    tokio::fs::read_to_string(path)
                        .await
                        .map_err(|source| CatalogError::Io {
                            path: path.clone(),
                            source,
                        })?;
                serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

/// Service names are unique; later duplicates are dropped.
fn dedup_by_name(services: Vec<Service>) -> Vec<Service> {
    let mut seen = HashSet::new();
    services
        .into_iter()
        .filter(|service| {
            let fresh = seen.insert(service.name.clone());
            if !fresh {
                warn!("Ignoring duplicate catalog entry: {}", service.name);
            }
            fresh
        })
        .collect()
}
