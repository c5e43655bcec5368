//! Booking persistence.

use async_trait::async_trait;
use homebook_core::{Booking, BookingStore};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Bookings kept as a pretty-printed JSON array in one file.
///
/// Appends read the whole file, push, and rewrite it. There is no lock
/// across that sequence, so two concurrent appends can lose one write.
#[derive(Debug, Clone)]
pub struct JsonFileBookingStore {
    path: PathBuf,
}

impl JsonFileBookingStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored bookings; a missing file counts as none.
    async fn read_existing(&self) -> anyhow::Result<Vec<Booking>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl BookingStore for JsonFileBookingStore {
    async fn append(&self, booking: &Booking) -> anyhow::Result<()> {
        let mut bookings = self.read_existing().await.unwrap_or_else(|e| {
            warn!(
                "Could not read bookings from {}, starting a new list: {e}",
                self.path.display()
            );
            Vec::new()
        });
        bookings.push(booking.clone());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, serde_json::to_string_pretty(&bookings)?).await?;

        info!(
            "Saved booking for {} on {} ({} total)",
            booking.service,
            booking.date,
            bookings.len()
        );
        Ok(())
    }

    async fn list(&self) -> anyhow::Result<Vec<Booking>> {
        self.read_existing().await
    }
}

/// Bookings kept in memory only.
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryBookingStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn append(&self, booking: &Booking) -> anyhow::Result<()> {
        self.bookings.lock().await.push(booking.clone());
        Ok(())
    }

    async fn list(&self) -> anyhow::Result<Vec<Booking>> {
        Ok(self.bookings.lock().await.clone())
    }
}
