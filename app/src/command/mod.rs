//! Static strategy pattern for CLI commands.
//!
//! Each command is its own strategy type with its own input, dispatched
//! statically from `main`.

use homebook_config::Config;
use homebook_dialogue::{
    DialogueConfig, DialogueController, InMemorySessionStore, JsonFileBookingStore,
};
use homebook_matcher::CatalogIndex;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

mod book;
mod bookings;
mod chat;
mod init;
mod request;
mod services;
mod version;

pub use book::{BookInput, BookStrategy};
pub use bookings::BookingsStrategy;
pub use chat::{ChatInput, ChatStrategy};
pub use init::InitStrategy;
pub use request::{RequestInput, RequestStrategy};
pub use services::ServicesStrategy;
pub use version::VersionStrategy;

/// The controller as wired up by the CLI.
pub type Assistant = DialogueController<Arc<InMemorySessionStore>, JsonFileBookingStore>;

/// Shared components every booking command needs.
pub struct CommonComponents {
    pub config: Config,
    pub catalog: Arc<CatalogIndex>,
    pub assistant: Assistant,
}

/// Load config and wire the catalog, session store and booking file together.
pub fn init_common_components() -> anyhow::Result<CommonComponents> {
    let config = Config::load_or_default()?;

    info!("Service catalog: {}", config.catalog.path.display());
    info!("Bookings file: {}", config.storage.bookings_path.display());

    let catalog = Arc::new(CatalogIndex::from_path(config.catalog.path.clone()));
    let sessions = Arc::new(
        config
            .dialogue
            .session_ttl_secs
            .map_or_else(InMemorySessionStore::new, |secs| {
                InMemorySessionStore::with_ttl(Duration::from_secs(secs))
            }),
    );
    let bookings = JsonFileBookingStore::new(config.storage.bookings_path.clone());

    let assistant = DialogueController::new(catalog.clone(), sessions, bookings).with_config(
        DialogueConfig {
            fallback_threshold: config.dialogue.fallback_threshold,
        },
    );

    Ok(CommonComponents {
        config,
        catalog,
        assistant,
    })
}

/// Caller-supplied session id, or a fresh one.
fn session_or_new(session_id: Option<String>) -> String {
    session_id.unwrap_or_else(|| Uuid::now_v7().to_string())
}

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
