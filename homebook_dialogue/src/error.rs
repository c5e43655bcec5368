use thiserror::Error;

/// Errors that can abort a conversation turn.
///
/// Booking write failures are deliberately absent: they are logged and the
/// turn still completes.
#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("Session store error: {0}")]
    Store(anyhow::Error),
}
