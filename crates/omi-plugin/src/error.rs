//! Errors surfaced to chat users as corrective prompts.

use omi_random::RandomError;

/// Result type for command handlers.
pub type PluginResult<T> = Result<T, PluginError>;

/// Invalid command input.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// `choose` was sent without any options.
    #[error("no options given")]
    MissingOptions,

    /// A randomizer rejected its input.
    #[error(transparent)]
    Random(#[from] RandomError),
}
