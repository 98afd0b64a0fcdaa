//! Error hierarchy for the watch index
//!
//! Structural operations either complete or fail as a unit: when an
//! operation returns an error the tree is exactly as it was before the call.
//! Missing keys on delete and duplicate keys on insert are not errors.

use config::ConfigError;

use crate::Key;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failures reported by the readiness notifier
    #[error(transparent)]
    Watch(#[from] WatchError),

    /// Configuration loading or validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Driver I/O failures
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A structural invariant does not hold
    #[error("Index corrupted: {0}")]
    Corrupted(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// The notifier refused to create a watch for the key
    #[error("Failed to register watch for key {key}: {reason}")]
    Registration { key: Key, reason: String },

    /// The notifier has no room for another watch
    #[error("Watch capacity exhausted ({limit} live watches)")]
    Capacity { limit: usize },

    /// The notifier does not know the handle being released
    #[error("Failed to deregister watch {watch_id}: {reason}")]
    Deregistration { watch_id: u64, reason: String },
}
