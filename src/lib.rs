//! Ordered index of watched connection handles.
//!
//! Entries are kept in a red-black tree keyed by an integer handle. Every
//! entry owns a readiness watch registered with an external [`Notifier`];
//! the watch is registered when the entry is inserted and released in the
//! same step that frees the entry.

mod config;
mod errors;
mod index;
mod tree;
mod watch;

pub use config::*;
pub use errors::*;
pub use index::*;
pub use tree::*;
pub use watch::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
