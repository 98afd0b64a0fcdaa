//! Readiness watches owned by index entries
//!
//! A [`Watch`] is the index's side of a registration with an external
//! readiness notifier. It is created when a node is created and consumed
//! when that node is destroyed; it is neither `Clone` nor `Copy`, so each
//! registration is released at most once.
//!
//! The notifier hands back the watched key as the callback context. The
//! owner of the index resolves that key against its current root (see
//! [`crate::WatchIndex::dispatch`]); no registration ever captures a root.

mod local;
pub use local::*;


use std::fmt;

#[cfg(test)]
use mockall::automock;
use tracing::trace;
use tracing::warn;

use crate::Key;
use crate::Result;
use crate::WatchError;
use crate::WatchIndex;

/// Callback run when a watched key becomes ready.
///
/// Receives the index that owns the entry, so it can insert or remove
/// entries through the current root.
pub type OnReady = fn(&mut WatchIndex, Key, Readiness) -> Result<()>;

/// What the notifier observed on a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Readable,
    Writable,
    /// Peer closed; the entry is expected to go away
    Hangup,
}

/// Opaque handle issued by a [`Notifier`]
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct WatchId(u64);

impl WatchId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Registration capability of the external readiness notifier
#[cfg_attr(test, automock)]
pub trait Notifier {
    /// Starts watching `key`; the notifier reports readiness back with `key`.
    fn register(
        &mut self,
        key: Key,
        on_ready: OnReady,
    ) -> std::result::Result<WatchId, WatchError>;

    /// Stops the watch. The handle is consumed and never seen again.
    fn deregister(
        &mut self,
        watch: WatchId,
    ) -> std::result::Result<(), WatchError>;
}

pub struct Watch {
    id: WatchId,
    key: Key,
    on_ready: OnReady,
}

impl Watch {
    pub(crate) fn register<N: Notifier + ?Sized>(
        notifier: &mut N,
        key: Key,
        on_ready: OnReady,
    ) -> Result<Self> {
        let id = notifier.register(key, on_ready)?;
        trace!(key, watch_id = id.as_raw(), "watch registered");
        Ok(Self { id, key, on_ready })
    }

    /// Deregisters the watch. A notifier failure is logged; the handle is
    /// gone either way.
    pub(crate) fn release<N: Notifier + ?Sized>(
        self,
        notifier: &mut N,
    ) {
        let Watch { id, key, .. } = self;
        let watch_id = id.as_raw();

        match notifier.deregister(id) {
            Ok(()) => trace!(key, watch_id, "watch released"),
            Err(e) => warn!(key, watch_id, "failed to release watch: {}", e),
        }
    }

    pub fn id(&self) -> &WatchId {
        &self.id
    }

    /// Key the watch was registered for
    pub fn key(&self) -> Key {
        self.key
    }

    pub fn on_ready(&self) -> OnReady {
        self.on_ready
    }
}

impl fmt::Debug for Watch {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Watch").field("id", &self.id).field("key", &self.key).finish()
    }
}
