//! Coordinator owning the authoritative root
//!
//! [`WatchIndex`] pairs the tree with the notifier its watches are
//! registered on. The external dispatch loop reports readiness by key via
//! [`WatchIndex::dispatch`], which runs the entry's callback with the index
//! itself, so callbacks always work on the latest root.


use tracing::debug;

use crate::Key;
use crate::Notifier;
use crate::OnReady;
use crate::Readiness;
use crate::Result;
use crate::Tree;

pub struct WatchIndex {
    tree: Tree,
    notifier: Box<dyn Notifier>,
}

impl WatchIndex {
    pub fn new(notifier: Box<dyn Notifier>) -> Self {
        Self {
            tree: Tree::new(),
            notifier,
        }
    }

    /// See [`Tree::insert`].
    pub fn insert(
        &mut self,
        key: Key,
        on_ready: OnReady,
    ) -> Result<bool> {
        self.tree.insert(key, on_ready, &mut *self.notifier)
    }

    /// See [`Tree::delete`].
    pub fn remove(
        &mut self,
        key: Key,
    ) -> bool {
        self.tree.delete(key, &mut *self.notifier)
    }

    /// Runs the callback bound to `key`.
    ///
    /// Returns `Ok(false)` when `key` is no longer indexed; a notifier may
    /// still report a key whose entry was removed earlier in the same batch.
    ///
    /// # Errors
    /// Whatever the callback returns.
    pub fn dispatch(
        &mut self,
        key: Key,
        readiness: Readiness,
    ) -> Result<bool> {
        let Some(on_ready) = self.tree.watch(key).map(|watch| watch.on_ready()) else {
            debug!(key, ?readiness, "readiness for unindexed key dropped");
            return Ok(false);
        };

        on_ready(self, key, readiness)?;
        Ok(true)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl Drop for WatchIndex {
    fn drop(&mut self) {
        self.tree.clear(&mut *self.notifier);
    }
}
