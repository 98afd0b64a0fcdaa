use std::collections::HashMap;

use tracing::debug;

use super::Notifier;
use super::OnReady;
use super::WatchId;
use crate::Key;
use crate::NotifierConfig;
use crate::WatchError;

/// In-process notifier that only keeps the registration table.
///
/// Readiness is reported by whoever drives the index calling
/// [`crate::WatchIndex::dispatch`]; this type enforces one watch per key and
/// the configured watch limit.
#[derive(Debug)]
pub struct LocalNotifier {
    next_id: u64,
    max_watches: usize,
    live: HashMap<u64, Key>,
}

impl LocalNotifier {
    pub fn new(config: &NotifierConfig) -> Self {
        Self {
            next_id: 1,
            max_watches: config.max_watches,
            live: HashMap::new(),
        }
    }

    /// Number of registrations not yet released
    pub fn live(&self) -> usize {
        self.live.len()
    }

    pub fn is_watching(
        &self,
        key: Key,
    ) -> bool {
        self.live.values().any(|watched| *watched == key)
    }
}

impl Notifier for LocalNotifier {
    fn register(
        &mut self,
        key: Key,
        _on_ready: OnReady,
    ) -> Result<WatchId, WatchError> {
        if self.live.len() >= self.max_watches {
            return Err(WatchError::Capacity {
                limit: self.max_watches,
            });
        }
        if self.is_watching(key) {
            return Err(WatchError::Registration {
                key,
                reason: "key is already watched".into(),
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id, key);
        debug!(key, watch_id = id, live = self.live.len(), "watch added");
        Ok(WatchId::new(id))
    }

    fn deregister(
        &mut self,
        watch: WatchId,
    ) -> Result<(), WatchError> {
        match self.live.remove(&watch.as_raw()) {
            Some(key) => {
                debug!(key, watch_id = watch.as_raw(), live = self.live.len(), "watch removed");
                Ok(())
            }
            None => Err(WatchError::Deregistration {
                watch_id: watch.as_raw(),
                reason: "unknown watch".into(),
            }),
        }
    }
}
