use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::Key;
use crate::MockNotifier;
use crate::WatchError;
use crate::WatchId;

/// Registration history shared between a configured [`MockNotifier`] and
/// the test inspecting it.
#[derive(Debug, Default)]
struct Ledger {
    next_id: u64,
    live: HashMap<u64, Key>,
    released: Vec<Key>,
    registrations: usize,
    stray_releases: usize,
    refuse_registrations: bool,
}

#[derive(Debug, Clone, Default)]
pub struct WatchLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl WatchLedger {
    /// Keys with a registration that has not been released
    pub fn live_keys(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self.inner.lock().live.values().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Keys in the order their watches were released
    pub fn released(&self) -> Vec<Key> {
        self.inner.lock().released.clone()
    }

    pub fn release_count(
        &self,
        key: Key,
    ) -> usize {
        self.inner.lock().released.iter().filter(|released| **released == key).count()
    }

    pub fn registrations(&self) -> usize {
        self.inner.lock().registrations
    }

    /// Releases of handles that were never issued or already released
    pub fn stray_releases(&self) -> usize {
        self.inner.lock().stray_releases
    }

    pub fn refuse_registrations(
        &self,
        refuse: bool,
    ) {
        self.inner.lock().refuse_registrations = refuse;
    }
}

/// A [`MockNotifier`] that accepts every call and records it in the
/// returned [`WatchLedger`].
pub fn recording_notifier() -> (MockNotifier, WatchLedger) {
    let ledger = WatchLedger::default();
    let mut notifier = MockNotifier::new();

    notifier.expect_register().returning({
        let ledger = ledger.clone();
        move |key, _| {
            let mut inner = ledger.inner.lock();
            if inner.refuse_registrations {
                return Err(WatchError::Registration {
                    key,
                    reason: "refused by test".into(),
                });
            }
            inner.next_id += 1;
            let id = inner.next_id;
            inner.live.insert(id, key);
            inner.registrations += 1;
            Ok(WatchId::new(id))
        }
    });

    notifier.expect_deregister().returning({
        let ledger = ledger.clone();
        move |watch| {
            let mut inner = ledger.inner.lock();
            match inner.live.remove(&watch.as_raw()) {
                Some(key) => {
                    inner.released.push(key);
                    Ok(())
                }
                None => {
                    inner.stray_releases += 1;
                    Err(WatchError::Deregistration {
                        watch_id: watch.as_raw(),
                        reason: "not registered".into(),
                    })
                }
            }
        }
    });

    (notifier, ledger)
}
