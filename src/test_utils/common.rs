use crate::Key;
use crate::Notifier;
use crate::Readiness;
use crate::Result;
use crate::Tree;
use crate::WatchIndex;

/// Callback for entries whose readiness is never dispatched
pub fn ignore_ready(
    _index: &mut WatchIndex,
    _key: Key,
    _readiness: Readiness,
) -> Result<()> {
    Ok(())
}

pub fn insert_all<N: Notifier + ?Sized>(
    tree: &mut Tree,
    keys: impl IntoIterator<Item = Key>,
    notifier: &mut N,
) {
    for key in keys {
        tree.insert(key, ignore_ready, notifier).expect("insert should succeed");
    }
}

pub fn keys(tree: &Tree) -> Vec<Key> {
    tree.iter().map(|(key, _)| key).collect()
}
