use tracing::trace;

use super::node::is_red;
use super::node::paint;
use super::node::Color;
use super::node::Direction;
use super::node::Key;
use super::node::Link;
use super::node::Node;
use super::rotate::rotate_double;
use super::rotate::rotate_single;
use crate::Notifier;
use crate::OnReady;
use crate::Result;

/// Inserts `key` below `slot`, fixing red violations on the way back up.
///
/// Returns `Ok(false)` without touching anything when the key is already
/// present. A registration failure surfaces before any node is linked or
/// recolored, so the subtree is left exactly as it was.
pub(crate) fn insert_r<N: Notifier + ?Sized>(
    slot: &mut Link,
    key: Key,
    on_ready: OnReady,
    notifier: &mut N,
) -> Result<bool> {
    let node = match slot {
        Some(node) => node,
        None => {
            *slot = Some(Node::create(key, on_ready, notifier)?);
            return Ok(true);
        }
    };

    if node.key == key {
        return Ok(false);
    }

    let dir = Direction::toward(node.key, key);
    if !insert_r(&mut node[dir], key, on_ready, notifier)? {
        return Ok(false);
    }

    if let Some(node) = slot.take() {
        *slot = Some(rebalance(node, dir));
    }
    Ok(true)
}

/// Local fix-up after the `dir` child of `root` was updated
fn rebalance(
    mut root: Box<Node>,
    dir: Direction,
) -> Box<Node> {
    if !is_red(&root[dir]) {
        return root;
    }

    if is_red(&root[!dir]) {
        trace!(key = root.key, "color flip");
        root.color = Color::Red;
        paint(&mut root[Direction::Left], Color::Black);
        paint(&mut root[Direction::Right], Color::Black);
        return root;
    }

    let (outer, inner) = match root[dir].as_deref() {
        Some(child) => (is_red(&child[dir]), is_red(&child[!dir])),
        None => return root,
    };

    if outer {
        trace!(key = root.key, ?dir, "single rotation");
        rotate_single(root, !dir)
    } else if inner {
        trace!(key = root.key, ?dir, "double rotation");
        rotate_double(root, !dir)
    } else {
        root
    }
}
