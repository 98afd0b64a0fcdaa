use std::mem;

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
use crate::Watch;

/// Removes `key` from the subtree rooted at `link`.
///
/// Returns the new subtree together with `resolved`: `false` means the
/// subtree lost one black node on every path and the caller has to
/// rebalance.
pub(crate) fn delete_r<N: Notifier + ?Sized>(
    link: Link,
    key: Key,
    notifier: &mut N,
) -> (Link, bool) {
    let Some(mut node) = link else {
        return (None, true);
    };

    let dir = if node.key == key {
        if node[Direction::Left].is_none() || node[Direction::Right].is_none() {
            return unlink(node, notifier);
        }

        // Two children: trade entries with the in-order predecessor so the
        // node freed below carries `key` and its own watch.
        swap_with_predecessor(&mut node);
        Direction::Left
    } else {
        Direction::toward(node.key, key)
    };

    let (child, resolved) = delete_r(node[dir].take(), key, notifier);
    node[dir] = child;

    if resolved {
        (Some(node), true)
    } else {
        let (node, resolved) = rebalance(node, dir);
        (Some(node), resolved)
    }
}

/// Replaces a node that has at most one child by that child.
fn unlink<N: Notifier + ?Sized>(
    mut node: Box<Node>,
    notifier: &mut N,
) -> (Link, bool) {
    let side = if node[Direction::Left].is_none() {
        Direction::Right
    } else {
        Direction::Left
    };
    let mut saved = node[side].take();

    let resolved = match saved.as_deref_mut() {
        _ if node.is_red() => true,
        Some(child) if child.is_red() => {
            child.color = Color::Black;
            true
        }
        _ => false,
    };

    node.destroy(notifier);
    (saved, resolved)
}

fn swap_with_predecessor(node: &mut Node) {
    let Node {
        key, watch, link, ..
    } = node;

    if let Some(left) = link[Direction::Left as usize].as_deref_mut() {
        swap_rightmost(left, key, watch);
    }
}

fn swap_rightmost(
    node: &mut Node,
    key: &mut Key,
    watch: &mut Watch,
) {
    match node[Direction::Right].as_deref_mut() {
        Some(next) => swap_rightmost(next, key, watch),
        None => {
            trace!(from = *key, to = node.key, "swapping entry with predecessor");
            mem::swap(&mut node.key, key);
            mem::swap(&mut node.watch, watch);
        }
    }
}

/// Repairs a one-black deficit in the `dir` subtree of `root`.
fn rebalance(
    root: Box<Node>,
    dir: Direction,
) -> (Box<Node>, bool) {
    if !is_red(&root[!dir]) {
        return rebalance_black_sibling(root, dir);
    }

    // Red sibling: rotate so the deficient side gets a black sibling.
    trace!(key = root.key, ?dir, "rotating red sibling");
    let mut top = rotate_single(root, dir);
    let resolved = match top[dir].take() {
        Some(parent) => {
            let (parent, resolved) = rebalance_black_sibling(parent, dir);
            top[dir] = Some(parent);
            resolved
        }
        None => false,
    };
    (top, resolved)
}

fn rebalance_black_sibling(
    mut parent: Box<Node>,
    dir: Direction,
) -> (Box<Node>, bool) {
    let saved_color = parent.color;

    let Some(sibling) = parent[!dir].as_deref_mut() else {
        return (parent, false);
    };

    if !is_red(&sibling[Direction::Left]) && !is_red(&sibling[Direction::Right]) {
        sibling.color = Color::Red;
        parent.color = Color::Black;
        return (parent, saved_color == Color::Red);
    }

    let far_red = is_red(&sibling[!dir]);
    let mut top = if far_red {
        rotate_single(parent, dir)
    } else {
        rotate_double(parent, dir)
    };

    top.color = saved_color;
    paint(&mut top[Direction::Left], Color::Black);
    paint(&mut top[Direction::Right], Color::Black);
    (top, true)
}
