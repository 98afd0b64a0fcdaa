//! Red-black index of watched keys
//!
//! The tree owns every node through `Option<Box<Node>>` slots and every node
//! owns one [`Watch`]. Structural algorithms thread subtrees by value: each
//! recursive step consumes the old subtree root and hands back the new one.
//! At this level the root lives in a [`Tree`] that is only mutated through
//! `&mut`, so a stale root can never be used after an insert or delete has
//! rotated a different node to the top.
//!
//! Invariants held on return from every public operation:
//! 1. in-order keys are strictly ascending
//! 2. no red node has a red child
//! 3. every path to an empty slot crosses the same number of black nodes
//! 4. the root is black
//! 5. every node owns exactly one live watch bound to its own key

mod delete;
mod insert;
mod node;
mod rotate;
mod traverse;

pub use node::Color;
pub use node::Direction;
pub use node::Key;
pub use traverse::Iter;


use std::fmt;

use tracing::debug;
use tracing::warn;

use self::node::Link;
use self::node::Node;
use crate::Error;
use crate::Notifier;
use crate::OnReady;
use crate::Result;
use crate::Watch;

#[derive(Default)]
pub struct Tree {
    root: Link,
    len: usize,
}

impl Tree {
    /// The empty index
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Inserts `key` with a freshly registered watch bound to `on_ready`.
    ///
    /// Returns `Ok(false)` if the key is already indexed; the existing entry
    /// and its watch are left untouched and nothing is registered.
    ///
    /// # Errors
    /// Returns the notifier's error if the watch cannot be registered. The
    /// tree is unchanged in that case.
    pub fn insert<N: Notifier + ?Sized>(
        &mut self,
        key: Key,
        on_ready: OnReady,
        notifier: &mut N,
    ) -> Result<bool> {
        let inserted = insert::insert_r(&mut self.root, key, on_ready, notifier)?;
        if let Some(root) = self.root.as_deref_mut() {
            root.color = Color::Black;
        }

        if inserted {
            self.len += 1;
            debug!(key, len = self.len, "entry inserted");
        } else {
            debug!(key, "key already indexed, insert ignored");
        }
        Ok(inserted)
    }

    /// Removes `key`, releasing its watch. Absent keys are a no-op.
    pub fn delete<N: Notifier + ?Sized>(
        &mut self,
        key: Key,
        notifier: &mut N,
    ) -> bool {
        if !self.contains(key) {
            debug!(key, "key not indexed, delete ignored");
            return false;
        }

        let (root, _) = delete::delete_r(self.root.take(), key, notifier);
        self.root = root;
        if let Some(root) = self.root.as_deref_mut() {
            root.color = Color::Black;
        }

        self.len -= 1;
        debug!(key, len = self.len, "entry deleted");
        true
    }

    /// Destroys every node, releasing each watch once.
    pub fn clear<N: Notifier + ?Sized>(
        &mut self,
        notifier: &mut N,
    ) {
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node[Direction::Left].take());
            pending.extend(node[Direction::Right].take());
            node.destroy(notifier);
        }

        if self.len > 0 {
            debug!(released = self.len, "index cleared");
        }
        self.len = 0;
    }

    /// In-order `(key, color)` pairs. Each call starts a fresh walk.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref(), self.len)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn contains(
        &self,
        key: Key,
    ) -> bool {
        self.find(key).is_some()
    }

    /// Key and color of the root node
    pub fn root(&self) -> Option<(Key, Color)> {
        self.root.as_deref().map(|node| (node.key, node.color))
    }

    /// Edges on the longest root-to-leaf path; 0 for empty and single-node trees.
    pub fn height(&self) -> usize {
        fn levels(link: &Link) -> usize {
            match link.as_deref() {
                Some(node) => {
                    1 + levels(&node[Direction::Left]).max(levels(&node[Direction::Right]))
                }
                None => 0,
            }
        }
        levels(&self.root).saturating_sub(1)
    }

    /// The watch owned by the entry for `key`
    pub fn watch(
        &self,
        key: Key,
    ) -> Option<&Watch> {
        self.find(key).map(|node| &node.watch)
    }

    /// Checks every structural invariant and returns the black height.
    ///
    /// # Errors
    /// `Error::Corrupted` describing the first violation found.
    pub fn validate(&self) -> Result<usize> {
        if let Some(root) = self.root.as_deref() {
            if root.is_red() {
                return Err(Error::Corrupted(format!("root {} is red", root.key)));
            }
        }

        let mut count = 0;
        let black_height = check_subtree(&self.root, None, None, &mut count)?;
        if count != self.len {
            return Err(Error::Corrupted(format!(
                "tree holds {} nodes but tracks {}",
                count, self.len
            )));
        }
        Ok(black_height)
    }

    fn find(
        &self,
        key: Key,
    ) -> Option<&Node> {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            if node.key == key {
                return Some(node);
            }
            link = node[Direction::toward(node.key, key)].as_deref();
        }
        None
    }
}

fn check_subtree(
    link: &Link,
    lower: Option<Key>,
    upper: Option<Key>,
    count: &mut usize,
) -> Result<usize> {
    let Some(node) = link.as_deref() else {
        return Ok(0);
    };
    *count += 1;

    if lower.is_some_and(|lower| node.key <= lower) || upper.is_some_and(|upper| node.key >= upper)
    {
        return Err(Error::Corrupted(format!(
            "key {} out of order (bounds {:?}..{:?})",
            node.key, lower, upper
        )));
    }

    if node.is_red()
        && (node::is_red(&node[Direction::Left]) || node::is_red(&node[Direction::Right]))
    {
        return Err(Error::Corrupted(format!("red node {} has a red child", node.key)));
    }

    if node.watch.key() != node.key {
        return Err(Error::Corrupted(format!(
            "node {} owns the watch of key {}",
            node.key,
            node.watch.key()
        )));
    }

    let left = check_subtree(&node[Direction::Left], lower, Some(node.key), count)?;
    let right = check_subtree(&node[Direction::Right], Some(node.key), upper, count)?;
    if left != right {
        return Err(Error::Corrupted(format!(
            "black height differs below {}: {} left, {} right",
            node.key, left, right
        )));
    }

    Ok(left + usize::from(!node.is_red()))
}

impl fmt::Display for Tree {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (key, color) in self.iter() {
            write!(f, "\t{},{}", key, color)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Tree {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Tree").field("len", &self.len).field("root", &self.root()).finish()
    }
}

impl Drop for Tree {
    fn drop(&mut self) {
        if self.len > 0 {
            warn!(live = self.len, "index dropped without clearing, watches left registered");
        }
    }
}
