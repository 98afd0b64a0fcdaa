use std::fmt;
use std::ops::Index;
use std::ops::IndexMut;
use std::ops::Not;

use tracing::trace;

use crate::Notifier;
use crate::OnReady;
use crate::Result;
use crate::Watch;

/// Unique handle an entry is indexed by (a connection descriptor)
pub type Key = i32;

pub(crate) type Link = Option<Box<Node>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Color::Red => f.write_str("Red"),
            Color::Black => f.write_str("Black"),
        }
    }
}

/// Child slot of a node. `!dir` names the other side.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left = 0,
    Right = 1,
}

impl Direction {
    /// Side of a node holding `key` to find `target` in
    #[inline]
    pub(crate) fn toward(
        key: Key,
        target: Key,
    ) -> Self {
        if key < target {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

impl Not for Direction {
    type Output = Direction;

    fn not(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// One indexed entry: its key, its color and the watch it owns.
///
/// Children are owned exclusively through `link`. A node is only ever
/// created by insert and only ever freed through [`Node::destroy`], which
/// releases the watch in the same step.
pub(crate) struct Node {
    pub(crate) key: Key,
    pub(crate) color: Color,
    pub(crate) link: [Link; 2],
    pub(crate) watch: Watch,
}

impl Node {
    /// Registers a watch for `key` and wraps it in a new red node.
    ///
    /// Nothing is registered unless the caller already knows `key` is absent.
    pub(crate) fn create<N: Notifier + ?Sized>(
        key: Key,
        on_ready: OnReady,
        notifier: &mut N,
    ) -> Result<Box<Node>> {
        let watch = Watch::register(notifier, key, on_ready)?;
        Ok(Box::new(Node {
            key,
            color: Color::Red,
            link: [None, None],
            watch,
        }))
    }

    /// Frees a detached node, releasing its watch first.
    pub(crate) fn destroy<N: Notifier + ?Sized>(
        self: Box<Self>,
        notifier: &mut N,
    ) {
        debug_assert!(
            self.link.iter().all(Option::is_none),
            "destroying a node that still owns children"
        );
        trace!(key = self.key, "destroying node");

        let Node { watch, .. } = *self;
        watch.release(notifier);
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

impl Index<Direction> for Node {
    type Output = Link;

    #[inline]
    fn index(
        &self,
        dir: Direction,
    ) -> &Link {
        &self.link[dir as usize]
    }
}

impl IndexMut<Direction> for Node {
    #[inline]
    fn index_mut(
        &mut self,
        dir: Direction,
    ) -> &mut Link {
        &mut self.link[dir as usize]
    }
}

/// Empty slots count as black.
#[inline]
pub(crate) fn is_red(link: &Link) -> bool {
    link.as_deref().is_some_and(Node::is_red)
}

#[inline]
pub(crate) fn paint(
    link: &mut Link,
    color: Color,
) {
    if let Some(node) = link.as_deref_mut() {
        node.color = color;
    }
}
