use super::node::Color;
use super::node::Direction;
use super::node::Key;
use super::node::Node;

/// In-order walk over `(key, color)` pairs.
///
/// Keeps its own stack of pending ancestors, so the walk never recurses.
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(
        root: Option<&'a Node>,
        len: usize,
    ) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.descend_left(root);
        iter
    }

    fn descend_left(
        &mut self,
        mut link: Option<&'a Node>,
    ) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node[Direction::Left].as_deref();
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = (Key, Color);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node[Direction::Right].as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some((node.key, node.color))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
