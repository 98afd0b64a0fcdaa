use super::node::Color;
use super::node::Direction;
use super::node::Node;

/// Rotates `root` toward `dir`, promoting its child on the other side.
///
/// The promoted child's `dir` subtree moves under the old root. The old root
/// ends up red and the promoted node black.
///
/// # Panics
/// The child opposite `dir` must exist.
pub(crate) fn rotate_single(
    mut root: Box<Node>,
    dir: Direction,
) -> Box<Node> {
    let mut pivot = root[!dir]
        .take()
        .expect("rotation requires a child opposite the rotation direction");

    root[!dir] = pivot[dir].take();
    root.color = Color::Red;
    pivot.color = Color::Black;
    pivot[dir] = Some(root);

    pivot
}

/// Zig-zag fix: rotate the child opposite `dir` away from `dir`, then
/// rotate `root` toward `dir`.
pub(crate) fn rotate_double(
    mut root: Box<Node>,
    dir: Direction,
) -> Box<Node> {
    if let Some(child) = root[!dir].take() {
        root[!dir] = Some(rotate_single(child, !dir));
    }
    rotate_single(root, dir)
}
