/// Color of the link pointing into a node from its parent. Red links
/// bind a node to its left parent into one 2-3 tree 3-node.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Color {
    Red,
    Black,
}

/// Node corresponds to a single key in an [Oset][crate::Oset] instance.
///
/// `color` is for the link pointing into this node from its parent,
/// `size` counts the nodes of the subtree rooted here, this node
/// included.
#[derive(Clone)]
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) color: Color,                // store: link color
    pub(crate) size: usize,                 // store: subtree node count
    pub(crate) left: Option<Box<Node<K>>>,  // store: left child
    pub(crate) right: Option<Box<Node<K>>>, // store: right child
}

// Primary operations on a single node.
impl<K> Node<K> {
    // CREATE operation, new nodes come up red and singleton.
    pub(crate) fn new(key: K, color: Color) -> Box<Node<K>> {
        Box::new(Node {
            key,
            color,
            size: 1,
            left: None,
            right: None,
        })
    }

    #[inline]
    pub(crate) fn as_left_ref(&self) -> Option<&Node<K>> {
        self.left.as_deref()
    }

    #[inline]
    pub(crate) fn as_right_ref(&self) -> Option<&Node<K>> {
        self.right.as_deref()
    }

    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.color = Color::Red
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.color = Color::Black
    }

    #[inline]
    pub(crate) fn toggle_link(&mut self) {
        self.color = match self.color {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    #[inline]
    pub(crate) fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    pub(crate) fn as_key(&self) -> &K {
        &self.key
    }

    // Recompute subtree count from the children, called on the unwind
    // path after children have been relinked.
    #[inline]
    pub(crate) fn update_size(&mut self) {
        let l = self.left.as_ref().map_or(0, |n| n.size);
        let r = self.right.as_ref().map_or(0, |n| n.size);
        self.size = 1 + l + r;
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
