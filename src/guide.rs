//! Static binary-search skeleton over octet values.
//!
//! The guide tree is built once from the midpoint `128` with range `256`:
//! even values get children `value -/+ range/4` built with half the range,
//! odd values are leaves. That recurrence yields every value in `1..=255`
//! exactly once; `0` hangs off the left of the minimum leaf `1` so that the
//! tree covers the whole octet domain.
//!
//! The shape never depends on what has been inserted, so the comparison
//! sequence for a given octet is identical on every run and in every index.
//!
//! ```text
//!                   128
//!          64                 192
//!      32      96        160       224
//!     ...     ...        ...       ...
//!   1   3   5   7 ...              253 255
//!  /
//! 0
//! ```

use std::cmp::Ordering;

/// Midpoint of the root node.
pub const ROOT_VALUE: u16 = 128;

/// Size of the octet domain.
pub const DOMAIN_SIZE: u16 = 256;

/// Index of a node inside the tree arena.
pub type NodeId = usize;

/// One node of the guide tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideNode {
    pub value: u8,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl GuideNode {
    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Arena-backed guide tree. The root always has index 0.
#[derive(Debug, Clone)]
pub struct GuideTree {
    nodes: Vec<GuideNode>,
}

impl GuideTree {
    /// Build the guide tree.
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(DOMAIN_SIZE as usize),
        };
        tree.build(ROOT_VALUE, DOMAIN_SIZE);

        // 0 is the only octet the recurrence never produces.
        let mut min = tree.root();
        while let Some(left) = tree.nodes[min].left {
            min = left;
        }
        let zero = tree.push(0);
        tree.nodes[min].left = Some(zero);

        tree
    }

    fn push(&mut self, value: u8) -> NodeId {
        self.nodes.push(GuideNode {
            value,
            left: None,
            right: None,
        });
        self.nodes.len() - 1
    }

    fn build(&mut self, mid: u16, range: u16) -> NodeId {
        let id = self.push(mid as u8);
        if mid % 2 != 0 {
            return id;
        }

        let quarter = range / 4;
        let left = self.build(mid - quarter, range / 2);
        let right = self.build(mid + quarter, range / 2);
        self.nodes[id].left = Some(left);
        self.nodes[id].right = Some(right);
        id
    }

    /// Id of the root node.
    pub fn root(&self) -> NodeId {
        0
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> &GuideNode {
        &self.nodes[id]
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Locate the node holding `value`.
    pub fn find(&self, value: u8) -> Option<NodeId> {
        let mut current = Some(self.root());
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match value.cmp(&node.value) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Values compared on the way from the root to `value`, inclusive.
    pub fn comparison_path(&self, value: u8) -> Vec<u8> {
        let mut path = Vec::with_capacity(9);
        let mut current = Some(self.root());
        while let Some(id) = current {
            let node = &self.nodes[id];
            path.push(node.value);
            current = match value.cmp(&node.value) {
                Ordering::Equal => break,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        path
    }
}

impl Default for GuideTree {
    fn default() -> Self {
        Self::new()
    }
}
