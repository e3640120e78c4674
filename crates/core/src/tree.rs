//! Huffman tree construction.
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to their children by
//! [`NodeId`]. A tree built from a queue keeps every node the queue
//! allocated; a tree read back from a container holds only what the
//! serialized shape describes.
//!
//! # Merge rule
//!
//! Pop `A`, then `B`. The new node gets weight `A + B`, `left = B` and
//! `right = A`. The second-popped node always goes left and therefore gets
//! the `0` branch.
//!
//! # Single-symbol input
//!
//! With one distinct symbol the merge loop would never run and the root would
//! be a leaf. A weight-0 sibling is queued first, so the real symbol ends up
//! as the left child with code `0`. The sibling gets `1` and is never emitted.

use crate::error::{HuffmanError, Result};
use crate::queue::SymbolQueue;

/// Index of a node in a tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// One vertex of the tree. A node has either no children or exactly two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        weight: u64,
        symbol: char,
    },
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn symbol(&self) -> Option<char> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// A complete Huffman tree.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Count the symbols of `input` and build its tree.
    ///
    /// # Errors
    /// `HuffmanError::EmptyInputEncoding` if `input` is empty.
    pub fn build(input: &str) -> Result<Self> {
        Self::from_queue(SymbolQueue::from_symbols(input))
    }

    /// Merge queue entries until one root remains.
    pub fn from_queue(mut queue: SymbolQueue) -> Result<Self> {
        if queue.is_empty() {
            return Err(HuffmanError::EmptyInputEncoding.into());
        }

        if queue.len() == 1 {
            let sole = queue.peek().and_then(|(_, label)| label.chars().next());
            queue.push_leaf(placeholder_sibling(sole), 0);
        }

        while queue.len() > 1 {
            let (Some(first), Some(second)) = (queue.pop(), queue.pop()) else {
                break;
            };
            queue.push_merged(first, second);
        }

        let root = queue
            .pop()
            .map(|entry| entry.node)
            .ok_or(HuffmanError::EmptyInputEncoding)?;

        Ok(Self {
            nodes: queue.nodes,
            root,
        })
    }

    /// Assemble a tree from an arena, as the deserializer does.
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Step from `id` along a content bit: `false` goes left, `true` goes right.
    /// Returns `None` at a leaf.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.node(id) {
            Node::Internal { left, right, .. } => Some(if bit { *right } else { *left }),
            Node::Leaf { .. } => None,
        }
    }

    /// Total weight, i.e. the number of symbols the tree was built from.
    pub fn weight(&self) -> u64 {
        self.node(self.root).weight()
    }

    /// Number of leaves reachable from the root.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.node(id) {
                Node::Leaf { .. } => count += 1,
                Node::Internal { left, right, .. } => {
                    stack.push(*right);
                    stack.push(*left);
                }
            }
        }
        count
    }
}

/// Symbol for the sibling added to a single-symbol tree.
fn placeholder_sibling(sole: Option<char>) -> char {
    if sole == Some('\0') {
        '\u{1}'
    } else {
        '\0'
    }
}
