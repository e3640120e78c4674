//! Frequency counting and the min-priority queue that feeds tree construction.
//!
//! Entries are ordered by `(weight, label)` ascending. The label of a leaf is
//! its symbol; the label of a merged node is the right child's label followed
//! by the left child's label. Labels of disjoint subtrees never collide, so
//! the ordering is total and the tree shape is reproducible.

use crate::tree::{Node, NodeId};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

/// Count occurrences of every distinct symbol.
pub fn frequencies(symbols: &str) -> BTreeMap<char, u64> {
    let mut counts = BTreeMap::new();
    for symbol in symbols.chars() {
        *counts.entry(symbol).or_insert(0) += 1;
    }
    counts
}

/// A queued node together with its tie-break label.
#[derive(Debug, Clone)]
pub(crate) struct QueueEntry {
    pub(crate) weight: u64,
    pub(crate) label: String,
    pub(crate) node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.label == other.label
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lowest (weight, label) first.
        // String order is byte order, which for UTF-8 equals code point order.
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.label.cmp(&self.label))
    }
}

/// Min-priority queue of tree nodes plus the arena that owns them.
#[derive(Debug, Default)]
pub struct SymbolQueue {
    pub(crate) nodes: Vec<Node>,
    pub(crate) heap: BinaryHeap<QueueEntry>,
}

impl SymbolQueue {
    /// Build one leaf per distinct symbol, weighted by its occurrence count.
    pub fn from_symbols(symbols: &str) -> Self {
        let mut queue = Self::default();
        for (symbol, count) in frequencies(symbols) {
            queue.push_leaf(symbol, count);
        }
        queue
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Weight and label of the next entry to be popped.
    pub fn peek(&self) -> Option<(u64, &str)> {
        self.heap.peek().map(|e| (e.weight, e.label.as_str()))
    }

    pub(crate) fn push_leaf(&mut self, symbol: char, weight: u64) {
        let node = self.alloc(Node::Leaf { weight, symbol });
        self.heap.push(QueueEntry {
            weight,
            label: symbol.to_string(),
            node,
        });
    }

    pub(crate) fn pop(&mut self) -> Option<QueueEntry> {
        self.heap.pop()
    }

    /// Merge two popped entries. `first` was popped first and becomes the
    /// right child; `second` becomes the left child.
    pub(crate) fn push_merged(&mut self, first: QueueEntry, second: QueueEntry) {
        let weight = first.weight + second.weight;
        let node = self.alloc(Node::Internal {
            weight,
            left: second.node,
            right: first.node,
        });

        let mut label = first.label;
        label.push_str(&second.label);
        self.heap.push(QueueEntry {
            weight,
            label,
            node,
        });
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }
}
