//! Binary serialization of the tree shape and its leaf symbols.
//!
//! # Grammar
//!
//! Pre-order, left subtree before right subtree:
//!
//! ```text
//! leaf     := 1 <len-1: 2 bits> <UTF-8 bytes of the symbol>
//! internal := 0 <left> <right>
//! ```
//!
//! The 2-bit length field limits a leaf to 1-4 UTF-8 bytes, i.e. one code
//! point. Weights are not stored; a deserialized tree carries weight 0
//! everywhere. The reader consumes exactly as many bits as the structure
//! needs, so padding after the tree is never interpreted.
//!
//! Both directions use explicit stacks, so tree depth is bounded by memory
//! rather than by the call stack.

use crate::bitio::{BitReader, BitWriter};
use crate::error::{Error, HuffmanError, Result};
use crate::tree::{HuffmanTree, Node, NodeId};

/// Width of the per-leaf length field.
pub const SYMBOL_LEN_BITS: usize = 2;

/// Source of the primitives the tree reader needs.
pub trait TreeSource {
    /// Read one structure bit: `true` for a leaf, `false` for an internal node.
    fn read_is_leaf(&mut self) -> Result<bool>;

    /// Read `count` bits as an unsigned integer.
    fn read_bits(&mut self, count: usize) -> Result<u64>;

    /// Read the raw UTF-8 bytes of one leaf symbol.
    fn read_symbol_bytes(&mut self, len: usize) -> Result<Vec<u8>>;
}

impl TreeSource for BitReader<'_> {
    fn read_is_leaf(&mut self) -> Result<bool> {
        self.read_bit()
    }

    fn read_bits(&mut self, count: usize) -> Result<u64> {
        BitReader::read_bits(self, count)
    }

    fn read_symbol_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        self.read_bytes(len)
    }
}

/// Append the serialized tree to `writer`. Does not pad.
pub fn write_tree(tree: &HuffmanTree, writer: &mut BitWriter) -> Result<()> {
    let mut stack = vec![tree.root()];
    let mut utf8 = [0u8; 4];

    while let Some(id) = stack.pop() {
        match tree.node(id) {
            Node::Leaf { symbol, .. } => {
                let bytes = symbol.encode_utf8(&mut utf8).as_bytes();
                writer.write_bit(true);
                writer.write_bits((bytes.len() - 1) as u64, SYMBOL_LEN_BITS)?;
                writer.write_bytes(bytes);
            }
            Node::Internal { left, right, .. } => {
                writer.write_bit(false);
                stack.push(*right);
                stack.push(*left);
            }
        }
    }

    Ok(())
}

/// Number of bits `write_tree` will emit for `tree`.
pub fn serialized_bit_len(tree: &HuffmanTree) -> usize {
    let mut bits = 0;
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        match tree.node(id) {
            Node::Leaf { symbol, .. } => bits += 1 + SYMBOL_LEN_BITS + 8 * symbol.len_utf8(),
            Node::Internal { left, right, .. } => {
                bits += 1;
                stack.push(*right);
                stack.push(*left);
            }
        }
    }
    bits
}

/// An internal node whose left subtree may already be complete.
struct Pending {
    left: Option<NodeId>,
}

/// Rebuild a tree from its serialized form.
///
/// # Errors
/// - `HuffmanError::MalformedUtf8Symbol` if leaf bytes are not one code point
/// - `HuffmanError::CorruptTree` if the bits run out before the structure closes
pub fn read_tree<S: TreeSource>(source: &mut S) -> Result<HuffmanTree> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut stack: Vec<Pending> = Vec::new();

    loop {
        if !source.read_is_leaf().map_err(truncated)? {
            stack.push(Pending { left: None });
            continue;
        }

        let symbol = read_symbol(source)?;
        let mut done = alloc(&mut nodes, Node::Leaf { weight: 0, symbol });

        // Close every internal node whose right subtree just completed.
        loop {
            let Some(pending) = stack.last_mut() else {
                return Ok(HuffmanTree::from_parts(nodes, done));
            };
            match pending.left {
                None => {
                    pending.left = Some(done);
                    break;
                }
                Some(left) => {
                    stack.pop();
                    done = alloc(
                        &mut nodes,
                        Node::Internal {
                            weight: 0,
                            left,
                            right: done,
                        },
                    );
                }
            }
        }
    }
}

fn read_symbol<S: TreeSource>(source: &mut S) -> Result<char> {
    let len = source.read_bits(SYMBOL_LEN_BITS).map_err(truncated)? as usize + 1;
    let bytes = source.read_symbol_bytes(len).map_err(truncated)?;

    let symbol = std::str::from_utf8(&bytes).ok().and_then(|text| {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Some(symbol),
            _ => None,
        }
    });
    symbol.ok_or_else(|| HuffmanError::MalformedUtf8Symbol { bytes }.into())
}

fn alloc(nodes: &mut Vec<Node>, node: Node) -> NodeId {
    let id = NodeId(nodes.len());
    nodes.push(node);
    id
}

/// Running out of bits inside the tree means the tree is corrupt.
fn truncated(err: Error) -> Error {
    match err {
        Error::BitIo(_) => {
            HuffmanError::CorruptTree("tree ended before its structure was complete".into()).into()
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_table::CodeTable;

    fn serialize(tree: &HuffmanTree) -> Vec<u8> {
        let mut writer = BitWriter::new();
        write_tree(tree, &mut writer).unwrap();
        writer.finish()
    }

    #[test]
    fn test_two_leaf_layout() {
        // 0 | 1 00 'a' | 1 00 'b'
        let tree = HuffmanTree::build("abaa").unwrap();
        let bytes = serialize(&tree);

        let mut expected = BitWriter::new();
        expected.write_bit(false);
        expected.write_bits(0b100, 3).unwrap();
        expected.write_bytes(b"a");
        expected.write_bits(0b100, 3).unwrap();
        expected.write_bytes(b"b");

        assert_eq!(bytes, expected.finish());
        assert_eq!(serialized_bit_len(&tree), 1 + 11 + 11);
        assert_eq!(bytes.len(), 3);
    }

    #[test]
    fn test_length_field_tracks_utf8_width() {
        // a:1 pops first and goes right, so the euro leaf is written first
        let tree = HuffmanTree::build("a€€").unwrap();
        let bytes = serialize(&tree);

        let mut reader = BitReader::new(&bytes);
        assert!(!reader.read_bit().unwrap());
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(2).unwrap(), 2);
        assert_eq!(reader.read_bytes(3).unwrap(), "€".as_bytes());
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(2).unwrap(), 0);
        assert_eq!(reader.read_bytes(1).unwrap(), b"a");
    }

    #[test]
    fn test_read_back_preserves_codes() {
        let tree = HuffmanTree::build("this is a test string with ümlauts and 𝄞").unwrap();
        let bytes = serialize(&tree);

        let decoded = read_tree(&mut BitReader::new(&bytes)).unwrap();
        assert_eq!(CodeTable::from_tree(&decoded), CodeTable::from_tree(&tree));
        assert_eq!(decoded.leaf_count(), tree.leaf_count());
    }

    #[test]
    fn test_reader_stops_at_structure_end() {
        let tree = HuffmanTree::build("abaa").unwrap();
        let bytes = serialize(&tree);

        let mut reader = BitReader::new(&bytes);
        read_tree(&mut reader).unwrap();
        assert_eq!(reader.position(), serialized_bit_len(&tree));
    }

    #[test]
    fn test_truncated_tree() {
        let tree = HuffmanTree::build("abcdef").unwrap();
        let bytes = serialize(&tree);

        let result = read_tree(&mut BitReader::new(&bytes[..bytes.len() - 2]));
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::CorruptTree(_)))
        ));
    }

    #[test]
    fn test_malformed_utf8_leaf() {
        // 1 01 0xC3 0x28: invalid two-byte sequence
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bytes(&[0xC3, 0x28]);
        let bytes = writer.finish();

        let result = read_tree(&mut BitReader::new(&bytes));
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::MalformedUtf8Symbol { .. }))
        ));
    }

    #[test]
    fn test_two_code_points_in_one_leaf() {
        // 1 01 'a' 'b': valid UTF-8 but two symbols
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bytes(b"ab");
        let bytes = writer.finish();

        let result = read_tree(&mut BitReader::new(&bytes));
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::MalformedUtf8Symbol { .. }))
        ));
    }

    #[test]
    fn test_deep_tree_does_not_recurse() {
        // Fibonacci-like weights give a maximally skewed tree.
        let mut input = String::new();
        let (mut a, mut b) = (1usize, 1usize);
        for symbol in ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l'] {
            input.extend(std::iter::repeat(symbol).take(a));
            (a, b) = (b, a + b);
        }

        let tree = HuffmanTree::build(&input).unwrap();
        let table = CodeTable::from_tree(&tree);
        assert_eq!(table.iter().map(|(_, code)| code.len()).max(), Some(11));

        let decoded = read_tree(&mut BitReader::new(&serialize(&tree))).unwrap();
        assert_eq!(CodeTable::from_tree(&decoded), table);
    }
}
