//! Prefix code derivation.
//!
//! A depth-first walk from the root appends `0` for a left step and `1` for a
//! right step. Every code is a root-to-leaf path, so no code is a prefix of
//! another.

use crate::bitio::BitWriter;
use crate::tree::{HuffmanTree, Node, NodeId};
use std::collections::BTreeMap;
use std::fmt;

/// The bit string assigned to one symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, prefix: &Code) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Append this code to a bit writer.
    pub fn write_to(&self, writer: &mut BitWriter) {
        for &bit in &self.0 {
            writer.write_bit(bit);
        }
    }

    fn extended(&self, bit: bool) -> Code {
        let mut bits = Vec::with_capacity(self.0.len() + 1);
        bits.extend_from_slice(&self.0);
        bits.push(bit);
        Code(bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Code {
    type Err = char;

    /// Parse a string of `0`/`1`; the error is the first offending character.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(other),
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Code)
    }
}

/// Mapping from symbol to code, derived from one tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, Code>,
}

impl CodeTable {
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack: Vec<(NodeId, Code)> = vec![(tree.root(), Code::default())];

        while let Some((id, code)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    codes.insert(*symbol, code);
                }
                Node::Internal { left, right, .. } => {
                    stack.push((*right, code.extended(true)));
                    stack.push((*left, code.extended(false)));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: char) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(symbol, code)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Code)> {
        self.codes.iter().map(|(symbol, code)| (*symbol, code))
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<String> = self.codes.values().map(Code::to_string).collect();
        codes.sort();
        // After sorting, a prefix sorts immediately before some code it prefixes.
        codes.windows(2).all(|pair| !pair[1].starts_with(&pair[0]))
    }

    /// Encoded length in bits of `symbols` under this table, if every symbol has a code.
    pub fn encoded_bit_len(&self, symbols: &str) -> Option<usize> {
        symbols
            .chars()
            .map(|symbol| self.get(symbol).map(Code::len))
            .sum()
    }
}
