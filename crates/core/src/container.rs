//! Container layout: header, serialized tree, encoded content.
//!
//! # Format
//!
//! ```text
//! +---------------------------+
//! | tree_size_bytes (13 bits) |  bits 0-12, MSB-first
//! | padding_bits    (3 bits)  |  bits 13-15
//! +---------------------------+
//! | serialized tree           |  zero-padded to a byte boundary,
//! | (tree_size_bytes bytes)   |  see `tree_codec`
//! +---------------------------+
//! | encoded content           |  concatenated codes, followed by
//! | (padding_bits zero bits)  |  padding_bits zero bits
//! +---------------------------+
//! ```
//!
//! The whole container is a whole number of bytes. An empty input encodes to
//! the bare header `[0x00, 0x00]`.

use crate::bitio::{BitReader, BitWriter};
use crate::code_table::Code;
use crate::error::{BitIoError, ContainerError, HuffmanError, Result};
use crate::tree_codec::TreeSource;

/// Size of the fixed header in bits.
pub const HEADER_BITS: usize = 16;

/// Width of the tree-size header field.
pub const TREE_SIZE_BITS: usize = 13;

/// Width of the padding header field.
pub const PADDING_BITS: usize = 3;

/// Largest serialized tree the header can describe, in bytes.
pub const MAX_TREE_BYTES: usize = (1 << TREE_SIZE_BITS) - 1;

/// The two header fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    /// Serialized tree length in bytes, including its own padding
    pub tree_size_bytes: u16,
    /// Zero bits appended after the content (0-7)
    pub padding_bits: u8,
}

impl Header {
    pub fn to_bytes(self) -> [u8; 2] {
        let packed = (self.tree_size_bytes << PADDING_BITS) | u16::from(self.padding_bits & 0b111);
        packed.to_be_bytes()
    }

    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        let packed = u16::from_be_bytes(bytes);
        Self {
            tree_size_bytes: packed >> PADDING_BITS,
            padding_bits: (packed & 0b111) as u8,
        }
    }
}

/// Assembles a container bit by bit.
///
/// The first 16 bits are reserved on construction and filled in by
/// [`ContainerWriter::finish`].
#[derive(Debug, Clone)]
pub struct ContainerWriter {
    bits: BitWriter,
    header: Header,
}

impl ContainerWriter {
    pub fn new() -> Self {
        let mut bits = BitWriter::new();
        bits.write_bytes(&[0, 0]);
        Self {
            bits,
            header: Header::default(),
        }
    }

    /// Record the serialized tree size.
    ///
    /// # Errors
    /// `HuffmanError::TreeTooLarge` if `bytes` does not fit in 13 bits.
    pub fn set_tree_size(&mut self, bytes: usize) -> Result<()> {
        if bytes > MAX_TREE_BYTES {
            return Err(HuffmanError::TreeTooLarge {
                size: bytes,
                max: MAX_TREE_BYTES,
            }
            .into());
        }
        self.header.tree_size_bytes = bytes as u16;
        Ok(())
    }

    /// Pad the tree region to a byte boundary and record its size.
    ///
    /// Must be called once, right after the tree has been written.
    pub fn end_tree(&mut self) -> Result<usize> {
        self.bits.align();
        let tree_bytes = self.bits.byte_len() - HEADER_BITS / 8;
        self.set_tree_size(tree_bytes)?;
        Ok(tree_bytes)
    }

    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        self.bits.write_bits(value, count)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bits.write_bytes(bytes);
    }

    pub fn write_code(&mut self, code: &Code) {
        code.write_to(&mut self.bits);
    }

    /// Direct access for the tree serializer.
    pub fn bit_writer(&mut self) -> &mut BitWriter {
        &mut self.bits
    }

    /// Bits written so far, header included.
    pub fn bit_len(&self) -> usize {
        self.bits.bit_len()
    }

    /// Pad to a byte boundary, fill in the header and return the container.
    pub fn finish(mut self) -> (Header, Vec<u8>) {
        self.header.padding_bits = self.bits.align();
        let mut bytes = self.bits.finish();
        bytes[..2].copy_from_slice(&self.header.to_bytes());
        log::trace!(
            "container header: tree_size_bytes={} padding_bits={} total_bytes={}",
            self.header.tree_size_bytes,
            self.header.padding_bits,
            bytes.len()
        );
        (self.header, bytes)
    }
}

impl Default for ContainerWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a container and hands out its regions.
#[derive(Debug, Clone)]
pub struct ContainerReader<'a> {
    bits: BitReader<'a>,
    header: Header,
    /// First content bit (16 + tree_size_bytes * 8)
    content_start: usize,
    /// One past the last content bit
    content_end: usize,
}

impl<'a> ContainerReader<'a> {
    /// Parse the header and validate the region boundaries.
    ///
    /// # Errors
    /// - `ContainerError::InsufficientContainerData` if fewer than 17 bits are present
    /// - `ContainerError::CorruptContainer` if the header points past the data
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let len_bits = data.len() * 8;
        if len_bits <= HEADER_BITS {
            return Err(ContainerError::InsufficientContainerData { bits: len_bits }.into());
        }

        let header = Header::from_bytes([data[0], data[1]]);
        let content_start = HEADER_BITS + usize::from(header.tree_size_bytes) * 8;
        if content_start > len_bits {
            return Err(ContainerError::CorruptContainer(format!(
                "tree size {} bytes exceeds the {} bytes after the header",
                header.tree_size_bytes,
                data.len() - HEADER_BITS / 8
            ))
            .into());
        }
        let content_end = len_bits - usize::from(header.padding_bits);
        if content_end < content_start {
            return Err(ContainerError::CorruptContainer(format!(
                "{} padding bits overlap the tree region",
                header.padding_bits
            ))
            .into());
        }

        let mut bits = BitReader::new(data);
        bits.seek(HEADER_BITS)?;
        Ok(Self {
            bits,
            header,
            content_start,
            content_end,
        })
    }

    pub fn header(&self) -> Header {
        self.header
    }

    /// Number of real content bits, padding excluded.
    pub fn content_bit_len(&self) -> usize {
        self.content_end - self.content_start
    }

    /// Move the cursor to the first content bit.
    pub fn jump_to_content(&mut self) -> Result<()> {
        self.bits.seek(self.content_start)
    }

    /// Consume the reader, yielding exactly the content bits.
    pub fn content_bits(mut self) -> Result<ContentBits<'a>> {
        self.jump_to_content()?;
        Ok(ContentBits {
            bits: self.bits,
            end: self.content_end,
        })
    }

    /// Tree reads may not cross into the content region.
    fn ensure_tree_bits(&self, count: usize) -> Result<()> {
        if self.bits.position() + count > self.content_start {
            return Err(BitIoError::UnexpectedEof.into());
        }
        Ok(())
    }
}

impl TreeSource for ContainerReader<'_> {
    fn read_is_leaf(&mut self) -> Result<bool> {
        self.ensure_tree_bits(1)?;
        self.bits.read_bit()
    }

    fn read_bits(&mut self, count: usize) -> Result<u64> {
        self.ensure_tree_bits(count)?;
        self.bits.read_bits(count)
    }

    fn read_symbol_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        self.ensure_tree_bits(len * 8)?;
        self.bits.read_bytes(len)
    }
}

/// Finite iterator over the content region of a container.
#[derive(Debug, Clone)]
pub struct ContentBits<'a> {
    bits: BitReader<'a>,
    end: usize,
}

impl Iterator for ContentBits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.bits.position() >= self.end {
            return None;
        }
        self.bits.read_bit().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end.saturating_sub(self.bits.position());
        (left, Some(left))
    }
}

impl ExactSizeIterator for ContentBits<'_> {}
