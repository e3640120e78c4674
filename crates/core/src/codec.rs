//! Encode/decode orchestration.
//!
//! [`HuffmanCodec`] holds no state: every call builds its own tree, code
//! table and buffers, so one codec can serve any number of threads.
//!
//! # Encode
//! 1. Empty input short-circuits to the bare 16-bit header.
//! 2. Count symbols, build the tree, derive the code table.
//! 3. Reject trees that do not fit the 13-bit size field.
//! 4. Write tree, pad it, write every symbol's code, pad and fill the header.
//!
//! # Decode
//! 1. Containers with no more than a header decode to the empty string.
//! 2. Read the tree from the tree region.
//! 3. Walk from the root per content bit (`0` left, `1` right), emitting a
//!    symbol and restarting at every leaf.

use crate::code_table::CodeTable;
use crate::container::{ContainerReader, ContainerWriter, Header, MAX_TREE_BYTES};
use crate::error::{ContainerError, Error, HuffmanError, Result};
use crate::queue::SymbolQueue;
use crate::stats::CodecStats;
use crate::store::FileStore;
use crate::tree::HuffmanTree;
use crate::tree_codec::{read_tree, serialized_bit_len, write_tree};
use std::path::Path;

/// A symbol codec that produces self-describing containers.
pub trait Codec {
    /// Short name used for algorithm selection.
    fn name(&self) -> &'static str;

    fn encode(&self, input: &str) -> Result<Vec<u8>>;

    fn decode(&self, data: &[u8]) -> Result<String>;
}

/// Static Huffman coding over Unicode code points.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec;

/// What a container says about itself.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub header: Header,
    pub total_bytes: usize,
    pub content_bits: usize,
    pub table: CodeTable,
}

impl HuffmanCodec {
    pub fn new() -> Self {
        Self
    }

    /// Encode `input` into a container.
    ///
    /// # Errors
    /// `HuffmanError::TreeTooLarge` if the alphabet needs more than 8191 tree bytes.
    pub fn encode(&self, input: &str) -> Result<Vec<u8>> {
        self.encode_with_stats(input).map(|(bytes, _)| bytes)
    }

    /// Encode `input` and report what the container looks like.
    pub fn encode_with_stats(&self, input: &str) -> Result<(Vec<u8>, CodecStats)> {
        let mut stats = CodecStats::new();
        stats.input_bytes = input.len() as u64;

        if input.is_empty() {
            let (header, bytes) = ContainerWriter::new().finish();
            stats.complete(header, bytes.len());
            return Ok((bytes, stats));
        }

        let queue = SymbolQueue::from_symbols(input);
        stats.distinct_symbols = queue.len() as u64;
        let tree = HuffmanTree::from_queue(queue)?;
        let table = CodeTable::from_tree(&tree);
        stats.input_symbols = tree.weight();

        let tree_bytes = serialized_bit_len(&tree).div_ceil(8);
        if tree_bytes > MAX_TREE_BYTES {
            return Err(HuffmanError::TreeTooLarge {
                size: tree_bytes,
                max: MAX_TREE_BYTES,
            }
            .into());
        }

        let mut writer = ContainerWriter::new();
        write_tree(&tree, writer.bit_writer())?;
        writer.end_tree()?;

        let content_start = writer.bit_len();
        for symbol in input.chars() {
            let code = table
                .get(symbol)
                .ok_or(HuffmanError::UnknownSymbol(symbol))?;
            writer.write_code(code);
        }
        stats.content_bits = (writer.bit_len() - content_start) as u64;

        let (header, bytes) = writer.finish();
        stats.complete(header, bytes.len());
        log::debug!(
            "encoded {} symbols ({} distinct) into {} bytes, tree {} bytes",
            stats.input_symbols,
            stats.distinct_symbols,
            bytes.len(),
            header.tree_size_bytes
        );
        Ok((bytes, stats))
    }

    /// Decode a container back into its symbols.
    ///
    /// # Errors
    /// - `HuffmanError::MalformedUtf8Symbol` for invalid leaf bytes
    /// - `HuffmanError::CorruptTree` / `ContainerError::CorruptContainer` for broken structure
    /// - `HuffmanError::TruncatedContent` if the content ends mid-code
    pub fn decode(&self, data: &[u8]) -> Result<String> {
        let Some(mut reader) = open(data)? else {
            return Ok(String::new());
        };

        let tree =
            read_tree(&mut reader).inspect_err(|e| log::warn!("rejecting container: {e}"))?;
        let content = reader.content_bits()?;
        if content.len() == 0 {
            return Ok(String::new());
        }

        let root = tree.root();
        if tree.node(root).is_leaf() {
            let reason = "root is a leaf but content is present".to_string();
            return Err(HuffmanError::CorruptTree(reason).into());
        }

        let mut output = String::new();
        let mut decoded = 0usize;
        let mut cursor = root;
        for bit in content {
            let Some(next) = tree.child(cursor, bit) else {
                let reason = "walk stepped below a leaf".to_string();
                return Err(HuffmanError::CorruptTree(reason).into());
            };
            cursor = next;
            if let Some(symbol) = tree.node(cursor).symbol() {
                output.push(symbol);
                decoded += 1;
                cursor = root;
            }
        }

        if cursor != root {
            log::warn!("content ended mid-code after {decoded} symbols");
            return Err(HuffmanError::TruncatedContent { decoded }.into());
        }

        log::debug!("decoded {decoded} symbols from {} bytes", data.len());
        Ok(output)
    }

    /// Header fields and code table of a container.
    pub fn inspect(&self, data: &[u8]) -> Result<Inspection> {
        let Some(mut reader) = open(data)? else {
            return Ok(Inspection {
                header: Header::default(),
                total_bytes: data.len(),
                content_bits: 0,
                table: CodeTable::default(),
            });
        };

        let tree = read_tree(&mut reader)?;
        Ok(Inspection {
            header: reader.header(),
            total_bytes: data.len(),
            content_bits: reader.content_bit_len(),
            table: CodeTable::from_tree(&tree),
        })
    }

    /// Encode `input` and save the container at `path`.
    ///
    /// Nothing is written if encoding fails.
    pub fn encode_to<S: FileStore + ?Sized>(
        &self,
        store: &S,
        path: &Path,
        input: &str,
    ) -> Result<CodecStats> {
        let (bytes, stats) = self.encode_with_stats(input)?;
        store.save(path, &bytes)?;
        Ok(stats)
    }

    /// Load the container at `path` and decode it.
    pub fn decode_from<S: FileStore + ?Sized>(&self, store: &S, path: &Path) -> Result<String> {
        let bytes = store.load(path)?;
        self.decode(&bytes)
    }
}

impl Codec for HuffmanCodec {
    fn name(&self) -> &'static str {
        "huffman"
    }

    fn encode(&self, input: &str) -> Result<Vec<u8>> {
        HuffmanCodec::encode(self, input)
    }

    fn decode(&self, data: &[u8]) -> Result<String> {
        HuffmanCodec::decode(self, data)
    }
}

/// Open a container; `None` when it holds nothing beyond a header.
fn open(data: &[u8]) -> Result<Option<ContainerReader<'_>>> {
    match ContainerReader::new(data) {
        Ok(reader) => Ok(Some(reader)),
        Err(Error::Container(ContainerError::InsufficientContainerData { .. })) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn round_trip(input: &str) -> String {
        let codec = HuffmanCodec::new();
        codec.decode(&codec.encode(input).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_input_is_bare_header() {
        let bytes = HuffmanCodec::new().encode("").unwrap();
        assert_eq!(bytes, vec![0, 0]);
        assert_eq!(HuffmanCodec::new().decode(&bytes).unwrap(), "");
    }

    #[test]
    fn test_short_containers_decode_empty() {
        let codec = HuffmanCodec::new();
        assert_eq!(codec.decode(&[]).unwrap(), "");
        assert_eq!(codec.decode(&[0]).unwrap(), "");
        assert_eq!(codec.decode(&[0, 0]).unwrap(), "");
    }

    #[test]
    fn test_abaa_layout() {
        let bytes = HuffmanCodec::new().encode("abaa").unwrap();
        // header | 0 1 00 'a' 1 00 'b' + 1 pad | 0 1 0 0 + 4 pad
        let header = Header::from_bytes([bytes[0], bytes[1]]);
        assert_eq!(header.tree_size_bytes, 3);
        assert_eq!(header.padding_bits, 4);
        assert_eq!(bytes.len(), 6);
        assert_eq!(bytes[5], 0b0100_0000);
        assert_eq!(round_trip("abaa"), "abaa");
    }

    #[test]
    fn test_sample_sentence() {
        let input = "this is a test string";
        let bytes = HuffmanCodec::new().encode(input).unwrap();

        let header = Header::from_bytes([bytes[0], bytes[1]]);
        assert!(usize::from(header.tree_size_bytes) <= MAX_TREE_BYTES);
        assert_eq!(HuffmanCodec::new().decode(&bytes).unwrap(), input);
    }

    #[test]
    fn test_single_symbol_round_trip() {
        assert_eq!(round_trip("aaaaaaa"), "aaaaaaa");
        assert_eq!(round_trip("x"), "x");
        assert_eq!(round_trip("\0\0\0"), "\0\0\0");
    }

    #[test]
    fn test_single_symbol_stats_ignore_placeholder() {
        let (_, stats) = HuffmanCodec::new().encode_with_stats("zzzz").unwrap();
        assert_eq!(stats.distinct_symbols, 1);
        assert_eq!(stats.content_bits, 4);
    }

    #[test]
    fn test_multibyte_round_trip() {
        let input = "naïve café — 日本語 𝄞𝄞 ✓";
        assert_eq!(round_trip(input), input);
    }

    #[test]
    fn test_deterministic() {
        let codec = HuffmanCodec::new();
        let input = "determinism matters for interoperability";
        assert_eq!(codec.encode(input).unwrap(), codec.encode(input).unwrap());
    }

    #[test]
    fn test_stats() {
        let (bytes, stats) = HuffmanCodec::new().encode_with_stats("abaa").unwrap();
        assert_eq!(stats.input_symbols, 4);
        assert_eq!(stats.distinct_symbols, 2);
        assert_eq!(stats.tree_bytes, 3);
        assert_eq!(stats.content_bits, 4);
        assert_eq!(stats.padding_bits, 4);
        assert_eq!(stats.container_bytes, bytes.len() as u64);
    }

    #[test]
    fn test_truncated_content() {
        // codes: c=0, b=10, a=11; content 0 0 10 11
        let mut bytes = HuffmanCodec::new().encode("ccab").unwrap();
        let mut header = Header::from_bytes([bytes[0], bytes[1]]);
        // Claim one more padding bit so the last code is cut short.
        header.padding_bits += 1;
        bytes[..2].copy_from_slice(&header.to_bytes());

        let result = HuffmanCodec::new().decode(&bytes);
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::TruncatedContent { .. }))
        ));
    }

    #[test]
    fn test_leaf_root_with_content_is_corrupt() {
        // tree: 1 00 'a' (1 byte + 3 bits -> 2 bytes), content: one byte
        let mut writer = ContainerWriter::new();
        writer.write_bits(0b100, 3).unwrap();
        writer.write_bytes(b"a");
        writer.end_tree().unwrap();
        writer.write_bits(0, 8).unwrap();
        let (_, bytes) = writer.finish();

        assert!(matches!(
            HuffmanCodec::new().decode(&bytes),
            Err(Error::Huffman(HuffmanError::CorruptTree(_)))
        ));
    }

    #[test]
    fn test_inspect() {
        let codec = HuffmanCodec::new();
        let info = codec.inspect(&codec.encode("abaa").unwrap()).unwrap();
        assert_eq!(info.header.tree_size_bytes, 3);
        assert_eq!(info.content_bits, 4);
        assert_eq!(info.table.len(), 2);

        let empty = codec.inspect(&[0, 0]).unwrap();
        assert!(empty.table.is_empty());
    }

    #[test]
    fn test_store_round_trip() {
        let store = MemoryStore::new();
        let codec = HuffmanCodec::new();
        let path = Path::new("sample.huff");

        codec.encode_to(&store, path, "abaa").unwrap();
        assert_eq!(codec.decode_from(&store, path).unwrap(), "abaa");
    }

    #[test]
    fn test_codec_trait_dispatch() {
        let codec: Box<dyn Codec> = Box::new(HuffmanCodec::new());
        assert_eq!(codec.name(), "huffman");
        let bytes = codec.encode("trait objects").unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), "trait objects");
    }
}
