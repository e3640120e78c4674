//! symhuff-core: static Huffman coding of Unicode text into self-describing containers
//!
//! Input text is treated as a sequence of code points. The encoder builds a
//! Huffman tree with a deterministic tie-break, derives a prefix code, and
//! writes one container holding a 16-bit header, the serialized tree and the
//! encoded content. The decoder needs nothing but that container.
//!
//! # Architecture
//!
//! - `bitio`: MSB-first bit reading/writing
//! - `queue`: frequency counting and the min-priority queue
//! - `tree`: arena-backed tree and the merge loop
//! - `code_table`: code derivation
//! - `tree_codec`: tree (de)serialization
//! - `container`: header, padding and region bookkeeping
//! - `codec`: encode/decode orchestration
//! - `store`: the load/save collaborator
//! - `stats`: numbers about an encode run
//!
//! # Example
//! ```
//! use symhuff_core::HuffmanCodec;
//!
//! let codec = HuffmanCodec::new();
//! let container = codec.encode("this is a test string").unwrap();
//! assert_eq!(codec.decode(&container).unwrap(), "this is a test string");
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and recoverable
//! - **Deterministic**: the same input always yields the same bytes
//! - **Stateless**: every call owns its tree and buffers

pub mod bitio;
pub mod code_table;
pub mod codec;
pub mod container;
pub mod error;
pub mod queue;
pub mod stats;
pub mod store;
pub mod tree;
pub mod tree_codec;

// Re-export commonly used types
pub use code_table::{Code, CodeTable};
pub use codec::{Codec, HuffmanCodec, Inspection};
pub use container::{Header, MAX_TREE_BYTES};
pub use error::{Error, Result};
pub use stats::CodecStats;
pub use store::{FileStore, FsStore, MemoryStore};
pub use tree::HuffmanTree;
