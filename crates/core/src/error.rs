//! Error types for the symhuff codec.
//!
//! Every operation returns a structured error instead of panicking. Errors are
//! grouped by the layer that raises them and folded into one top-level
//! [`Error`] through `#[from]` conversions.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all codec operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Tree construction, code assignment or content decoding failed
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// The container layout is malformed
    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    /// The file store could not load or save a container
    #[error("file store error: {0}")]
    Store(#[from] StoreError),

    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),

    /// Attempted to move the cursor outside the buffer
    #[error("bit position {position} is outside a {len}-bit buffer")]
    SeekOutOfRange { position: usize, len: usize },
}

/// Errors raised while building, serializing or walking the Huffman tree.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// The generic tree builder was handed zero symbols
    #[error("cannot build a huffman tree from empty input")]
    EmptyInputEncoding,

    /// Serialized tree does not fit the 13-bit size field
    #[error("serialized tree needs {size} bytes, the container allows at most {max}")]
    TreeTooLarge { size: usize, max: usize },

    /// Leaf bytes in a serialized tree are not exactly one UTF-8 code point
    #[error("leaf symbol bytes {bytes:02x?} are not a single UTF-8 code point")]
    MalformedUtf8Symbol { bytes: Vec<u8> },

    /// Serialized tree ended before its structure was complete
    #[error("corrupt huffman tree: {0}")]
    CorruptTree(String),

    /// Content bits ended in the middle of a code
    #[error("content ended mid-code after {decoded} symbols")]
    TruncatedContent { decoded: usize },

    /// Input symbol has no entry in the code table
    #[error("symbol {0:?} has no code")]
    UnknownSymbol(char),
}

/// Container layout errors.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Container is too short to hold a header and any payload
    #[error("container holds {bits} bits, at least 17 are required")]
    InsufficientContainerData { bits: usize },

    /// Header fields point outside the container
    #[error("corrupt container: {0}")]
    CorruptContainer(String),
}

/// File store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Nothing exists at the requested path
    #[error("no such file: {}", path.display())]
    NotFound { path: PathBuf },

    /// Writing the container failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading an existing file failed
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
