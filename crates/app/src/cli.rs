use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use symhuff_core::{Codec, HuffmanCodec};

/// symhuff: lossless compression of UTF-8 text with static Huffman coding
///
/// Every output file is self-describing: it carries the Huffman tree it was
/// encoded with, so decoding needs nothing but the file.
#[derive(Parser, Debug)]
#[command(name = "symhuff")]
#[command(author, version, about = "Compress and decompress UTF-8 text with Huffman coding", long_about = None)]
pub struct Cli {
    /// Compression algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::Huffman, global = true)]
    pub algorithm: Algorithm,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print the resolved configuration before running
    #[arg(long, global = true)]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress a UTF-8 text file into a container.
    Encode {
        /// Text file to compress
        input: PathBuf,

        /// Container to write (default: <INPUT>.huff)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not print the summary
        #[arg(short, long)]
        quiet: bool,

        /// Print the summary as key=value lines
        #[arg(long, conflicts_with = "quiet")]
        stats_text: bool,
    },

    /// Decompress a container back into text.
    Decode {
        /// Container to read
        input: PathBuf,

        /// Text file to write (default: <INPUT> without .huff, else <INPUT>.out)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a container's header fields and code table.
    Inspect {
        /// Container to read
        input: PathBuf,
    },

    /// Generate 10^MAGNITUDE symbols of test data.
    Generate {
        /// Power of ten of the number of symbols (0-9)
        magnitude: u32,

        /// Random seed (default: time-based)
        #[arg(long)]
        seed: Option<u64>,

        /// Mix runs, a small alphabet and multi-byte text instead of plain letters
        #[arg(long)]
        mixed: bool,

        /// File to write (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Available compression algorithms.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Huffman,
}

impl Algorithm {
    pub fn codec(self) -> Box<dyn Codec> {
        match self {
            Algorithm::Huffman => Box::new(HuffmanCodec::new()),
        }
    }
}
