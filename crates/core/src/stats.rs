//! Statistics for a single encode run.
//!
//! Collected by `HuffmanCodec::encode_with_stats` and printed by the CLI.
//! Single-threaded; one instance per run.

use crate::container::Header;
use std::time::{Duration, Instant};

/// Observable numbers about one encoded container.
#[derive(Debug, Clone)]
pub struct CodecStats {
    // === Timing ===
    /// When encoding started
    pub start_time: Instant,

    /// When encoding finished (set on completion)
    pub end_time: Option<Instant>,

    // === Input ===
    /// Number of symbols (code points) in the input
    pub input_symbols: u64,

    /// UTF-8 size of the input
    pub input_bytes: u64,

    /// Number of distinct symbols, i.e. leaves in the tree
    pub distinct_symbols: u64,

    // === Container ===
    /// Serialized tree size from the header
    pub tree_bytes: u64,

    /// Encoded content length, padding excluded
    pub content_bits: u64,

    /// Zero bits after the content
    pub padding_bits: u8,

    /// Total container size
    pub container_bytes: u64,
}

impl CodecStats {
    /// Create empty stats with the start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_symbols: 0,
            input_bytes: 0,
            distinct_symbols: 0,
            tree_bytes: 0,
            content_bits: 0,
            padding_bits: 0,
            container_bytes: 0,
        }
    }

    /// Record the finished container and stop the clock.
    pub(crate) fn complete(&mut self, header: Header, container_bytes: usize) {
        self.tree_bytes = u64::from(header.tree_size_bytes);
        self.padding_bits = header.padding_bits;
        self.container_bytes = container_bytes as u64;
        self.end_time = Some(Instant::now());
    }

    /// Total duration (or elapsed so far if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Container size relative to the input size. 0.0 for empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.container_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Average code length of the content, tree excluded.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_symbols == 0 {
            0.0
        } else {
            self.content_bits as f64 / self.input_symbols as f64
        }
    }

    /// Input bytes encoded per second.
    pub fn throughput_bps(&self) -> f64 {
        let secs = self.duration().as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("=== Encode Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();
        println!("Input symbols: {}", self.input_symbols);
        println!("Input bytes: {}", self.input_bytes);
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!();
        println!("=== Container ===");
        println!("Tree: {} bytes", self.tree_bytes);
        println!("Content: {} bits (+{} padding)", self.content_bits, self.padding_bits);
        println!("Total: {} bytes", self.container_bytes);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("Bits per symbol: {:.3}", self.bits_per_symbol());
        println!();
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_symbols={}\n\
             input_bytes={}\n\
             distinct_symbols={}\n\
             tree_bytes={}\n\
             content_bits={}\n\
             padding_bits={}\n\
             container_bytes={}\n\
             compression_ratio={:.4}\n",
            self.duration().as_millis(),
            self.input_symbols,
            self.input_bytes,
            self.distinct_symbols,
            self.tree_bytes,
            self.content_bits,
            self.padding_bits,
            self.container_bytes,
            self.compression_ratio(),
        )
    }
}

impl Default for CodecStats {
    fn default() -> Self {
        Self::new()
    }
}
