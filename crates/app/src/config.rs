//! Resolved configuration for one symhuff run.
//!
//! Turns parsed command-line arguments into concrete paths, a seed and a log
//! level. Every default is filled in here so `--print-config` shows exactly
//! what will run.

use crate::cli::{Algorithm, Cli, Command};
use log::LevelFilter;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension given to containers when no output path is supplied.
pub const CONTAINER_EXTENSION: &str = "huff";

/// What the run does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Encode { print_stats: bool, stats_text: bool },
    Decode,
    Inspect,
    Generate { magnitude: u32, mixed: bool },
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub algorithm: Algorithm,
    pub mode: Mode,

    // === Files ===
    /// Input path (None for generate)
    pub input: Option<PathBuf>,

    /// Output path (None = stdout for generate)
    pub output: Option<PathBuf>,

    // === Behavior ===
    /// Seed for generated data
    pub seed: u64,

    pub log_level: LevelFilter,

    pub print_config: bool,
}

impl Config {
    /// Resolve defaults from parsed arguments.
    pub fn from_cli(cli: Cli) -> Self {
        let log_level = match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        let (mode, input, output, seed) = match cli.command {
            Command::Encode {
                input,
                output,
                quiet,
                stats_text,
            } => {
                let output = output.unwrap_or_else(|| default_encode_output(&input));
                let mode = Mode::Encode {
                    print_stats: !quiet,
                    stats_text,
                };
                (mode, Some(input), Some(output), None)
            }
            Command::Decode { input, output } => {
                let output = output.unwrap_or_else(|| default_decode_output(&input));
                (Mode::Decode, Some(input), Some(output), None)
            }
            Command::Inspect { input } => (Mode::Inspect, Some(input), None, None),
            Command::Generate {
                magnitude,
                seed,
                mixed,
                output,
            } => (Mode::Generate { magnitude, mixed }, None, output, seed),
        };

        Config {
            algorithm: cli.algorithm,
            mode,
            input,
            output,
            seed: seed.unwrap_or_else(time_seed),
            log_level,
            print_config: cli.print_config,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        let show = |path: &Option<PathBuf>| {
            path.as_ref()
                .map_or_else(|| "(stdout)".to_string(), |p| p.display().to_string())
        };

        println!("=== Configuration ===");
        println!("Algorithm: {:?}", self.algorithm);
        println!("Mode: {:?}", self.mode);
        println!("Input:  {}", show(&self.input));
        println!("Output: {}", show(&self.output));
        if matches!(self.mode, Mode::Generate { .. }) {
            println!("Seed: {}", self.seed);
        }
        println!("Log level: {}", self.log_level);
        println!();
    }
}

/// `notes.txt` -> `notes.txt.huff`
pub fn default_encode_output(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(CONTAINER_EXTENSION);
    PathBuf::from(name)
}

/// `notes.txt.huff` -> `notes.txt`, anything else -> `<input>.out`
pub fn default_decode_output(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == CONTAINER_EXTENSION) {
        input.with_extension("")
    } else {
        let mut name = OsString::from(input.as_os_str());
        name.push(".out");
        PathBuf::from(name)
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
