mod cli;
mod config;
mod input_gen;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::Path;
use symhuff_core::{FileStore, FsStore, HuffmanCodec};

use cli::Cli;
use config::{Config, Mode};

fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse());

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .init();

    if config.print_config {
        config.print();
    }

    match config.mode {
        Mode::Encode {
            print_stats,
            stats_text,
        } => encode(&config, print_stats, stats_text),
        Mode::Decode => decode(&config),
        Mode::Inspect => inspect(&config),
        Mode::Generate { magnitude, mixed } => generate(&config, magnitude, mixed),
    }
}

fn required<'a>(path: &'a Option<std::path::PathBuf>, what: &str) -> Result<&'a Path> {
    match path {
        Some(path) => Ok(path),
        None => bail!("no {what} path configured"),
    }
}

fn encode(config: &Config, print_stats: bool, stats_text: bool) -> Result<()> {
    let input = required(&config.input, "input")?;
    let output = required(&config.output, "output")?;

    let bytes = FsStore
        .load(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let text = String::from_utf8(bytes)
        .with_context(|| format!("{} is not valid UTF-8 text", input.display()))?;

    log::info!(
        "encoding {} ({} bytes) with {:?}",
        input.display(),
        text.len(),
        config.algorithm
    );
    let stats = HuffmanCodec::new()
        .encode_to(&FsStore, output, &text)
        .with_context(|| format!("failed to encode {}", input.display()))?;
    log::info!("wrote {}", output.display());

    if stats_text {
        print!("{}", stats.export_text());
    } else if print_stats {
        stats.print_summary();
    }
    Ok(())
}

fn decode(config: &Config) -> Result<()> {
    let input = required(&config.input, "input")?;
    let output = required(&config.output, "output")?;
    let codec = config.algorithm.codec();

    log::info!("decoding {} with {}", input.display(), codec.name());
    let bytes = FsStore
        .load(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let text = codec
        .decode(&bytes)
        .with_context(|| format!("failed to decode {}", input.display()))?;

    FsStore
        .save(output, text.as_bytes())
        .with_context(|| format!("failed to write {}", output.display()))?;
    log::info!("wrote {} symbols to {}", text.chars().count(), output.display());
    Ok(())
}

fn inspect(config: &Config) -> Result<()> {
    let input = required(&config.input, "input")?;

    let bytes = FsStore
        .load(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let info = HuffmanCodec::new()
        .inspect(&bytes)
        .with_context(|| format!("failed to inspect {}", input.display()))?;

    println!("=== Container ===");
    println!("Total: {} bytes", info.total_bytes);
    println!("Tree: {} bytes", info.header.tree_size_bytes);
    println!("Padding: {} bits", info.header.padding_bits);
    println!("Content: {} bits", info.content_bits);
    println!();
    println!("=== Code Table ({} symbols) ===", info.table.len());
    for (symbol, code) in info.table.iter() {
        println!("{:<10} {}", format!("{symbol:?}"), code);
    }
    Ok(())
}

fn generate(config: &Config, magnitude: u32, mixed: bool) -> Result<()> {
    let text = if mixed {
        if magnitude > input_gen::MAX_MAGNITUDE {
            bail!("magnitude must be at most {}", input_gen::MAX_MAGNITUDE);
        }
        input_gen::generate_mixed_text(config.seed, 10usize.pow(magnitude))
    } else {
        match input_gen::generate_letters(config.seed, magnitude) {
            Some(text) => text,
            None => bail!("magnitude must be at most {}", input_gen::MAX_MAGNITUDE),
        }
    };
    log::info!("generated {} symbols with seed {}", text.chars().count(), config.seed);

    match &config.output {
        Some(path) => FsStore
            .save(path, text.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
