use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use huffpack::code::display_symbol;
use huffpack::{Compressor, Decompressor, HuffmanTree, compress};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "huffpack", version, about = "Static Huffman compression for ASCII files")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compress INPUT into OUTPUT
    Compress { input: PathBuf, output: PathBuf },
    /// Decompress INPUT into OUTPUT using the tree of a reference file
    Decompress {
        input: PathBuf,
        output: PathBuf,
        /// File whose byte frequencies produced the compressed data
        #[arg(short, long)]
        reference: PathBuf,
    },
    /// Print the code table of FILE
    Table { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Compress { input, output } => run_compress(&input, &output),
        Command::Decompress {
            input,
            output,
            reference,
        } => run_decompress(&input, &output, &reference),
        Command::Table { file } => run_table(&file),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

fn run_compress(input: &Path, output: &Path) -> Result<()> {
    let bytes = read_input(input)?;
    let compressed = compress(&bytes).with_context(|| format!("compress {}", input.display()))?;

    fs::write(output, &compressed.bytes)
        .with_context(|| format!("write {}", output.display()))?;

    let stats = compressed.stats();
    info!(
        original = stats.original_len,
        compressed = stats.compressed_len,
        rate = stats.rate(),
        "compressed {}",
        input.display()
    );

    // Sanity check against the same tree before reporting success.
    let restored = Decompressor::new(&compressed.tree)
        .decompress(&compressed.bytes)
        .context("verify compressed output")?;
    anyhow::ensure!(restored == bytes, "round trip mismatch for {}", input.display());

    Ok(())
}

fn run_decompress(input: &Path, output: &Path, reference: &Path) -> Result<()> {
    let reference_bytes = read_input(reference)?;
    let tree = HuffmanTree::from_bytes(&reference_bytes)
        .with_context(|| format!("build tree from {}", reference.display()))?;

    let packed = read_input(input)?;
    let restored = Decompressor::new(&tree)
        .decompress(&packed)
        .with_context(|| format!("decompress {}", input.display()))?;

    fs::write(output, &restored).with_context(|| format!("write {}", output.display()))?;
    info!(
        compressed = packed.len(),
        restored = restored.len(),
        "decompressed {}",
        input.display()
    );

    Ok(())
}

fn run_table(file: &Path) -> Result<()> {
    let bytes = read_input(file)?;
    let tree = HuffmanTree::from_bytes(&bytes)
        .with_context(|| format!("build tree from {}", file.display()))?;
    let frequencies = tree.frequencies();

    for (symbol, code) in tree.codes().by_length() {
        println!(
            "{:>5} {:>8} {}",
            display_symbol(symbol),
            frequencies.get(symbol),
            code
        );
    }

    let packed = Compressor::new(&tree).compress(&bytes)?;
    println!(
        "{} symbols, {} bytes -> {} bytes",
        tree.len(),
        bytes.len(),
        packed.len()
    );

    Ok(())
}
