//! Galleon Checkout CLI
//!
//! Decodes, validates and re-encodes checkout wire documents with a chosen
//! discriminator vocabulary.

mod commands;

use clap::Parser;
use commands::Command;
use galleon_checkout_sdk::TaggedCodec;
use galleon_checkout_sdk::config::VocabularyLoader;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Galleon Checkout - wire contract inspection tool
#[derive(Parser, Debug)]
#[command(name = "galleon-checkout-cli")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a discriminator vocabulary file (standard vocabulary if unset)
    #[arg(short, long, env = "GALLEON_VOCABULARY")]
    vocabulary: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let codec = match &args.vocabulary {
        Some(path) => {
            let registry = VocabularyLoader::new(path).load().map_err(|e| {
                tracing::error!("Failed to load vocabulary: {}", e);
                e
            })?;
            TaggedCodec::new(registry)
        }
        None => TaggedCodec::standard(),
    };

    let output = commands::run(args.command, &codec).map_err(|e| {
        tracing::error!("{:#}", e);
        e
    })?;
    println!("{output}");
    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
///
/// Logs go to stderr so stdout carries only the re-encoded document.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
