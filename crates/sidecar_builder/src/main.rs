//! Sidecar Builder CLI
//!
//! Walks a gameplay dataset, replays each `.bk2` input log through the
//! external extractor, and populates the companion JSON sidecars with
//! derived summary fields.

use anyhow::Result;
use clap::Parser;
use replay_core::{ExtractOptions, ProcessExtractor};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sidecar_builder")]
#[command(about = "Populate replay sidecars with derived gameplay metrics", long_about = None)]
struct Cli {
    /// Dataset root to scan for .bk2 replay files
    #[arg(short, long, default_value = ".")]
    datapath: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("🔨 Populating sidecars under {}", cli.datapath.display());

    let extractor = ProcessExtractor::from_env();
    let summary = sidecar_builder::run(&cli.datapath, &extractor, &ExtractOptions::default())?;

    println!("\n✅ Run complete");
    println!("   Processed: {}", summary.processed());
    println!("   Skipped:   {}", summary.skipped());
    println!("   Failed:    {}", summary.failed());

    if summary.failed() > 0 {
        println!("\n❌ Failures:");
        for (path, err) in summary.failures() {
            println!("   {}: {:#}", path.display(), err);
        }
    }

    Ok(())
}
