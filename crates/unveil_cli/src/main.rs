//! Unveil CLI
//!
//! Run simulated scroll sessions against a page description and watch the
//! reveal pipeline fire.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use unveil_core::EnvCapabilities;

mod page;
mod session;

use page::PageFile;
use session::SessionOptions;

#[derive(Parser)]
#[command(name = "unveil")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Unveil scroll-reveal engine demo driver", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulated scroll session
    Run {
        /// Page description file (TOML); omit for the built-in demo page
        page: Option<PathBuf>,

        /// Scroll distance per tick
        #[arg(long, default_value = "120")]
        step: f32,

        /// Simulate a host without intersection observation (fallback path)
        #[arg(long)]
        no_observer: bool,
    },

    /// Show the engine's configuration constants
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Run {
            page,
            step,
            no_observer,
        } => cmd_run(page.as_deref(), step, no_observer),
        Commands::Info => cmd_info(),
    }
}

fn cmd_run(page: Option<&std::path::Path>, step: f32, no_observer: bool) -> Result<()> {
    let page = match page {
        Some(path) => PageFile::load(path)?,
        None => PageFile::demo(),
    };

    let caps = if no_observer {
        EnvCapabilities::without_intersection_observer()
    } else {
        EnvCapabilities::default()
    };
    let opts = SessionOptions {
        caps,
        scroll_step: step,
        ..Default::default()
    };

    let summary = session::run(&page, &opts);
    println!(
        "revealed {}/{} candidates, lazy-loaded {}, over {} ticks",
        summary.revealed, summary.candidates, summary.lazy_loaded, summary.ticks
    );
    Ok(())
}

fn cmd_info() -> Result<()> {
    println!("reveal classes:  {}", unveil_reveal::REVEAL_CLASSES.join(", "));
    println!("reveal marker:   {}", unveil_reveal::REVEALED_CLASS);
    println!("reveal ratio:    {}", unveil_reveal::REVEAL_RATIO);
    println!(
        "start debounce:  {}ms",
        unveil_reveal::START_QUIET_PERIOD.as_millis()
    );
    let config = unveil_observe::ObserverConfig::default();
    println!("trigger margin:  {}", config.bottom_margin_fraction);
    println!(
        "thresholds:      {}",
        config
            .thresholds
            .iter()
            .map(f32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}
