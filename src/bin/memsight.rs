//! memsight CLI - page through memory-mapped files and print memory statistics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use memsight::logging::init_tracing_with_level;
use memsight::stats::summary::ResidentMeter;
use memsight::{MappedFile, MemsightConfig, NativeStats, StatProvider, StatSnapshot, WindowedView};
use std::path::PathBuf;

/// Inspect large files page by page without reading them into memory.
#[derive(Parser)]
#[command(name = "memsight")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print pages of a file as an address/hex/text dump
    Dump {
        /// File to map
        file: PathBuf,

        /// First page to print
        #[arg(long, default_value = "0")]
        start_page: u64,

        /// Number of pages to print
        #[arg(short, long, default_value = "1")]
        pages: u64,

        /// Bytes per page (overrides the configuration)
        #[arg(long)]
        page_size: Option<usize>,

        /// Radix of addresses and byte values (overrides the configuration)
        #[arg(long)]
        radix: Option<u32>,
    },

    /// Print process, system and filesystem statistics
    Stats {
        /// Path whose filesystem is reported (overrides the configuration)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Emit the snapshot as JSON
        #[arg(long)]
        json: bool,

        /// Only print resident memory
        #[arg(long)]
        resident: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    init_tracing_with_level(level);

    let mut config = match &cli.config {
        Some(path) => MemsightConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => MemsightConfig::default(),
    };

    match cli.command {
        Commands::Dump {
            file,
            start_page,
            pages,
            page_size,
            radix,
        } => {
            if let Some(page_size) = page_size {
                config.viewer.page_size = page_size;
            }
            if let Some(radix) = radix {
                config.viewer.radix = radix;
            }

            let mapped = MappedFile::open(&file)
                .with_context(|| format!("opening {}", file.display()))?;
            let label = file.display().to_string();
            let mut view = WindowedView::new(&mapped, label, &config.viewer)?;
            view.scroll_to(start_page.saturating_mul(view.page_size()));

            for i in 0..pages {
                if i > 0 {
                    let before = view.offset();
                    view.scroll_forward();
                    if view.offset() == before {
                        break;
                    }
                }
                print!("{}", view.render());
            }
        }
        Commands::Stats {
            path,
            json,
            resident,
        } => {
            let provider = NativeStats;
            if resident {
                let mut meter = ResidentMeter::new();
                if let Some(text) = meter.update(provider.process_resident()) {
                    println!("{text}");
                }
                return Ok(());
            }

            let path = path.unwrap_or(config.stats.filesystem_path);
            let snapshot = StatSnapshot::capture(&provider, &path);
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", snapshot.summary());
            }
        }
    }

    Ok(())
}
