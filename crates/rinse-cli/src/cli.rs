//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rinse::{OrderPreset, OutputFormat};

use crate::logging::LogFormat;

/// Rinse: deterministic cleaning pipeline for tabular records
#[derive(Parser)]
#[command(name = "rinse")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, default_value = "pretty", global = true)]
    pub log_format: LogFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a CSV, TSV, JSON or spreadsheet (xlsx/xls/ods) file
    Clean {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Completeness threshold in percent (0-100)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Output path (default: <file>_cleaned.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (default: from --output extension, else csv)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Stage order preset (source, scrub-before-purge, validate-before-normalize)
        #[arg(long, value_name = "PRESET")]
        order: Option<OrderPreset>,

        /// Skip deduplication
        #[arg(long)]
        no_dedup: bool,

        /// Scrub blank text before the missing-row purge
        #[arg(long)]
        scrub_before_purge: bool,

        /// Run the age check before normalization
        #[arg(long)]
        validate_before_normalize: bool,

        /// Pipeline configuration file (JSON)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Serve the cleaning API over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for web server
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Stage order preset (source, scrub-before-purge, validate-before-normalize)
        #[arg(long, value_name = "PRESET")]
        order: Option<OrderPreset>,

        /// Largest accepted request body, in MiB
        #[arg(long, value_name = "MIB", default_value = "64")]
        max_body_mb: usize,

        /// Pipeline configuration file (JSON)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}
