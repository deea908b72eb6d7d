//! Rinse CLI - clean tabular data files or serve the cleaning API.

mod cli;
mod commands;
mod logging;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use commands::clean::CleanOptions;
use commands::serve::ServeOptions;
use logging::{LogConfig, init_logging};

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(cli.log_format)
        .with_timestamps(matches!(cli.command, Commands::Serve { .. }));
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    let result = match cli.command {
        Commands::Clean {
            file,
            threshold,
            output,
            format,
            order,
            no_dedup,
            scrub_before_purge,
            validate_before_normalize,
            config,
        } => commands::clean::run(CleanOptions {
            file,
            threshold,
            output,
            format,
            order,
            no_dedup,
            scrub_before_purge,
            validate_before_normalize,
            config,
        }),

        Commands::Serve {
            host,
            port,
            order,
            max_body_mb,
            config,
        } => commands::serve::run(ServeOptions {
            host,
            port,
            order,
            max_body_mb,
            config,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
