//! Serve command - run the HTTP cleaning API.

use std::path::PathBuf;

use colored::Colorize;
use rinse::{OrderPreset, Pipeline, StageOrder};

use super::load_config;
use crate::server::{app, state::AppState};

/// Options for `rinse serve`.
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
    pub order: Option<OrderPreset>,
    pub max_body_mb: usize,
    pub config: Option<PathBuf>,
}

pub fn run(options: ServeOptions) -> Result<(), Box<dyn std::error::Error>> {
    let ServeOptions {
        host,
        port,
        order,
        max_body_mb,
        config,
    } = options;

    let mut config = load_config(config.as_deref())?;
    if let Some(preset) = order {
        config.order = StageOrder::Preset(preset);
    }
    let pipeline = Pipeline::with_config(config)?;
    let state = AppState::new(pipeline).with_body_limit(max_body_mb.saturating_mul(1024 * 1024));

    let url = format!("http://{}:{}", host, port);
    println!();
    println!(
        "{} {}",
        "Starting cleaning API at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  POST {}/clean (bodies up to {} MiB)", url, max_body_mb);
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, &host, port))
}
