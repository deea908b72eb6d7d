//! Clean command - run the pipeline over a file and export the result.

use std::path::PathBuf;

use colored::Colorize;
use rinse::export::{self, OutputFormat};
use rinse::{CleanReport, OrderPreset, Parser, Pipeline, Stage, StageOrder};

use super::load_config;

/// Options for `rinse clean`.
pub struct CleanOptions {
    pub file: PathBuf,
    pub threshold: Option<f64>,
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub order: Option<OrderPreset>,
    pub no_dedup: bool,
    pub scrub_before_purge: bool,
    pub validate_before_normalize: bool,
    pub config: Option<PathBuf>,
}

pub fn run(options: CleanOptions) -> Result<(), Box<dyn std::error::Error>> {
    if !options.file.exists() {
        return Err(format!("File not found: {}", options.file.display()).into());
    }

    let mut config = load_config(options.config.as_deref())?;
    if let Some(preset) = options.order {
        config.order = StageOrder::Preset(preset);
    }
    if options.no_dedup {
        config.dedup = false;
    }
    if options.scrub_before_purge {
        config.order = config.order.with_before(Stage::Scrub, Stage::Purge)?;
    }
    if options.validate_before_normalize {
        config.order = config
            .order
            .with_before(Stage::DomainCheck, Stage::Normalize)?;
    }
    let pipeline = Pipeline::with_config(config)?;

    println!(
        "{} {}",
        "Cleaning".cyan().bold(),
        options.file.display().to_string().white().bold()
    );

    let parsed = Parser::new().parse_file(&options.file)?;
    println!(
        "  {} rows x {} columns ({})",
        parsed.source.row_count, parsed.source.column_count, parsed.source.format
    );

    // Command line wins over a threshold carried in a JSON request file
    let threshold = pipeline.threshold(options.threshold.or(parsed.threshold))?;
    let report = pipeline.run(parsed.table, threshold)?;

    let format = options
        .format
        .or_else(|| options.output.as_deref().and_then(OutputFormat::from_path))
        .unwrap_or_default();
    let output_path = options
        .output
        .unwrap_or_else(|| export::default_output_path(&options.file, format));

    export::export(&report, format, &output_path)?;

    print_summary(&report);
    println!();
    println!(
        "{} {} rows to {}",
        "Saved".green().bold(),
        report.row_count().to_string().white().bold(),
        output_path.display().to_string().cyan()
    );

    Ok(())
}

fn print_summary(report: &CleanReport) {
    println!();
    println!(
        "{} (threshold {}%)",
        "Stages".bold(),
        report.threshold.percent()
    );

    for summary in &report.stages {
        let removed = summary.rows_removed();
        let change = if removed > 0 {
            format!("-{}", removed).red().to_string()
        } else {
            "".to_string()
        };
        println!(
            "  {:<14} {:>6} -> {:<6} {}",
            summary.stage.label(),
            summary.rows_in,
            summary.rows_out,
            change
        );
        for note in &summary.notes {
            println!("    {} {}", "Note:".yellow(), note.description());
        }
    }
}
