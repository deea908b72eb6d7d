//! CLI command implementations.

pub mod clean;
pub mod serve;

use std::path::Path;

use rinse::PipelineConfig;

/// Load a pipeline configuration file, or the defaults when none is given.
fn load_config(path: Option<&Path>) -> rinse::Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::load(path),
        None => Ok(PipelineConfig::default()),
    }
}
