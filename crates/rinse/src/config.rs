//! Pipeline configuration.
//!
//! The stage order is explicit data rather than hard-coded control flow, so a
//! caller can choose between the default order and its variants without
//! touching code:
//!
//! ```json
//! { "order": "scrub-before-purge", "dedup": true, "default_threshold": 50 }
//! { "order": ["completeness", "impute", "scrub", "purge", "dedup"] }
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RinseError};
use crate::model::Threshold;
use crate::stage::Stage;

/// Named stage orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderPreset {
    /// Completeness, impute, normalize, purge, scrub, dedup, domain check.
    #[default]
    Source,
    /// Scrub blank text before the purge, so blank rows are purged.
    ScrubBeforePurge,
    /// Run the domain check on raw values, before normalization.
    ValidateBeforeNormalize,
}

impl OrderPreset {
    /// Resolve the preset to a list of stages.
    pub fn stages(&self) -> Vec<Stage> {
        let stages = Stage::DEFAULT_ORDER.to_vec();
        match self {
            OrderPreset::Source => stages,
            OrderPreset::ScrubBeforePurge => move_before(stages, Stage::Scrub, Stage::Purge),
            OrderPreset::ValidateBeforeNormalize => {
                move_before(stages, Stage::DomainCheck, Stage::Normalize)
            }
        }
    }
}

impl std::str::FromStr for OrderPreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "source" | "default" => Ok(OrderPreset::Source),
            "scrub-before-purge" => Ok(OrderPreset::ScrubBeforePurge),
            "validate-before-normalize" => Ok(OrderPreset::ValidateBeforeNormalize),
            _ => Err(format!(
                "Unknown stage order: {}. Use source, scrub-before-purge, or validate-before-normalize.",
                s
            )),
        }
    }
}

/// Order in which the reorderable stages run. Inference always runs first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StageOrder {
    Preset(OrderPreset),
    Custom(Vec<Stage>),
}

impl Default for StageOrder {
    fn default() -> Self {
        StageOrder::Preset(OrderPreset::Source)
    }
}

impl StageOrder {
    /// The concrete list of stages, validated.
    ///
    /// Stages left out of a custom order do not run. A stage may appear at
    /// most once and inference cannot be listed.
    pub fn resolve(&self) -> Result<Vec<Stage>> {
        let stages = match self {
            StageOrder::Preset(preset) => preset.stages(),
            StageOrder::Custom(stages) => stages.clone(),
        };

        let mut seen = HashSet::new();
        for stage in &stages {
            if *stage == Stage::Inference {
                return Err(RinseError::Config(
                    "schema inference always runs first and cannot be ordered".to_string(),
                ));
            }
            if !seen.insert(*stage) {
                return Err(RinseError::Config(format!(
                    "stage '{}' listed more than once",
                    stage
                )));
            }
        }
        Ok(stages)
    }

    /// Move `stage` directly in front of `anchor`.
    ///
    /// No-op when either stage is absent or `stage` already runs earlier.
    pub fn with_before(self, stage: Stage, anchor: Stage) -> Result<Self> {
        let stages = self.resolve()?;
        Ok(StageOrder::Custom(move_before(stages, stage, anchor)))
    }
}

fn move_before(mut stages: Vec<Stage>, stage: Stage, anchor: Stage) -> Vec<Stage> {
    let (Some(from), Some(to)) = (
        stages.iter().position(|s| *s == stage),
        stages.iter().position(|s| *s == anchor),
    ) else {
        return stages;
    };
    if from > to {
        stages.remove(from);
        stages.insert(to, stage);
    }
    stages
}

/// Configuration for a [`Pipeline`](crate::Pipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Stage order.
    pub order: StageOrder,
    /// Whether the deduplicator runs.
    pub dedup: bool,
    /// Threshold used when a request does not carry one.
    pub default_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            order: StageOrder::default(),
            dedup: true,
            default_threshold: Threshold::DEFAULT_PERCENT,
        }
    }
}

impl PipelineConfig {
    /// The default threshold, validated.
    pub fn default_threshold(&self) -> Result<Threshold> {
        Threshold::new(self.default_threshold).map_err(|e| RinseError::Config(e.to_string()))
    }

    /// Stages to run after inference, in order, with dedup dropped when disabled.
    pub fn stages(&self) -> Result<Vec<Stage>> {
        let mut stages = self.order.resolve()?;
        if !self.dedup {
            stages.retain(|s| *s != Stage::Dedup);
        }
        Ok(stages)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| RinseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let reader = BufReader::new(file);
        let config: PipelineConfig = serde_json::from_reader(reader).map_err(|e| {
            RinseError::Config(format!(
                "Failed to parse pipeline config '{}': {}",
                path.display(),
                e
            ))
        })?;

        // Validate order and threshold.
        config.stages()?;
        config.default_threshold()?;

        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let file = File::create(path).map_err(|e| RinseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(OrderPreset::Source.stages(), Stage::DEFAULT_ORDER.to_vec());

        let scrub_first = OrderPreset::ScrubBeforePurge.stages();
        let scrub = scrub_first.iter().position(|s| *s == Stage::Scrub).unwrap();
        let purge = scrub_first.iter().position(|s| *s == Stage::Purge).unwrap();
        assert!(scrub < purge);

        let validate_first = OrderPreset::ValidateBeforeNormalize.stages();
        assert_eq!(
            validate_first,
            vec![
                Stage::Completeness,
                Stage::Impute,
                Stage::DomainCheck,
                Stage::Normalize,
                Stage::Purge,
                Stage::Scrub,
                Stage::Dedup,
            ]
        );
    }

    #[test]
    fn test_custom_order_rejects_repeats_and_inference() {
        let repeated = StageOrder::Custom(vec![Stage::Purge, Stage::Purge]);
        assert!(matches!(repeated.resolve(), Err(RinseError::Config(_))));

        let inference = StageOrder::Custom(vec![Stage::Inference]);
        assert!(inference.resolve().is_err());
    }

    #[test]
    fn test_with_before_composes() {
        let order = StageOrder::default()
            .with_before(Stage::Scrub, Stage::Purge)
            .unwrap()
            .with_before(Stage::DomainCheck, Stage::Normalize)
            .unwrap();
        assert_eq!(
            order.resolve().unwrap(),
            vec![
                Stage::Completeness,
                Stage::Impute,
                Stage::DomainCheck,
                Stage::Normalize,
                Stage::Scrub,
                Stage::Purge,
                Stage::Dedup,
            ]
        );
    }

    #[test]
    fn test_dedup_toggle() {
        let config = PipelineConfig {
            dedup: false,
            ..Default::default()
        };
        assert!(!config.stages().unwrap().contains(&Stage::Dedup));
    }

    #[test]
    fn test_deserialize_preset_and_custom() {
        let preset: PipelineConfig =
            serde_json::from_str(r#"{"order": "scrub-before-purge"}"#).unwrap();
        assert_eq!(preset.order, StageOrder::Preset(OrderPreset::ScrubBeforePurge));
        assert!(preset.dedup);
        assert_eq!(preset.default_threshold, 50.0);

        let custom: PipelineConfig =
            serde_json::from_str(r#"{"order": ["completeness", "purge"], "dedup": false}"#)
                .unwrap();
        assert_eq!(
            custom.order,
            StageOrder::Custom(vec![Stage::Completeness, Stage::Purge])
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");

        let config = PipelineConfig {
            order: StageOrder::Preset(OrderPreset::ValidateBeforeNormalize),
            dedup: false,
            default_threshold: 80.0,
        };
        config.save(&path).unwrap();

        assert_eq!(PipelineConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_bad_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        std::fs::write(&path, r#"{"default_threshold": 250}"#).unwrap();

        assert!(matches!(PipelineConfig::load(&path), Err(RinseError::Config(_))));
    }
}
