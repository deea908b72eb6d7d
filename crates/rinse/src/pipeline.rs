//! Pipeline runner and report.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, info_span, warn};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::model::{RawTable, Records, Table, Threshold};
use crate::stage::{
    SkipNote, Stage, StageOutput, completeness, dedup, domain, impute, inference, normalize,
    purge, scrub,
};

/// Rows in and out of one stage, plus any columns it skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSummary {
    pub stage: Stage,
    pub rows_in: usize,
    pub rows_out: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<SkipNote>,
}

impl StageSummary {
    /// Number of rows the stage removed.
    pub fn rows_removed(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct CleanReport {
    /// The cleaned table.
    pub table: Table,
    /// Threshold the run used.
    pub threshold: Threshold,
    /// Row count before any stage ran.
    pub rows_before: usize,
    /// One entry per stage, in execution order.
    pub stages: Vec<StageSummary>,
}

impl CleanReport {
    /// Row count after cleaning.
    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    /// Skip notes from every stage.
    pub fn notes(&self) -> impl Iterator<Item = &SkipNote> {
        self.stages.iter().flat_map(|s| s.notes.iter())
    }

    /// The cleaned data in its wire shape.
    pub fn output(&self) -> CleanedOutput<'_> {
        CleanedOutput {
            cleaned_data: self.table.records(),
            cleaned_row_count: self.row_count(),
        }
    }
}

/// Wire shape of a cleaned table: `{"cleanedData": [...], "cleanedRowCount": n}`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedOutput<'a> {
    pub cleaned_data: Records<'a>,
    pub cleaned_row_count: usize,
}

/// Runs schema inference followed by the configured stages.
///
/// A run is all-or-nothing: either every stage completes and a
/// [`CleanReport`] is returned, or the first fatal failure is returned and no
/// table comes back.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Create a pipeline with the default configuration.
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            stages: Stage::DEFAULT_ORDER.to_vec(),
        }
    }

    /// Create a pipeline from a configuration, validating it.
    pub fn with_config(config: PipelineConfig) -> Result<Self> {
        let stages = config.stages()?;
        config.default_threshold()?;
        Ok(Self { config, stages })
    }

    /// The configuration in use.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Stages that run after inference, in order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Resolve an optional caller threshold against the configured default.
    pub fn threshold(&self, percent: Option<f64>) -> Result<Threshold> {
        match percent {
            Some(p) => Threshold::new(p),
            None => self.config.default_threshold(),
        }
    }

    /// Clean JSON records.
    pub fn clean_records(&self, records: &[Value], threshold: Threshold) -> Result<CleanReport> {
        let raw = RawTable::from_records(records)?;
        self.run(raw, threshold)
    }

    /// Clean a raw table.
    pub fn run(&self, raw: RawTable, threshold: Threshold) -> Result<CleanReport> {
        let span = info_span!(
            "clean",
            rows = raw.row_count(),
            columns = raw.column_count(),
            threshold = threshold.percent()
        );
        let _guard = span.enter();

        let rows_before = raw.row_count();
        let mut table = inference::infer(raw);
        let mut summaries = Vec::with_capacity(self.stages.len() + 1);
        summaries.push(StageSummary {
            stage: Stage::Inference,
            rows_in: rows_before,
            rows_out: rows_before,
            notes: Vec::new(),
        });

        for &stage in &self.stages {
            let rows_in = table.row_count();
            let StageOutput {
                table: next,
                notes,
            } = apply(stage, table, threshold)?;
            table = next;

            debug!(%stage, rows_in, rows_out = table.row_count(), "stage complete");
            for note in &notes {
                warn!(%stage, column = note.column(), "{}", note.description());
            }

            summaries.push(StageSummary {
                stage,
                rows_in,
                rows_out: table.row_count(),
                notes,
            });
        }

        info!(rows_before, rows_after = table.row_count(), "cleaning complete");

        Ok(CleanReport {
            table,
            threshold,
            rows_before,
            stages: summaries,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a single stage.
pub fn apply(stage: Stage, table: Table, threshold: Threshold) -> Result<StageOutput> {
    let output: StageOutput = match stage {
        Stage::Inference => table.into(),
        Stage::Completeness => completeness::filter(table, threshold).into(),
        Stage::Impute => impute::impute(table),
        Stage::Normalize => normalize::normalize(table),
        Stage::Purge => purge::purge(table).into(),
        Stage::Scrub => scrub::scrub(table).into(),
        Stage::Dedup => dedup::dedup(table).into(),
        Stage::DomainCheck => domain::check_age(table)?.into(),
    };
    Ok(output)
}
