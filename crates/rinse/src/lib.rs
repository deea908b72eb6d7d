//! Rinse: deterministic cleaning pipeline for tabular records.
//!
//! A batch of records goes through column kind inference and then a fixed
//! sequence of stages: completeness filtering, imputation, z-score
//! normalization, missing-row purge, blank-text scrubbing, deduplication and
//! an `age` domain check. Every stage is a pure transform over a [`Table`].
//!
//! # Example
//!
//! ```
//! use rinse::{Pipeline, Threshold};
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"name": "Alice", "age": 30}),
//!     json!({"name": "Bob", "age": null}),
//!     json!({"name": "Carol", "age": 41}),
//!     json!({"name": "Alice", "age": 30}),
//! ];
//!
//! let pipeline = Pipeline::new();
//! let report = pipeline.clean_records(&records, Threshold::default()).unwrap();
//! println!("{} rows kept", report.row_count());
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod model;
pub mod pipeline;
pub mod request;
pub mod stage;

pub use config::{OrderPreset, PipelineConfig, StageOrder};
pub use error::{Result, RinseError};
pub use export::OutputFormat;
pub use input::{ParsedInput, Parser, SourceMetadata};
pub use model::{Cell, Column, ColumnKind, RawTable, Table, Threshold};
pub use pipeline::{CleanReport, CleanedOutput, Pipeline, StageSummary};
pub use request::CleanRequest;
pub use stage::{SkipNote, Stage};
