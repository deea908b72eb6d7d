//! Integration tests for the cleaning pipeline.

use std::io::Write;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::NamedTempFile;

use rinse::{
    Cell, CleanRequest, OrderPreset, Parser, Pipeline, PipelineConfig, RinseError, SkipNote,
    Stage, StageOrder, Threshold,
};

/// Helper to create a temporary file with given content and suffix.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn pipeline_with(order: OrderPreset) -> Pipeline {
    Pipeline::with_config(PipelineConfig {
        order: StageOrder::Preset(order),
        ..Default::default()
    })
    .expect("valid config")
}

fn clean(pipeline: &Pipeline, records: Value, threshold: f64) -> Value {
    let records = records.as_array().cloned().expect("records array");
    let report = pipeline
        .clean_records(&records, Threshold::new(threshold).unwrap())
        .expect("Cleaning failed");
    serde_json::to_value(report.output()).unwrap()
}

fn approx(value: &Value, expected: f64) -> bool {
    value.as_f64().is_some_and(|v| (v - expected).abs() < 1e-9)
}

// =============================================================================
// Default Stage Order
// =============================================================================

#[test]
fn test_relative_age_decides_domain_check() {
    let out = clean(
        &Pipeline::new(),
        json!([{"age": 30, "city": "NY"}, {"age": -1, "city": "NY"}]),
        0.0,
    );

    assert_eq!(out["cleanedRowCount"], json!(1));
    let row = &out["cleanedData"][0];
    assert!(approx(&row["age"], std::f64::consts::FRAC_1_SQRT_2));
    assert_eq!(row["city"], json!("NY"));
}

#[test]
fn test_fully_missing_column_empties_table() {
    let out = clean(
        &Pipeline::new(),
        json!([
            {"a": 1, "b": "x", "gone": null},
            {"a": 2, "b": "y", "gone": null},
            {"a": 3, "b": "z", "gone": null}
        ]),
        0.0,
    );

    assert_eq!(out, json!({"cleanedData": [], "cleanedRowCount": 0}));
}

#[test]
fn test_blank_text_survives_purge() {
    let out = clean(
        &Pipeline::new(),
        json!([{"name": "   ", "v": 1}, {"v": 2}]),
        0.0,
    );

    assert_eq!(out["cleanedRowCount"], json!(2));
    for row in out["cleanedData"].as_array().unwrap() {
        assert_eq!(row["name"], Value::Null);
    }
}

#[test]
fn test_duplicates_collapse_to_one_row() {
    let out = clean(&Pipeline::new(), json!([{"x": 1}, {"x": 1}]), 0.0);

    assert_eq!(out["cleanedRowCount"], json!(1));
    assert!(approx(&out["cleanedData"][0]["x"], 0.0));
}

#[test]
fn test_single_row_is_purged() {
    let out = clean(&Pipeline::new(), json!([{"x": 5, "c": "a"}]), 0.0);
    assert_eq!(out, json!({"cleanedData": [], "cleanedRowCount": 0}));

    let records = vec![json!({"age": 40, "name": "Ann"})];
    let report = Pipeline::new()
        .clean_records(&records, Threshold::default())
        .unwrap();
    assert_eq!(report.row_count(), 0);
    assert!(report.notes().any(|n| matches!(
        n,
        SkipNote::DegenerateSpread { column, values: 1 } if column == "age"
    )));
}

#[test]
fn test_booleans_come_back_as_text() {
    let out = clean(
        &Pipeline::new(),
        json!([{"ok": true, "c": "a"}, {"ok": false, "c": "b"}]),
        0.0,
    );

    assert_eq!(
        out["cleanedData"],
        json!([{"ok": "true", "c": "a"}, {"ok": "false", "c": "b"}])
    );
}

#[test]
fn test_threshold_drops_sparse_rows() {
    // 4 columns at 75% need 3 present cells
    let out = clean(
        &Pipeline::new(),
        json!([
            {"a": 1, "b": "p", "c": "q", "d": "r"},
            {"a": 2, "b": "p", "c": null, "d": null},
            {"a": 3, "b": "s", "c": "q", "d": null}
        ]),
        75.0,
    );

    assert_eq!(out["cleanedRowCount"], json!(2));
    // row 3's "d" was imputed from the mode of the surviving rows
    assert_eq!(out["cleanedData"][1]["d"], json!("r"));
}

#[test]
fn test_array_records_use_positional_names() {
    let out = clean(
        &Pipeline::new(),
        json!([["a", 1], ["b", 2], ["a", 1]]),
        50.0,
    );

    assert_eq!(out["cleanedRowCount"], json!(2));
    assert_eq!(out["cleanedData"][0]["0"], json!("a"));
    assert!(out["cleanedData"][0].get("1").is_some());
}

#[test]
fn test_text_age_is_fatal() {
    let records = vec![json!({"age": "ten"}), json!({"age": 4})];
    let err = Pipeline::new()
        .clean_records(&records, Threshold::default())
        .unwrap_err();

    assert!(matches!(
        err,
        RinseError::Computation {
            stage: Stage::DomainCheck,
            ..
        }
    ));
    assert!(!err.is_client_fault());
}

#[test]
fn test_report_tracks_rows_per_stage() {
    let records = vec![json!({"c": "a"}), json!({"c": "a"}), json!({"c": "b"})];
    let report = Pipeline::new()
        .clean_records(&records, Threshold::default())
        .unwrap();

    let dedup = report
        .stages
        .iter()
        .find(|s| s.stage == Stage::Dedup)
        .unwrap();
    assert_eq!(dedup.rows_in, 3);
    assert_eq!(dedup.rows_out, 2);
    assert_eq!(dedup.rows_removed(), 1);
    assert_eq!(report.row_count(), 2);
}

#[test]
fn test_constant_numeric_column_is_noted() {
    let records = vec![json!({"k": 5, "c": "a"}), json!({"k": 5, "c": "b"})];
    let report = Pipeline::new()
        .clean_records(&records, Threshold::default())
        .unwrap();

    assert_eq!(report.row_count(), 2);
    assert!(report.notes().any(|n| matches!(
        n,
        SkipNote::DegenerateSpread { column, values: 2 } if column == "k"
    )));
    assert_eq!(report.table.get(0, 0), Some(&Cell::Number(0.0)));
}

// =============================================================================
// Alternative Orders
// =============================================================================

#[test]
fn test_scrub_before_purge_removes_blank_rows() {
    let out = clean(
        &pipeline_with(OrderPreset::ScrubBeforePurge),
        json!([{"name": "   ", "v": 1}, {"v": 2}]),
        0.0,
    );

    assert_eq!(out["cleanedRowCount"], json!(0));
}

#[test]
fn test_validate_before_normalize_uses_raw_age() {
    let out = clean(
        &pipeline_with(OrderPreset::ValidateBeforeNormalize),
        json!([
            {"age": 30, "city": "NY"},
            {"age": -1, "city": "NY"},
            {"age": 50, "city": "LA"}
        ]),
        0.0,
    );

    // only the raw -1 is dropped; the remaining two are standardized
    assert_eq!(out["cleanedRowCount"], json!(2));
    let rows = out["cleanedData"].as_array().unwrap();
    assert!(approx(&rows[0]["age"], -std::f64::consts::FRAC_1_SQRT_2));
    assert!(approx(&rows[1]["age"], std::f64::consts::FRAC_1_SQRT_2));
}

#[test]
fn test_custom_order_skips_unlisted_stages() {
    let config = PipelineConfig {
        order: StageOrder::Custom(vec![Stage::Scrub, Stage::Dedup]),
        ..Default::default()
    };
    let pipeline = Pipeline::with_config(config).unwrap();
    let out = clean(&pipeline, json!([{"x": 7}, {"x": 7}, {"x": null}]), 0.0);

    // no imputation, normalization or purge
    assert_eq!(
        out["cleanedData"],
        json!([{"x": 7.0}, {"x": null}])
    );
}

// =============================================================================
// File Ingestion
// =============================================================================

#[test]
fn test_clean_csv_file() {
    let content = "name,age,score\n\
                   Alice,30,1.5\n\
                   Bob,NA,2.5\n\
                   Carol,41,\n\
                   Alice,30,1.5\n";
    let file = create_test_file(content, ".csv");

    let parsed = Parser::new().parse_file(file.path()).expect("Parse failed");
    assert_eq!(parsed.source.format, "csv");
    assert_eq!(parsed.source.row_count, 4);
    assert_eq!(parsed.source.column_count, 3);
    assert_eq!(parsed.threshold, None);

    let report = Pipeline::new()
        .run(parsed.table, Threshold::default())
        .expect("Cleaning failed");
    // every surviving row has a non-negative standardized age and no duplicates
    assert!(report.row_count() >= 1);
    assert!(report.row_count() <= 3);
    for row in report.table.rows() {
        assert!(row.iter().all(|c| !c.is_missing()));
    }
}

#[test]
fn test_clean_tsv_file_auto_detect() {
    let content = "id\tgroup\n1\tA\n2\tB\n3\tA\n";
    let file = create_test_file(content, ".tsv");

    let parsed = Parser::new().parse_file(file.path()).unwrap();
    assert_eq!(parsed.source.format, "tsv");
    assert_eq!(parsed.table.names(), &["id", "group"]);
}

#[test]
fn test_clean_xlsx_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/survey.xlsx");

    let parsed = Parser::new().parse_file(&path).expect("Parse failed");
    assert_eq!(parsed.source.format, "xlsx");
    assert_eq!(parsed.table.names(), &["name", "age", "city"]);
    assert_eq!(parsed.table.row_count(), 3);
    assert_eq!(parsed.table.rows()[0][0], Cell::text("Ann"));
    assert_eq!(parsed.table.rows()[0][1], Cell::Number(30.0));
    assert!(parsed.table.rows()[1][1].is_missing());

    // Bob's age is imputed to the mean (35.5), which standardizes to 0.0;
    // Ann's 30 standardizes below zero and fails the age check
    let report = Pipeline::new()
        .run(parsed.table, Threshold::default())
        .expect("Cleaning failed");
    let out = serde_json::to_value(report.output()).unwrap();
    assert_eq!(out["cleanedRowCount"], json!(2));
    assert_eq!(out["cleanedData"][0]["name"], json!("Bob"));
    assert!(approx(&out["cleanedData"][0]["age"], 0.0));
    assert_eq!(out["cleanedData"][1]["name"], json!("Cara"));
    assert!(approx(&out["cleanedData"][1]["age"], 1.0));
}

#[test]
fn test_json_request_file_carries_threshold() {
    let request = CleanRequest::new(vec![json!({"x": 1}), json!({"x": 2})]).with_threshold(10.0);
    let file = create_test_file(&serde_json::to_string(&request).unwrap(), ".json");

    let parsed = Parser::new().parse_file(file.path()).unwrap();
    assert_eq!(parsed.source.format, "json");
    assert_eq!(parsed.threshold, Some(10.0));
    assert_eq!(parsed.table.row_count(), 2);
}

#[test]
fn test_empty_json_file_is_invalid() {
    let file = create_test_file("[]", ".json");
    let err = Parser::new().parse_file(file.path()).unwrap_err();
    assert!(err.is_client_fault());
    assert_eq!(err.to_string(), "No data provided");
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Parser::new()
        .parse_file("/nonexistent/input.csv")
        .unwrap_err();
    assert!(matches!(err, RinseError::Io { .. }));
}
