//! Unit tests for the input reader

use churnprep::pipeline::{is_csv_empty, load_records, PipelineConfig, Value};

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_header_only_is_empty() {
    let (_temp_dir, path) = create_temp_file("a.csv", &[telco_header()]);
    assert!(is_csv_empty(&path).unwrap());
}

#[test]
fn test_blank_lines_after_header_are_empty() {
    let lines = vec![telco_header(), "".to_string(), "   ".to_string()];
    let (_temp_dir, path) = create_temp_file("a.csv", &lines);
    assert!(is_csv_empty(&path).unwrap());
}

#[test]
fn test_data_line_is_not_empty() {
    let (_temp_dir, path) = create_input_csv(&[RowSpec::default()]);
    assert!(!is_csv_empty(&path).unwrap());
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    assert!(is_csv_empty(&temp_dir.path().join("nope.csv")).is_err());
}

#[test]
fn test_records_keyed_by_schema() {
    let (_temp_dir, path) = create_input_csv(&[RowSpec {
        id: "7590-VHVEG",
        tenure: "1",
        phone_service: "No",
        contract: "Month-to-month",
        total_charges: "29.85",
    }]);

    let loaded = load_records(&path, &PipelineConfig::default()).unwrap();
    assert_eq!(loaded.offset, 0);
    assert_eq!(loaded.records.len(), 1);

    let record = &loaded.records[0];
    assert_eq!(record["customerID"], Value::Text("7590-VHVEG".to_string()));
    assert_eq!(record["TotalCharges"], Value::Text("29.85".to_string()));
    assert_eq!(
        record["PaymentMethod"],
        Value::Text("Bank transfer (automatic)".to_string())
    );
}

#[test]
fn test_short_rows_leave_keys_absent() {
    let lines = vec![telco_header(), "c1,Male,0".to_string()];
    let (_temp_dir, path) = create_temp_file("short.csv", &lines);

    let loaded = load_records(&path, &PipelineConfig::default()).unwrap();
    let record = &loaded.records[0];
    assert_eq!(record.len(), 3);
    assert!(!record.contains_key("Contract"));
}
