//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::path::PathBuf;

use churnprep::model::{DecisionTree, RandomForestModel, TreeNode};
use churnprep::pipeline::PipelineConfig;
use tempfile::TempDir;

/// Raw fields a test row cares about; everything else gets a plausible filler
pub struct RowSpec<'a> {
    pub id: &'a str,
    pub tenure: &'a str,
    pub phone_service: &'a str,
    pub contract: &'a str,
    pub total_charges: &'a str,
}

impl Default for RowSpec<'_> {
    fn default() -> Self {
        Self {
            id: "0001-ABCD",
            tenure: "12",
            phone_service: "Yes",
            contract: "Month-to-month",
            total_charges: "845.5",
        }
    }
}

/// Header line of the default telco schema
pub fn telco_header() -> String {
    PipelineConfig::default().column_names.join(",")
}

/// One data line in the default telco schema
pub fn telco_row(spec: &RowSpec<'_>) -> String {
    let config = PipelineConfig::default();
    config
        .column_names
        .iter()
        .map(|name| match name.as_str() {
            "customerID" => spec.id.to_string(),
            "tenure" => spec.tenure.to_string(),
            "PhoneService" => spec.phone_service.to_string(),
            "Contract" => quote_if_needed(spec.contract),
            "TotalCharges" => spec.total_charges.to_string(),
            "gender" => "Female".to_string(),
            "SeniorCitizen" => "0".to_string(),
            "MonthlyCharges" => "70.35".to_string(),
            "PaymentMethod" => "\"Bank transfer (automatic)\"".to_string(),
            "Churn" => "No".to_string(),
            _ => "No".to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn quote_if_needed(value: &str) -> String {
    if value.contains(',') {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

/// Write lines to a file inside a fresh temp directory
pub fn create_temp_file(name: &str, lines: &[String]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(&path, content).unwrap();
    (temp_dir, path)
}

/// Input file with the telco header and the given rows
pub fn create_input_csv(rows: &[RowSpec<'_>]) -> (TempDir, PathBuf) {
    let mut lines = vec![telco_header()];
    lines.extend(rows.iter().map(telco_row));
    create_temp_file("input.csv", &lines)
}

/// Reference dataset whose tenure mean is the mean of `tenures`
pub fn write_reference_csv(dir: &TempDir, tenures: &[f64]) -> PathBuf {
    let path = dir.path().join("reference.csv");
    let mut content = String::from("customerID,tenure,Churn\n");
    for (i, tenure) in tenures.iter().enumerate() {
        content.push_str(&format!("ref{},{},No\n", i, tenure));
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Read a CSV output file into its lines
pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.to_string())
        .collect()
}

/// Two-stump forest over the default feature order.
///
/// Tree 1 predicts churn for short tenure; tree 2 predicts churn for
/// month-to-month contracts. Both agree on the fixtures used in tests.
pub fn churn_forest() -> RandomForestModel {
    let leaf = |value: Vec<f64>| TreeNode {
        left: -1,
        right: -1,
        feature: -2,
        threshold: 0.0,
        value,
    };
    let stump = |feature: i64, threshold: f64, left: Vec<f64>, right: Vec<f64>| DecisionTree {
        n_features_in: 6,
        nodes: vec![
            TreeNode {
                left: 1,
                right: 2,
                feature,
                threshold,
                value: vec![],
            },
            leaf(left),
            leaf(right),
        ],
    };

    RandomForestModel {
        n_estimators: 2,
        n_features_in: 6,
        classes: vec!["0".to_string(), "1".to_string()],
        feature_names: PipelineConfig::default().features,
        estimators: vec![
            // tenure <= 6 → churn
            stump(0, 6.0, vec![2.0, 8.0], vec![9.0, 1.0]),
            // Month-to-month <= 0.5 → stay
            stump(3, 0.5, vec![9.0, 1.0], vec![3.0, 7.0]),
        ],
    }
}

pub fn write_model_json(dir: &TempDir, model: &RandomForestModel) -> PathBuf {
    let path = dir.path().join("model.json");
    std::fs::write(&path, serde_json::to_string_pretty(model).unwrap()).unwrap();
    path
}
