//! Cleaning configuration: schema, feature lists and imputation defaults
//!
//! A `PipelineConfig` is passed explicitly to every stage so several schemas
//! can be exercised side by side. `Default` is the telco churn schema.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::CleanError;

/// Default substituted for unusable `TotalCharges` values
pub const DEFAULT_TOTAL_CHARGES: f64 = 2279.0;

/// What to write into `tenure` when the raw cell is an empty string.
///
/// A missing or NaN tenure always receives the reference mean; an empty cell
/// historically received `0.0`. `Mean` treats both the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EmptyTenurePolicy {
    /// Use the reference-dataset mean, same as a missing value
    #[default]
    Mean,
    /// Use 0.0 (legacy behaviour)
    Zero,
}

impl std::fmt::Display for EmptyTenurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyTenurePolicy::Mean => write!(f, "mean"),
            EmptyTenurePolicy::Zero => write!(f, "zero"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Header column marking where the canonical schema starts
    pub leading_column: String,
    /// Canonical column names, positionally aligned from `leading_column` on
    pub column_names: Vec<String>,
    /// Columns kept before contract encoding
    pub features_after_contract: Vec<String>,
    /// Output columns, in output order
    pub features: Vec<String>,
    pub contract_column: String,
    /// Valid contract categories; each becomes an indicator column of the same name
    pub contract_values: Vec<String>,
    pub total_charges_column: String,
    pub total_charges_default: f64,
    pub phone_service_column: String,
    /// Substituted for a missing phone service flag
    pub phone_service_default: String,
    pub tenure_column: String,
    pub empty_tenure_policy: EmptyTenurePolicy,
    /// Raw cells that are read as null
    pub na_values: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            leading_column: "customerID".to_string(),
            column_names: strings(&[
                "customerID",
                "gender",
                "SeniorCitizen",
                "Partner",
                "Dependents",
                "tenure",
                "PhoneService",
                "MultipleLines",
                "InternetService",
                "OnlineSecurity",
                "OnlineBackup",
                "DeviceProtection",
                "TechSupport",
                "StreamingTV",
                "StreamingMovies",
                "Contract",
                "PaperlessBilling",
                "PaymentMethod",
                "MonthlyCharges",
                "TotalCharges",
                "Churn",
            ]),
            features_after_contract: strings(&["tenure", "PhoneService", "Contract", "TotalCharges"]),
            features: strings(&[
                "tenure",
                "PhoneService",
                "TotalCharges",
                "Month-to-month",
                "One year",
                "Two year",
            ]),
            contract_column: "Contract".to_string(),
            contract_values: strings(&["Month-to-month", "One year", "Two year"]),
            total_charges_column: "TotalCharges".to_string(),
            total_charges_default: DEFAULT_TOTAL_CHARGES,
            phone_service_column: "PhoneService".to_string(),
            phone_service_default: "No".to_string(),
            tenure_column: "tenure".to_string(),
            empty_tenure_policy: EmptyTenurePolicy::default(),
            na_values: strings(&["NA", "NaN", "nan", "null"]),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file. Missing keys fall back to the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_empty_tenure_policy(mut self, policy: EmptyTenurePolicy) -> Self {
        self.empty_tenure_policy = policy;
        self
    }

    /// Check that the feature lists are consistent with the columns the stages write.
    pub fn validate(&self) -> Result<(), CleanError> {
        if self.column_names.first() != Some(&self.leading_column) {
            return Err(CleanError::InvalidConfig(format!(
                "column_names must start with the leading column '{}'",
                self.leading_column
            )));
        }

        if self.contract_values.is_empty() {
            return Err(CleanError::InvalidConfig(
                "contract_values must not be empty".to_string(),
            ));
        }

        if !self.features_after_contract.contains(&self.contract_column) {
            return Err(CleanError::InvalidConfig(format!(
                "features_after_contract must contain '{}'",
                self.contract_column
            )));
        }

        let required = [
            &self.total_charges_column,
            &self.phone_service_column,
            &self.tenure_column,
        ];
        for column in required.into_iter().chain(self.contract_values.iter()) {
            if !self.features.contains(column) {
                return Err(CleanError::InvalidConfig(format!(
                    "features is missing column '{}'",
                    column
                )));
            }
        }

        Ok(())
    }

    /// True when a raw cell should be read as null
    pub fn is_na(&self, cell: &str) -> bool {
        self.na_values.iter().any(|na| na == cell)
    }
}
