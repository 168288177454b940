//! Missing-value repair for TotalCharges, PhoneService and tenure

use super::config::{EmptyTenurePolicy, PipelineConfig};
use super::error::CleanError;
use super::metrics::{CleaningEvent, MetricsSink};
use super::record::{format_float, Record, Value};

/// Resolve `TotalCharges` to a finite float. Never fails.
///
/// Precedence:
/// 1. missing, null, empty or NaN → the default
/// 2. every space is replaced by the default's string form (`"1 234"` → `"12279.0234"`)
/// 3. parse; anything unparseable or non-finite → the default
pub fn fill_total_charges(
    mut record: Record,
    config: &PipelineConfig,
    metrics: &dyn MetricsSink,
) -> Record {
    let default = config.total_charges_default;
    let default_str = format_float(default);

    let mut defaulted = false;
    let raw = match record.get(&config.total_charges_column) {
        Some(Value::Text(s)) if !s.is_empty() => s.clone(),
        Some(Value::Float(v)) if !v.is_nan() => format_float(*v),
        Some(Value::Int(v)) => v.to_string(),
        _ => {
            defaulted = true;
            default_str.clone()
        }
    };

    let raw = if raw.contains(' ') {
        metrics.record(CleaningEvent::TotalChargesPatched);
        raw.replace(' ', &default_str)
    } else {
        raw
    };

    let value = match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            defaulted = true;
            default
        }
    };

    if defaulted {
        metrics.record(CleaningEvent::TotalChargesDefaulted);
    }

    record.insert(config.total_charges_column.clone(), Value::Float(value));
    record
}

/// Set a missing or NaN phone service flag to the configured default ("No").
pub fn fill_phone_service(
    mut record: Record,
    config: &PipelineConfig,
    metrics: &dyn MetricsSink,
) -> Record {
    let missing = record
        .get(&config.phone_service_column)
        .map_or(true, Value::is_missing);

    if missing {
        metrics.record(CleaningEvent::PhoneServiceImputed);
        record.insert(
            config.phone_service_column.clone(),
            Value::Text(config.phone_service_default.clone()),
        );
    }

    record
}

/// Map the phone service flag to 1 for "yes" (any case) and 0 otherwise.
///
/// Runs after `fill_phone_service`; a missing value here is a sequencing error.
pub fn map_phone_service(mut record: Record, config: &PipelineConfig) -> Result<Record, CleanError> {
    let mapped = match record.get(&config.phone_service_column) {
        Some(Value::Text(s)) => Value::Int(i64::from(s.eq_ignore_ascii_case("yes"))),
        Some(Value::Int(v)) => Value::Int(*v),
        _ => {
            return Err(CleanError::MissingField {
                column: config.phone_service_column.clone(),
            })
        }
    };

    record.insert(config.phone_service_column.clone(), mapped);
    Ok(record)
}

/// Tenure imputation backed by a mean computed once from a reference dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TenureImputer {
    mean: f64,
}

impl TenureImputer {
    pub fn new(mean: f64) -> Self {
        Self { mean }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Missing or NaN → the mean; empty → per `EmptyTenurePolicy`; otherwise parse.
    /// A non-numeric value is fatal.
    pub fn fill(
        &self,
        mut record: Record,
        config: &PipelineConfig,
        metrics: &dyn MetricsSink,
    ) -> Result<Record, CleanError> {
        let column = &config.tenure_column;

        let tenure = match record.get(column) {
            None => None,
            Some(value) if value.is_missing() => None,
            Some(Value::Text(s)) if s.trim().is_empty() => {
                metrics.record(CleaningEvent::TenureImputedEmpty);
                Some(match config.empty_tenure_policy {
                    EmptyTenurePolicy::Mean => self.mean,
                    EmptyTenurePolicy::Zero => 0.0,
                })
            }
            Some(Value::Text(s)) => {
                let parsed = s.trim().parse::<f64>().map_err(|_| CleanError::InvalidNumber {
                    column: column.clone(),
                    value: s.clone(),
                })?;
                (!parsed.is_nan()).then_some(parsed)
            }
            Some(other) => other.as_f64(),
        };

        let tenure = tenure.unwrap_or_else(|| {
            metrics.record(CleaningEvent::TenureImputedMean);
            self.mean
        });

        record.insert(column.clone(), Value::Float(tenure));
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::metrics::{CleaningCounters, NoopMetrics};

    fn with(column: &str, value: Option<Value>) -> Record {
        let mut record = Record::new();
        if let Some(value) = value {
            record.insert(column.to_string(), value);
        }
        record
    }

    fn text(s: &str) -> Option<Value> {
        Some(Value::Text(s.to_string()))
    }

    fn total_charges(value: Option<Value>) -> Value {
        let config = PipelineConfig::default();
        fill_total_charges(with("TotalCharges", value), &config, &NoopMetrics)["TotalCharges"].clone()
    }

    #[test]
    fn test_total_charges_defaults() {
        assert_eq!(total_charges(None), Value::Float(2279.0));
        assert_eq!(total_charges(text("")), Value::Float(2279.0));
        assert_eq!(total_charges(Some(Value::Null)), Value::Float(2279.0));
        assert_eq!(total_charges(Some(Value::Float(f64::NAN))), Value::Float(2279.0));
        assert_eq!(total_charges(text("abc")), Value::Float(2279.0));
        assert_eq!(total_charges(text("inf")), Value::Float(2279.0));
    }

    #[test]
    fn test_total_charges_parses_numbers() {
        assert_eq!(total_charges(text("1889.5")), Value::Float(1889.5));
        assert_eq!(total_charges(Some(Value::Int(42))), Value::Float(42.0));
    }

    #[test]
    fn test_total_charges_space_substitution_is_literal() {
        // "1 234" → "1" + "2279.0" + "234"
        assert_eq!(total_charges(text("1 234")), Value::Float(12279.0234));
    }

    #[test]
    fn test_single_space_becomes_default() {
        assert_eq!(total_charges(text(" ")), Value::Float(2279.0));
    }

    #[test]
    fn test_total_charges_events() {
        let config = PipelineConfig::default();
        let counters = CleaningCounters::new();
        fill_total_charges(with("TotalCharges", text("")), &config, &counters);
        fill_total_charges(with("TotalCharges", text("1 234")), &config, &counters);
        fill_total_charges(with("TotalCharges", text("12.5")), &config, &counters);

        assert_eq!(counters.get(CleaningEvent::TotalChargesDefaulted), 1);
        assert_eq!(counters.get(CleaningEvent::TotalChargesPatched), 1);
    }

    #[test]
    fn test_phone_service_fill() {
        let config = PipelineConfig::default();
        for missing in [None, Some(Value::Null), Some(Value::Float(f64::NAN))] {
            let out = fill_phone_service(with("PhoneService", missing), &config, &NoopMetrics);
            assert_eq!(out["PhoneService"], Value::Text("No".to_string()));
        }

        let out = fill_phone_service(with("PhoneService", text("Yes")), &config, &NoopMetrics);
        assert_eq!(out["PhoneService"], Value::Text("Yes".to_string()));
    }

    #[test]
    fn test_phone_service_mapping_case_insensitive() {
        let config = PipelineConfig::default();
        for (raw, expected) in [("Yes", 1), ("YES", 1), ("yes", 1), ("No", 0), ("", 0), ("maybe", 0)] {
            let out = map_phone_service(with("PhoneService", text(raw)), &config).unwrap();
            assert_eq!(out["PhoneService"], Value::Int(expected), "input {:?}", raw);
        }
    }

    #[test]
    fn test_missing_phone_service_maps_to_zero_after_fill() {
        let config = PipelineConfig::default();
        let filled = fill_phone_service(with("PhoneService", None), &config, &NoopMetrics);
        let out = map_phone_service(filled, &config).unwrap();
        assert_eq!(out["PhoneService"], Value::Int(0));
    }

    #[test]
    fn test_map_phone_service_requires_fill() {
        let config = PipelineConfig::default();
        assert!(matches!(
            map_phone_service(with("PhoneService", None), &config),
            Err(CleanError::MissingField { .. })
        ));
    }

    #[test]
    fn test_tenure_missing_uses_mean() {
        let config = PipelineConfig::default();
        let imputer = TenureImputer::new(32.5);
        for missing in [None, Some(Value::Null), Some(Value::Float(f64::NAN))] {
            let out = imputer.fill(with("tenure", missing), &config, &NoopMetrics).unwrap();
            assert_eq!(out["tenure"], Value::Float(32.5));
        }
    }

    #[test]
    fn test_tenure_empty_with_zero_policy() {
        let config = PipelineConfig::default().with_empty_tenure_policy(EmptyTenurePolicy::Zero);
        let imputer = TenureImputer::new(32.5);
        let out = imputer.fill(with("tenure", text("")), &config, &NoopMetrics).unwrap();
        assert_eq!(out["tenure"], Value::Float(0.0));
    }

    #[test]
    fn test_tenure_empty_with_mean_policy() {
        let config = PipelineConfig::default().with_empty_tenure_policy(EmptyTenurePolicy::Mean);
        let imputer = TenureImputer::new(32.5);
        let out = imputer.fill(with("tenure", text("")), &config, &NoopMetrics).unwrap();
        assert_eq!(out["tenure"], Value::Float(32.5));
    }

    #[test]
    fn test_tenure_parses_and_rejects() {
        let config = PipelineConfig::default();
        let imputer = TenureImputer::new(32.5);

        let out = imputer.fill(with("tenure", text("12")), &config, &NoopMetrics).unwrap();
        assert_eq!(out["tenure"], Value::Float(12.0));

        let err = imputer
            .fill(with("tenure", text("twelve")), &config, &NoopMetrics)
            .unwrap_err();
        assert_eq!(
            err,
            CleanError::InvalidNumber {
                column: "tenure".to_string(),
                value: "twelve".to_string()
            }
        );
    }

    #[test]
    fn test_tenure_events_are_distinct() {
        let config = PipelineConfig::default();
        let imputer = TenureImputer::new(1.0);
        let counters = CleaningCounters::new();
        imputer.fill(with("tenure", None), &config, &counters).unwrap();
        imputer.fill(with("tenure", text("")), &config, &counters).unwrap();
        imputer.fill(with("tenure", text("3")), &config, &counters).unwrap();

        assert_eq!(counters.get(CleaningEvent::TenureImputedMean), 1);
        assert_eq!(counters.get(CleaningEvent::TenureImputedEmpty), 1);
    }
}
