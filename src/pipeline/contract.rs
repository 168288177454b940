//! Contract validation, null guard and one-hot encoding

use tracing::trace;

use super::config::PipelineConfig;
use super::error::CleanError;
use super::metrics::{CleaningEvent, MetricsSink};
use super::record::{Record, Value};

/// Pass the record through when its contract value is in the configured domain.
///
/// Records with an absent, null or unknown contract are dropped and counted.
pub fn validate_contract(
    record: Record,
    config: &PipelineConfig,
    metrics: &dyn MetricsSink,
) -> Option<Record> {
    let valid = record
        .get(&config.contract_column)
        .and_then(Value::as_text)
        .is_some_and(|contract| config.contract_values.iter().any(|v| v == contract));

    if valid {
        Some(record)
    } else {
        trace!(contract = ?record.get(&config.contract_column), "dropping record with invalid contract");
        metrics.record(CleaningEvent::InvalidContract);
        None
    }
}

/// Fail the batch when the contract field is null. Must run before `encode_contract`,
/// which removes the field.
pub fn guard_contract(record: Record, config: &PipelineConfig) -> Result<Record, CleanError> {
    let present = record
        .get(&config.contract_column)
        .is_some_and(|value| !value.is_missing());

    if present {
        Ok(record)
    } else {
        Err(CleanError::NullContract {
            column: config.contract_column.clone(),
        })
    }
}

/// Replace the contract field by one indicator column per contract value.
///
/// An unrecognised value yields all-zero indicators.
pub fn encode_contract(mut record: Record, config: &PipelineConfig) -> Record {
    let contract = record.remove(&config.contract_column);
    let contract = contract.as_ref().and_then(Value::as_text);

    for category in &config.contract_values {
        let hot = i64::from(contract == Some(category.as_str()));
        record.insert(category.clone(), Value::Int(hot));
    }

    record
}
