//! The ordered row-transform chain
//!
//! Each stage maps one record to zero or one record. The chain is a plain
//! ordered composition; records are independent of each other, so the batch
//! is mapped on the rayon pool with input order preserved.

use rayon::prelude::*;

use super::config::PipelineConfig;
use super::contract::{encode_contract, guard_contract, validate_contract};
use super::error::CleanError;
use super::impute::{fill_phone_service, fill_total_charges, map_phone_service, TenureImputer};
use super::metrics::MetricsSink;
use super::record::Record;

/// A single per-record step. `Ok(None)` drops the record, `Err` aborts the batch.
pub trait RowTransform: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        record: Record,
        config: &PipelineConfig,
        metrics: &dyn MetricsSink,
    ) -> Result<Option<Record>, CleanError>;
}

/// Keep only the allow-listed keys. Absent keys are simply not copied.
pub fn filter_features(mut record: Record, allow_list: &[String]) -> Record {
    allow_list
        .iter()
        .filter_map(|name| record.remove_entry(name))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    FilterFeatures,
    ValidateContract,
    GuardContract,
    EncodeContract,
    FillTotalCharges,
    FillPhoneService,
    FillTenure(TenureImputer),
    MapPhoneService,
}

impl RowTransform for Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::FilterFeatures => "Filter Features",
            Stage::ValidateContract => "Filter Invalid Contracts",
            Stage::GuardContract => "Guard Contract",
            Stage::EncodeContract => "OHE Contract",
            Stage::FillTotalCharges => "Fill TotalCharges",
            Stage::FillPhoneService => "Fill PhoneService",
            Stage::FillTenure(_) => "Fill Tenure",
            Stage::MapPhoneService => "Map PhoneService",
        }
    }

    fn apply(
        &self,
        record: Record,
        config: &PipelineConfig,
        metrics: &dyn MetricsSink,
    ) -> Result<Option<Record>, CleanError> {
        let record = match self {
            Stage::FilterFeatures => filter_features(record, &config.features_after_contract),
            Stage::ValidateContract => return Ok(validate_contract(record, config, metrics)),
            Stage::GuardContract => guard_contract(record, config)?,
            Stage::EncodeContract => encode_contract(record, config),
            Stage::FillTotalCharges => fill_total_charges(record, config, metrics),
            Stage::FillPhoneService => fill_phone_service(record, config, metrics),
            Stage::FillTenure(imputer) => imputer.fill(record, config, metrics)?,
            Stage::MapPhoneService => map_phone_service(record, config)?,
        };
        Ok(Some(record))
    }
}

/// Ordered stages plus the configuration they read
pub struct TransformChain {
    config: PipelineConfig,
    stages: Vec<Stage>,
}

impl TransformChain {
    /// The standard cleaning sequence. The null guard sits before the encoder,
    /// which removes the contract field.
    pub fn standard(config: PipelineConfig, tenure_mean: f64) -> Self {
        let stages = vec![
            Stage::FilterFeatures,
            Stage::ValidateContract,
            Stage::GuardContract,
            Stage::EncodeContract,
            Stage::FillTotalCharges,
            Stage::FillPhoneService,
            Stage::FillTenure(TenureImputer::new(tenure_mean)),
            Stage::MapPhoneService,
        ];
        Self { config, stages }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run one record through every stage, stopping early when it is dropped.
    pub fn apply(
        &self,
        record: Record,
        metrics: &dyn MetricsSink,
    ) -> Result<Option<Record>, CleanError> {
        let mut current = record;
        for stage in &self.stages {
            match stage.apply(current, &self.config, metrics)? {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Clean a batch. The first fatal error aborts the whole batch.
    pub fn run(
        &self,
        records: Vec<Record>,
        metrics: &dyn MetricsSink,
    ) -> Result<Vec<Record>, CleanError> {
        records
            .into_par_iter()
            .filter_map(|record| self.apply(record, metrics).transpose())
            .collect()
    }
}
