//! Metrics emitted at every drop and imputation point

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

/// Something a stage did to a record that is worth counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleaningEvent {
    /// Record dropped because its contract value is outside the domain
    InvalidContract,
    /// TotalCharges was missing, blank or unparseable and took the default
    TotalChargesDefaulted,
    /// Spaces inside TotalCharges were replaced by the default string
    TotalChargesPatched,
    PhoneServiceImputed,
    /// Tenure was missing or NaN and took the reference mean
    TenureImputedMean,
    /// Tenure was an empty string
    TenureImputedEmpty,
}

impl CleaningEvent {
    pub const ALL: [CleaningEvent; 6] = [
        CleaningEvent::InvalidContract,
        CleaningEvent::TotalChargesDefaulted,
        CleaningEvent::TotalChargesPatched,
        CleaningEvent::PhoneServiceImputed,
        CleaningEvent::TenureImputedMean,
        CleaningEvent::TenureImputedEmpty,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CleaningEvent::InvalidContract => "invalid_contract_rows",
            CleaningEvent::TotalChargesDefaulted => "total_charges_defaulted",
            CleaningEvent::TotalChargesPatched => "total_charges_patched",
            CleaningEvent::PhoneServiceImputed => "phone_service_imputed",
            CleaningEvent::TenureImputedMean => "tenure_imputed_mean",
            CleaningEvent::TenureImputedEmpty => "tenure_imputed_empty",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Receiver of cleaning events. Stages run on worker threads, so sinks must be shareable.
pub trait MetricsSink: Send + Sync {
    fn record(&self, event: CleaningEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn record(&self, _event: CleaningEvent) {}
}

/// Thread-safe counters, one per event kind
#[derive(Debug, Default)]
pub struct CleaningCounters {
    counts: [AtomicUsize; 6],
}

impl CleaningCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, event: CleaningEvent) -> usize {
        self.counts[event.index()].load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> CleaningCounts {
        CleaningCounts {
            invalid_contract_rows: self.get(CleaningEvent::InvalidContract),
            total_charges_defaulted: self.get(CleaningEvent::TotalChargesDefaulted),
            total_charges_patched: self.get(CleaningEvent::TotalChargesPatched),
            phone_service_imputed: self.get(CleaningEvent::PhoneServiceImputed),
            tenure_imputed_mean: self.get(CleaningEvent::TenureImputedMean),
            tenure_imputed_empty: self.get(CleaningEvent::TenureImputedEmpty),
        }
    }
}

impl MetricsSink for CleaningCounters {
    fn record(&self, event: CleaningEvent) {
        self.counts[event.index()].fetch_add(1, Ordering::Relaxed);
        tracing::debug!(metric = event.name(), "cleaning event");
    }
}

/// Plain snapshot of the counters, for summaries and JSON reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningCounts {
    pub invalid_contract_rows: usize,
    pub total_charges_defaulted: usize,
    pub total_charges_patched: usize,
    pub phone_service_imputed: usize,
    pub tenure_imputed_mean: usize,
    pub tenure_imputed_empty: usize,
}

impl CleaningCounts {
    pub fn total_imputations(&self) -> usize {
        self.total_charges_defaulted
            + self.total_charges_patched
            + self.phone_service_imputed
            + self.tenure_imputed_mean
            + self.tenure_imputed_empty
    }
}
