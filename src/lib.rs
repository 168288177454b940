//! churnprep: Churn Record Cleaning Library
//!
//! Cleans telecom churn records into the feature layout a pre-trained
//! classifier expects: contract validation and one-hot encoding, charge,
//! phone-service and tenure imputation, and CSV output with a canonical header.

pub mod cli;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod utils;
