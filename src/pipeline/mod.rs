//! Pipeline module - configuration, row transforms and the driver

pub mod config;
pub mod contract;
pub mod driver;
pub mod error;
pub mod impute;
pub mod loader;
pub mod metrics;
pub mod record;
pub mod reference;
pub mod stages;
pub mod writer;

pub use config::*;
pub use contract::*;
pub use driver::*;
pub use error::CleanError;
pub use impute::*;
pub use loader::*;
pub use metrics::*;
pub use record::*;
pub use reference::*;
pub use stages::*;
pub use writer::*;
