//! Row model: a record maps canonical column names to loosely typed values

use std::collections::HashMap;
use std::fmt;

use super::config::PipelineConfig;

/// A single cell value as it moves through the stages
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Float(f64),
    Int(i64),
}

impl Value {
    /// Null or a floating NaN
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Text(s) => write!(f, "{}", s),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", format_float(*v)),
        }
    }
}

/// Render a float so it always reads back as a float: `2279.0`, not `2279`.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v.is_infinite() {
        let sign = if v > 0.0 { "" } else { "-" };
        format!("{}inf", sign)
    } else {
        // Debug keeps the shortest round-trip digits and a trailing ".0"
        format!("{:?}", v)
    }
}

/// One customer's feature mapping, keyed by canonical column name
pub type Record = HashMap<String, Value>;

/// Build a record by zipping the canonical column names with the data cells.
///
/// Surplus cells are ignored; when the row is short the trailing columns are
/// simply absent. Cells listed in `na_values` become `Value::Null`.
pub fn record_from_cells<'a, I>(config: &PipelineConfig, cells: I) -> Record
where
    I: IntoIterator<Item = &'a str>,
{
    config
        .column_names
        .iter()
        .zip(cells)
        .map(|(name, cell)| {
            let value = if config.is_na(cell) {
                Value::Null
            } else {
                Value::Text(cell.to_string())
            };
            (name.clone(), value)
        })
        .collect()
}
