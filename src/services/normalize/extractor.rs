//! Field Extractor
//!
//! Resolves the canonical lot id of one raw record by trying a fixed chain
//! of strategies. The first strategy that yields an id wins; a strategy
//! that cannot read its fields simply yields nothing and the chain moves on.

use lot_dashboard_core::{value_to_text, RawRecord};
use regex::Regex;
use serde_json::Value;

use super::fields::{DIRECT_LOT_FIELDS, WORK_ORDER_FIELDS};
use crate::utils::error::{AppError, AppResult};

/// Minimum width of the numeric part built from a work order
const WORK_ORDER_WIDTH: usize = 4;

/// One way of finding a lot id on a record
#[derive(Debug, Clone)]
pub enum ExtractionStrategy {
    /// Read the first non-empty field among the listed names
    DirectField(&'static [&'static str]),
    /// Build `{prefix}{digits:0>4}` from a work-order field
    WorkOrder {
        fields: &'static [&'static str],
        prefix: String,
    },
    /// First `{prefix}\d+` match anywhere in the record's values
    PatternScan(Regex),
}

impl ExtractionStrategy {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            ExtractionStrategy::DirectField(_) => "direct-field",
            ExtractionStrategy::WorkOrder { .. } => "work-order",
            ExtractionStrategy::PatternScan(_) => "pattern-scan",
        }
    }

    /// Apply the strategy to one record
    pub fn resolve(&self, record: &RawRecord) -> Option<String> {
        match self {
            ExtractionStrategy::DirectField(fields) => record.first_text(fields),
            ExtractionStrategy::WorkOrder { fields, prefix } => fields
                .iter()
                .find_map(|field| record.text(field).and_then(|wo| work_order_lot(prefix, &wo))),
            ExtractionStrategy::PatternScan(pattern) => record
                .fields()
                .find_map(|(_, value)| scan_value(pattern, value)),
        }
    }
}

/// Build a lot id from the digits of a work order
fn work_order_lot(prefix: &str, work_order: &str) -> Option<String> {
    let digits: String = work_order.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    Some(format!("{}{:0>width$}", prefix, digits, width = WORK_ORDER_WIDTH))
}

fn scan_value(pattern: &Regex, value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
        other => value_to_text(other).unwrap_or_else(|| other.to_string()),
    };
    pattern.find(&text).map(|m| m.as_str().to_string())
}

/// Priority-ordered chain of extraction strategies
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    strategies: Vec<ExtractionStrategy>,
}

impl FieldExtractor {
    /// Build the standard chain for a lot prefix
    pub fn new(prefix: &str) -> AppResult<Self> {
        if prefix.trim().is_empty() {
            return Err(AppError::validation("lot prefix cannot be empty"));
        }
        let pattern = Regex::new(&format!(r"{}\d+", regex::escape(prefix)))
            .map_err(|e| AppError::internal(format!("invalid lot pattern: {}", e)))?;

        Ok(Self {
            strategies: vec![
                ExtractionStrategy::DirectField(DIRECT_LOT_FIELDS),
                ExtractionStrategy::WorkOrder {
                    fields: WORK_ORDER_FIELDS,
                    prefix: prefix.to_string(),
                },
                ExtractionStrategy::PatternScan(pattern),
            ],
        })
    }

    /// Strategies in the order they are tried
    pub fn strategies(&self) -> &[ExtractionStrategy] {
        &self.strategies
    }

    /// Canonical lot id of the record, if any strategy finds one
    pub fn extract(&self, record: &RawRecord) -> Option<String> {
        self.strategies.iter().find_map(|s| s.resolve(record))
    }
}
