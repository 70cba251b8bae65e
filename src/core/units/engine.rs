//! Conversion engine
//!
//! Two-step conversion through the category's base quantity:
//! `result = to.from_base(from.to_base(value))`. Expected failures come back
//! as a `ConversionError`, never as a panic.

use super::registry::{Category, Registry, Unit};
use log::debug;
use serde::Serialize;
use thiserror::Error;

/// Domain failures of a conversion
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ConversionError {
    #[error("Unknown category: {0}")]
    CategoryNotFound(String),

    #[error("Unknown unit '{unit}' in category '{category}'")]
    UnitNotFound { category: String, unit: String },

    #[error("Not a finite number: '{0}'")]
    InvalidNumber(String),

    #[error("Conversion produced a non-finite result")]
    NonFiniteResult,
}

impl ConversionError {
    /// Whether the failure is a missing category or unit
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConversionError::CategoryNotFound(_) | ConversionError::UnitNotFound { .. }
        )
    }
}

/// Resolve a unit id inside a category
pub fn resolve_unit<'a>(category: &'a Category, unit_id: &str) -> Result<&'a Unit, ConversionError> {
    category
        .find_unit(unit_id)
        .ok_or_else(|| ConversionError::UnitNotFound {
            category: category.id().to_string(),
            unit: unit_id.to_string(),
        })
}

/// Parse user-entered text as a finite real number
///
/// Surrounding whitespace is ignored; anything else that is not a plain
/// decimal or exponent literal is rejected, as are `inf` and `NaN`.
pub fn parse_number(text: &str) -> Result<f64, ConversionError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConversionError::InvalidNumber(trimmed.to_string())),
    }
}

/// Convert `value` between two units of the same category
pub fn convert(
    category: &Category,
    from_unit_id: &str,
    to_unit_id: &str,
    value: f64,
) -> Result<f64, ConversionError> {
    let from_unit = resolve_unit(category, from_unit_id)?;
    let to_unit = resolve_unit(category, to_unit_id)?;

    if !value.is_finite() {
        return Err(ConversionError::InvalidNumber(value.to_string()));
    }

    let base_value = from_unit.to_base(value);
    let mut result = to_unit.from_base(base_value);

    // Same unit: keep the input bit for bit, as long as the law is defined there
    if from_unit_id == to_unit_id && result.is_finite() {
        result = value;
    }

    debug!(
        "[convert] {}: {} {} -> {} {} (base: {})",
        category.id(),
        value,
        from_unit_id,
        result,
        to_unit_id,
        base_value
    );

    if result.is_finite() {
        Ok(result)
    } else {
        Err(ConversionError::NonFiniteResult)
    }
}

/// Parse `text` and convert it; the path used by linked input fields
pub fn convert_text(
    category: &Category,
    from_unit_id: &str,
    to_unit_id: &str,
    text: &str,
) -> Result<f64, ConversionError> {
    let value = parse_number(text)?;
    convert(category, from_unit_id, to_unit_id, value)
}

/// Convert by category id against a registry
pub fn convert_in(
    registry: &Registry,
    category_id: &str,
    from_unit_id: &str,
    to_unit_id: &str,
    value: f64,
) -> Result<f64, ConversionError> {
    let category = registry
        .find_category(category_id)
        .ok_or_else(|| ConversionError::CategoryNotFound(category_id.to_string()))?;
    convert(category, from_unit_id, to_unit_id, value)
}
