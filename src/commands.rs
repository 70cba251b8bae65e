//! Front-end operations
//!
//! Request/response style entry points over the built-in registry and
//! catalog. A UI or the CLI calls these; none of them hold state.

use crate::core::catalog::builtin_catalog;
use crate::core::context;
use crate::core::formats::run_converter;
use crate::core::units::{self, builtin_registry, Category, ConversionError, ConversionSession};
use crate::shared::error::AppResult;
use crate::shared::types::*;

pub fn list_categories() -> Vec<CategorySummary> {
    builtin_registry().list_categories()
}

pub fn get_category(id: &str) -> Result<&'static Category, ConversionError> {
    builtin_registry()
        .find_category(id)
        .ok_or_else(|| ConversionError::CategoryNotFound(id.to_string()))
}

pub fn list_units(category_id: &str) -> Result<Vec<UnitDTO>, ConversionError> {
    Ok(get_category(category_id)?.unit_dtos())
}

/// Convert a value between two units of a built-in category
pub fn convert(
    category_id: &str,
    from_unit_id: &str,
    to_unit_id: &str,
    value: f64,
) -> Result<f64, ConversionError> {
    units::convert_in(builtin_registry(), category_id, from_unit_id, to_unit_id, value)
}

pub fn convert_units(request: &ConvertUnitsRequest) -> AppResult<ConvertUnitsResponse> {
    let result = convert(
        &request.category,
        &request.from_unit,
        &request.to_unit,
        request.amount,
    )?;

    Ok(ConvertUnitsResponse {
        result,
        formatted_result: units::format_number(result),
        from_unit: request.from_unit.clone(),
        to_unit: request.to_unit.clone(),
    })
}

pub fn list_converters() -> Vec<ConverterSummary> {
    builtin_catalog().summaries()
}

pub fn search_converters(query: &str) -> Vec<ConverterSummary> {
    builtin_catalog()
        .search(query)
        .iter()
        .map(|entry| entry.summary())
        .collect()
}

pub fn run_data_conversion(request: &DataConversionRequest) -> AppResult<DataConversionResponse> {
    let output = run_converter(&request.converter, &request.input)?;
    Ok(DataConversionResponse {
        converter: request.converter.clone(),
        output,
    })
}

pub fn detect_format(text: &str) -> FormatDetection {
    context::detect_format(text)
}

/// Start a two-field session on a built-in category's default units
pub fn new_session(category_id: &str) -> Result<ConversionSession<'static>, ConversionError> {
    ConversionSession::new(get_category(category_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formats::FormatError;
    use crate::shared::error::AppError;

    #[test]
    fn test_list_and_get_category() {
        let categories = list_categories();
        assert_eq!(categories.len(), 32);
        assert_eq!(categories[0].id, "length");
        assert_eq!(get_category("mass").unwrap().name(), "Mass");
        assert!(get_category("vibes").unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_units_reports_law() {
        let temperature = list_units("temperature").unwrap();
        let fahrenheit = temperature.iter().find(|unit| unit.id == "f").unwrap();
        assert_eq!(fahrenheit.law, units::LawKind::Affine);
        assert_eq!(fahrenheit.category, "temperature");
    }

    #[test]
    fn test_convert_units_formats_result() {
        let response = convert_units(&ConvertUnitsRequest {
            category: "length".to_string(),
            amount: 10.0,
            from_unit: "ft".to_string(),
            to_unit: "m".to_string(),
        })
        .unwrap();
        assert_eq!(response.formatted_result, "3.0480000");
        assert_eq!(response.from_unit, "ft");
    }

    #[test]
    fn test_convert_units_unknown_unit() {
        let error = convert_units(&ConvertUnitsRequest {
            category: "length".to_string(),
            amount: 1.0,
            from_unit: "m".to_string(),
            to_unit: "bogus-unit".to_string(),
        })
        .unwrap_err();
        assert!(matches!(error, AppError::Conversion(ref e) if e.is_not_found()));
    }

    #[test]
    fn test_search_converters() {
        let hits = search_converters("yaml");
        assert!(hits.iter().all(|hit| hit.kind == ConverterKind::Data));
        assert_eq!(hits.len(), 4);
        assert_eq!(list_converters().len(), 44);
    }

    #[test]
    fn test_run_data_conversion() {
        let response = run_data_conversion(&DataConversionRequest {
            converter: "base64-encode".to_string(),
            input: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(response.output, "aGk=");

        let error = run_data_conversion(&DataConversionRequest {
            converter: "length".to_string(),
            input: "1".to_string(),
        })
        .unwrap_err();
        assert!(matches!(error, AppError::Format(FormatError::UnknownConverter(_))));
    }

    #[test]
    fn test_new_session_uses_defaults() {
        let session = new_session("temperature").unwrap();
        assert_eq!(session.from_unit_id(), "c");
        assert_eq!(session.to_unit_id(), "f");
        assert_eq!(session.to_text(), "33.800000");
        assert!(new_session("vibes").is_err());
    }
}
