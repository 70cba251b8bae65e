use crate::core::catalog::CatalogError;
use crate::core::formats::FormatError;
use crate::core::units::{ConversionError, RegistryError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum AppError {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Conversion Error: {0}")]
    Conversion(ConversionError),

    #[error("Format Error: {0}")]
    Format(FormatError),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Unknown Error: {0}")]
    Unknown(String),
}

// Implement conversion from standard errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("Serialization error: {}", err))
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        AppError::Conversion(err)
    }
}

impl From<FormatError> for AppError {
    fn from(err: FormatError) -> Self {
        AppError::Format(err)
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Unknown(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Unknown(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_keeps_its_kind() {
        let error: AppError = ConversionError::CategoryNotFound("vibes".to_string()).into();
        assert!(matches!(
            error,
            AppError::Conversion(ConversionError::CategoryNotFound(_))
        ));
        assert_eq!(error.to_string(), "Conversion Error: Unknown category: vibes");
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let error = AppError::Io("disk full".to_string());
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["type"], "Io");
        assert_eq!(json["details"], "disk full");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: AppError = io.into();
        assert!(matches!(error, AppError::Io(ref message) if message == "missing"));
    }
}
