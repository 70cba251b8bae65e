use crate::core::formats::DataFormat;
use crate::core::units::{LawKind, Side};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "omniconvert/")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub unit_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "omniconvert/")]
pub struct UnitDTO {
    pub id: String,
    pub label: String,
    pub category: String,
    pub law: LawKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "omniconvert/")]
pub struct ConvertUnitsRequest {
    pub category: String,
    pub amount: f64,
    pub from_unit: String,
    pub to_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "omniconvert/")]
pub struct ConvertUnitsResponse {
    pub result: f64,
    pub formatted_result: String,
    pub from_unit: String,
    pub to_unit: String,
}

/// Observable state of a two-field session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "omniconvert/")]
pub struct SessionSnapshot {
    pub category: String,
    pub from_unit: String,
    pub to_unit: String,
    pub from_value: String,
    pub to_value: String,
    pub last_edited: Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "omniconvert/")]
pub enum ConverterKind {
    Unit,
    Data,
}

/// One entry of the merged converter listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "omniconvert/")]
pub struct ConverterSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ConverterKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "omniconvert/")]
pub struct DataConversionRequest {
    pub converter: String,
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "omniconvert/")]
pub struct DataConversionResponse {
    pub converter: String,
    pub output: String,
}

/// Advisory guess at the format of a pasted text
///
/// `format == None` always comes with `confidence == None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "omniconvert/")]
pub struct FormatDetection {
    pub format: Option<DataFormat>,
    pub confidence: Option<f64>,
}

impl FormatDetection {
    pub fn unknown() -> Self {
        Self {
            format: None,
            confidence: None,
        }
    }

    pub fn found(format: DataFormat, confidence: f64) -> Self {
        Self {
            format: Some(format),
            confidence: Some(confidence),
        }
    }
}
