//! Data-format converters
//!
//! Text-to-text converters (JSON, YAML, XML, CSV, Base64, URL encoding) that
//! share the unit registry's id namespace. Structured formats go through a
//! `serde_json::Value` so every pair is one reader plus one writer.

pub mod table;
pub mod xml;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;

/// Text formats known to the converters and the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "omniconvert/")]
pub enum DataFormat {
    Json,
    Yaml,
    Xml,
    Csv,
    Base64,
    Url,
    /// Arbitrary text, the source of the encoders
    Text,
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DataFormat::Json => "JSON",
            DataFormat::Yaml => "YAML",
            DataFormat::Xml => "XML",
            DataFormat::Csv => "CSV",
            DataFormat::Base64 => "Base64",
            DataFormat::Url => "URL-encoded",
            DataFormat::Text => "text",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum FormatError {
    #[error("Invalid {format}: {message}")]
    Parse { format: DataFormat, message: String },

    #[error("Unsupported input: {0}")]
    Unsupported(String),

    #[error("Unknown converter: {0}")]
    UnknownConverter(String),
}

impl FormatError {
    pub(crate) fn parse(format: DataFormat, message: impl fmt::Display) -> Self {
        FormatError::Parse {
            format,
            message: message.to_string(),
        }
    }
}

/// The built-in data converters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataConverter {
    JsonToYaml,
    YamlToJson,
    JsonToXml,
    XmlToJson,
    YamlToXml,
    XmlToYaml,
    JsonToCsv,
    CsvToJson,
    Base64Encode,
    Base64Decode,
    UrlEncode,
    UrlDecode,
}

impl DataConverter {
    /// Listing order of the catalog
    pub const ALL: [DataConverter; 12] = [
        DataConverter::JsonToYaml,
        DataConverter::YamlToJson,
        DataConverter::JsonToXml,
        DataConverter::XmlToJson,
        DataConverter::YamlToXml,
        DataConverter::XmlToYaml,
        DataConverter::JsonToCsv,
        DataConverter::CsvToJson,
        DataConverter::Base64Encode,
        DataConverter::Base64Decode,
        DataConverter::UrlEncode,
        DataConverter::UrlDecode,
    ];

    pub fn id(self) -> &'static str {
        match self {
            DataConverter::JsonToYaml => "json-to-yaml",
            DataConverter::YamlToJson => "yaml-to-json",
            DataConverter::JsonToXml => "json-to-xml",
            DataConverter::XmlToJson => "xml-to-json",
            DataConverter::YamlToXml => "yaml-to-xml",
            DataConverter::XmlToYaml => "xml-to-yaml",
            DataConverter::JsonToCsv => "json-to-csv",
            DataConverter::CsvToJson => "csv-to-json",
            DataConverter::Base64Encode => "base64-encode",
            DataConverter::Base64Decode => "base64-decode",
            DataConverter::UrlEncode => "url-encode",
            DataConverter::UrlDecode => "url-decode",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DataConverter::JsonToYaml => "JSON to YAML",
            DataConverter::YamlToJson => "YAML to JSON",
            DataConverter::JsonToXml => "JSON to XML",
            DataConverter::XmlToJson => "XML to JSON",
            DataConverter::YamlToXml => "YAML to XML",
            DataConverter::XmlToYaml => "XML to YAML",
            DataConverter::JsonToCsv => "JSON to CSV",
            DataConverter::CsvToJson => "CSV to JSON",
            DataConverter::Base64Encode => "Base64 Encode",
            DataConverter::Base64Decode => "Base64 Decode",
            DataConverter::UrlEncode => "URL Encode",
            DataConverter::UrlDecode => "URL Decode",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DataConverter::JsonToYaml => "Convert JSON data to YAML format.",
            DataConverter::YamlToJson => "Convert YAML data to JSON format.",
            DataConverter::JsonToXml => "Convert JSON data to XML format.",
            DataConverter::XmlToJson => "Convert XML data to JSON format.",
            DataConverter::YamlToXml => "Convert YAML data to XML format.",
            DataConverter::XmlToYaml => "Convert XML data to YAML format.",
            DataConverter::JsonToCsv => "Convert a JSON array of objects to CSV.",
            DataConverter::CsvToJson => "Convert CSV with a header row to JSON.",
            DataConverter::Base64Encode => "Encode text to Base64.",
            DataConverter::Base64Decode => "Decode Base64 to text.",
            DataConverter::UrlEncode => "Encode text for use in URLs.",
            DataConverter::UrlDecode => "Decode URL-encoded text.",
        }
    }

    pub fn source(self) -> DataFormat {
        match self {
            DataConverter::JsonToYaml | DataConverter::JsonToXml | DataConverter::JsonToCsv => {
                DataFormat::Json
            }
            DataConverter::YamlToJson | DataConverter::YamlToXml => DataFormat::Yaml,
            DataConverter::XmlToJson | DataConverter::XmlToYaml => DataFormat::Xml,
            DataConverter::CsvToJson => DataFormat::Csv,
            DataConverter::Base64Encode | DataConverter::UrlEncode => DataFormat::Text,
            DataConverter::Base64Decode => DataFormat::Base64,
            DataConverter::UrlDecode => DataFormat::Url,
        }
    }

    pub fn target(self) -> DataFormat {
        match self {
            DataConverter::YamlToJson | DataConverter::XmlToJson | DataConverter::CsvToJson => {
                DataFormat::Json
            }
            DataConverter::JsonToYaml | DataConverter::XmlToYaml => DataFormat::Yaml,
            DataConverter::JsonToXml | DataConverter::YamlToXml => DataFormat::Xml,
            DataConverter::JsonToCsv => DataFormat::Csv,
            DataConverter::Base64Encode => DataFormat::Base64,
            DataConverter::UrlEncode => DataFormat::Url,
            DataConverter::Base64Decode | DataConverter::UrlDecode => DataFormat::Text,
        }
    }

    pub fn find(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|converter| converter.id() == id)
    }

    /// Run the converter; blank input always yields blank output
    pub fn convert(self, input: &str) -> Result<String, FormatError> {
        if input.trim().is_empty() {
            return Ok(String::new());
        }

        debug!("[data_convert] {} ({} bytes)", self.id(), input.len());

        match self {
            DataConverter::JsonToYaml => write_yaml(&read_json(input)?),
            DataConverter::YamlToJson => write_json(&read_yaml(input)?),
            DataConverter::JsonToXml => xml::write_xml(&read_json(input)?),
            DataConverter::XmlToJson => write_json(&xml::read_xml(input)?),
            DataConverter::YamlToXml => xml::write_xml(&read_yaml(input)?),
            DataConverter::XmlToYaml => write_yaml(&xml::read_xml(input)?),
            DataConverter::JsonToCsv => table::write_csv(&read_json(input)?),
            DataConverter::CsvToJson => write_json(&table::read_csv(input)?),
            DataConverter::Base64Encode => Ok(STANDARD.encode(input.as_bytes())),
            DataConverter::Base64Decode => decode_base64(input),
            DataConverter::UrlEncode => Ok(urlencoding::encode(input).into_owned()),
            DataConverter::UrlDecode => urlencoding::decode(input)
                .map(|decoded| decoded.into_owned())
                .map_err(|e| FormatError::parse(DataFormat::Url, e)),
        }
    }
}

impl fmt::Display for DataConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DataConverter {
    type Err = FormatError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Self::find(id).ok_or_else(|| FormatError::UnknownConverter(id.to_string()))
    }
}

/// Run a converter by id
pub fn run_converter(id: &str, input: &str) -> Result<String, FormatError> {
    id.parse::<DataConverter>()?.convert(input)
}

pub(crate) fn read_json(input: &str) -> Result<Value, FormatError> {
    serde_json::from_str(input).map_err(|e| FormatError::parse(DataFormat::Json, e))
}

fn write_json(value: &Value) -> Result<String, FormatError> {
    serde_json::to_string_pretty(value).map_err(|e| FormatError::Unsupported(e.to_string()))
}

pub(crate) fn read_yaml(input: &str) -> Result<Value, FormatError> {
    serde_yaml::from_str(input).map_err(|e| FormatError::parse(DataFormat::Yaml, e))
}

fn write_yaml(value: &Value) -> Result<String, FormatError> {
    serde_yaml::to_string(value)
        .map(|yaml| yaml.trim_end().to_string())
        .map_err(|e| FormatError::Unsupported(e.to_string()))
}

pub(crate) fn decode_base64(input: &str) -> Result<String, FormatError> {
    let bytes = STANDARD
        .decode(input.trim())
        .map_err(|e| FormatError::parse(DataFormat::Base64, e))?;
    String::from_utf8(bytes)
        .map_err(|_| FormatError::parse(DataFormat::Base64, "decoded bytes are not UTF-8 text"))
}
