use crate::core::formats::{self, xml, DataConverter};
use crate::shared::types::FormatDetection;
use log::debug;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

pub use crate::core::formats::DataFormat;

/// Inputs beyond this size are only sniffed on their prefix
const MAX_INPUT_LENGTH: usize = 64 * 1024;

const JSON_CONFIDENCE: f64 = 0.99;
const XML_CONFIDENCE: f64 = 0.95;
const YAML_CONFIDENCE: f64 = 0.8;
const CSV_CONFIDENCE: f64 = 0.7;
const BASE64_CONFIDENCE: f64 = 0.6;
const URL_CONFIDENCE: f64 = 0.6;

/// Guess the data format of a pasted text
///
/// Purely advisory: the result never gates a conversion.
pub fn detect_format(text: &str) -> FormatDetection {
    let trimmed = truncate(text.trim());
    if trimmed.is_empty() {
        return FormatDetection::unknown();
    }

    let detection = if looks_like_json(trimmed) {
        FormatDetection::found(DataFormat::Json, JSON_CONFIDENCE)
    } else if looks_like_xml(trimmed) {
        FormatDetection::found(DataFormat::Xml, XML_CONFIDENCE)
    } else if looks_like_yaml(trimmed) {
        FormatDetection::found(DataFormat::Yaml, YAML_CONFIDENCE)
    } else if looks_like_csv(trimmed) {
        FormatDetection::found(DataFormat::Csv, CSV_CONFIDENCE)
    } else if looks_like_base64(trimmed) {
        FormatDetection::found(DataFormat::Base64, BASE64_CONFIDENCE)
    } else if looks_like_url_encoded(trimmed) {
        FormatDetection::found(DataFormat::Url, URL_CONFIDENCE)
    } else {
        FormatDetection::unknown()
    };

    debug!(
        "[detect_format] {:?} (confidence {:?})",
        detection.format, detection.confidence
    );
    detection
}

/// Data converters that read the detected format
pub fn suggest_converters(detection: &FormatDetection) -> Vec<DataConverter> {
    match detection.format {
        Some(format) => DataConverter::ALL
            .into_iter()
            .filter(|converter| converter.source() == format)
            .collect(),
        None => Vec::new(),
    }
}

fn truncate(text: &str) -> &str {
    if text.len() <= MAX_INPUT_LENGTH {
        return text;
    }
    let mut end = MAX_INPUT_LENGTH;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn looks_like_json(text: &str) -> bool {
    (text.starts_with('{') || text.starts_with('['))
        && matches!(
            formats::read_json(text),
            Ok(Value::Object(_)) | Ok(Value::Array(_))
        )
}

fn looks_like_xml(text: &str) -> bool {
    text.starts_with('<') && xml::read_xml(text).is_ok()
}

fn looks_like_yaml(text: &str) -> bool {
    static YAML_LINE_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = YAML_LINE_REGEX.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:-\s+\S|[\w.-]+\s*:(?:\s|$))").expect("valid yaml line regex")
    });

    re.is_match(text)
        && matches!(
            formats::read_yaml(text),
            Ok(Value::Object(_)) | Ok(Value::Array(_))
        )
}

fn looks_like_csv(text: &str) -> bool {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = 0;
    let mut width = None;
    for record in reader.records() {
        let Ok(record) = record else {
            return false;
        };
        if record.len() < 2 || width.is_some_and(|w| w != record.len()) {
            return false;
        }
        width = Some(record.len());
        rows += 1;
    }
    rows >= 2
}

fn looks_like_base64(text: &str) -> bool {
    static BASE64_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = BASE64_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9+/]{4,}={0,2}$").expect("valid base64 regex")
    });

    text.len() % 4 == 0 && re.is_match(text) && formats::decode_base64(text).is_ok()
}

fn looks_like_url_encoded(text: &str) -> bool {
    static PERCENT_ESCAPE_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = PERCENT_ESCAPE_REGEX
        .get_or_init(|| Regex::new(r"%[0-9A-Fa-f]{2}").expect("valid percent escape regex"));

    !text.chars().any(char::is_whitespace)
        && re.is_match(text)
        && urlencoding::decode(text).is_ok()
}
