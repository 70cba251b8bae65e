//! JSON records <-> CSV

use super::{DataFormat, FormatError};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Write an array of objects (or a single object) as CSV with a header row
///
/// The header is the union of all keys in first-seen order; missing cells are
/// empty and nested values are written as compact JSON.
pub fn write_csv(value: &Value) -> Result<String, FormatError> {
    let rows: Vec<&Map<String, Value>> = match value {
        Value::Object(row) => vec![row],
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_object().ok_or_else(|| {
                    FormatError::Unsupported("CSV rows must be JSON objects".to_string())
                })
            })
            .collect::<Result<_, _>>()?,
        _ => {
            return Err(FormatError::Unsupported(
                "CSV needs an array of objects".to_string(),
            ))
        }
    };

    let mut seen = HashSet::new();
    let header: Vec<&str> = rows
        .iter()
        .flat_map(|row| row.keys())
        .map(String::as_str)
        .filter(|key| seen.insert(*key))
        .collect();

    if header.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    let failed = |e: csv::Error| FormatError::Unsupported(format!("failed to write CSV: {}", e));

    writer.write_record(&header).map_err(failed)?;
    for row in rows {
        let record: Vec<String> = header.iter().map(|key| cell(row.get(*key))).collect();
        writer.write_record(&record).map_err(failed)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FormatError::Unsupported(format!("failed to write CSV: {}", e)))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| FormatError::Unsupported(format!("failed to write CSV: {}", e)))?;
    Ok(text.trim_end_matches('\n').to_string())
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Read CSV with a header row into an array of string-valued objects
pub fn read_csv(input: &str) -> Result<Value, FormatError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.trim().as_bytes());

    let header = reader
        .headers()
        .map_err(|e| FormatError::parse(DataFormat::Csv, e))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| FormatError::parse(DataFormat::Csv, e))?;
        let row: Map<String, Value> = header
            .iter()
            .zip(record.iter())
            .map(|(key, field)| (key.to_string(), Value::String(field.to_string())))
            .collect();
        rows.push(Value::Object(row));
    }

    Ok(Value::Array(rows))
}
