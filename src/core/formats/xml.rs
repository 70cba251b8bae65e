//! JSON value <-> XML mapping
//!
//! Writing wraps the value in `<root>`. Object keys become child elements,
//! arrays repeat their parent element (`<item>` inside a bare array), keys
//! starting with `@` become attributes, `#text` becomes text content and
//! `null` becomes an empty element. Reading applies the inverse: the
//! document element is the single top-level key and element text stays a
//! string.

use super::{DataFormat, FormatError};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde_json::{Map, Value};
use std::fmt;

const ROOT_ELEMENT: &str = "root";
const ARRAY_ITEM_ELEMENT: &str = "item";
const ATTRIBUTE_PREFIX: char = '@';
const TEXT_KEY: &str = "#text";

fn write_failed(err: impl fmt::Display) -> FormatError {
    FormatError::Unsupported(format!("failed to write XML: {}", err))
}

pub fn write_xml(value: &Value) -> Result<String, FormatError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_element(&mut writer, ROOT_ELEMENT, value)?;
    String::from_utf8(writer.into_inner()).map_err(write_failed)
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &Value,
) -> Result<(), FormatError> {
    check_name(name)?;

    match value {
        Value::Null => writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(write_failed),
        Value::Array(items) => {
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(write_failed)?;
            for item in items {
                write_element(writer, ARRAY_ITEM_ELEMENT, item)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(write_failed)
        }
        Value::Object(fields) => write_object(writer, name, fields),
        scalar => write_text_element(writer, BytesStart::new(name), &scalar_text(scalar)),
    }
}

fn write_object(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    fields: &Map<String, Value>,
) -> Result<(), FormatError> {
    let mut start = BytesStart::new(name);
    let mut text = None;
    let mut children = Vec::new();

    for (key, field) in fields {
        if let Some(attribute) = key.strip_prefix(ATTRIBUTE_PREFIX) {
            check_name(attribute)?;
            if field.is_object() || field.is_array() {
                return Err(FormatError::Unsupported(format!(
                    "attribute '{}' must hold a scalar value",
                    key
                )));
            }
            start.push_attribute((attribute, scalar_text(field).as_str()));
        } else if key == TEXT_KEY {
            text = Some(scalar_text(field));
        } else {
            children.push((key.as_str(), field));
        }
    }

    if children.is_empty() {
        return match text {
            Some(text) => write_text_element(writer, start, &text),
            None => writer.write_event(Event::Empty(start)).map_err(write_failed),
        };
    }

    writer.write_event(Event::Start(start)).map_err(write_failed)?;
    if let Some(text) = text {
        writer
            .write_event(Event::Text(BytesText::new(&text)))
            .map_err(write_failed)?;
    }
    for (key, child) in children {
        match child {
            // A keyed array repeats the key instead of nesting <item>s
            Value::Array(items) => {
                for item in items {
                    write_element(writer, key, item)?;
                }
            }
            _ => write_element(writer, key, child)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_failed)
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    start: BytesStart<'_>,
    text: &str,
) -> Result<(), FormatError> {
    let end = BytesEnd::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    writer.write_event(Event::Start(start)).map_err(write_failed)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(write_failed)?;
    writer.write_event(Event::End(end)).map_err(write_failed)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// JSON keys must be usable as XML names
fn check_name(name: &str) -> Result<(), FormatError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => chars
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')),
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(FormatError::Unsupported(format!(
            "'{}' is not a valid XML name",
            name
        )))
    }
}

/// Element being assembled while its end tag is pending
struct OpenElement {
    name: String,
    fields: Map<String, Value>,
    has_children: bool,
    text: String,
}

impl OpenElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, FormatError> {
        let mut fields = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| FormatError::parse(DataFormat::Xml, e))?;
            let key = format!(
                "{}{}",
                ATTRIBUTE_PREFIX,
                String::from_utf8_lossy(attribute.key.as_ref())
            );
            let value = attribute
                .unescape_value()
                .map_err(|e| FormatError::parse(DataFormat::Xml, e))?;
            fields.insert(key, Value::String(value.into_owned()));
        }

        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            fields,
            has_children: false,
            text: String::new(),
        })
    }

    fn add_child(&mut self, name: String, value: Value) {
        self.has_children = true;
        match self.fields.get_mut(&name) {
            Some(Value::Array(siblings)) => siblings.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.fields.insert(name, value);
            }
        }
    }

    fn finish(mut self) -> (String, Value) {
        let value = if self.fields.is_empty() && !self.has_children {
            if self.text.is_empty() {
                Value::Null
            } else {
                Value::String(self.text)
            }
        } else {
            if !self.text.is_empty() {
                self.fields.insert(TEXT_KEY.to_string(), Value::String(self.text));
            }
            Value::Object(self.fields)
        };
        (self.name, value)
    }
}

pub fn read_xml(input: &str) -> Result<Value, FormatError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut document: Option<(String, Value)> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| FormatError::parse(DataFormat::Xml, e))?;

        match event {
            Event::Start(start) => {
                if document.is_some() {
                    return Err(FormatError::parse(DataFormat::Xml, "multiple root elements"));
                }
                stack.push(OpenElement::from_start(&start)?);
            }
            Event::Empty(start) => {
                if document.is_some() {
                    return Err(FormatError::parse(DataFormat::Xml, "multiple root elements"));
                }
                let element = OpenElement::from_start(&start)?;
                close(&mut stack, &mut document, element);
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| FormatError::parse(DataFormat::Xml, "unexpected end tag"))?;
                close(&mut stack, &mut document, element);
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| FormatError::parse(DataFormat::Xml, e))?;
                append_text(&mut stack, &text)?;
            }
            Event::CData(data) => {
                append_text(&mut stack, &String::from_utf8_lossy(&data))?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(FormatError::parse(
            DataFormat::Xml,
            format!("element <{}> is never closed", open.name),
        ));
    }

    let (name, value) =
        document.ok_or_else(|| FormatError::parse(DataFormat::Xml, "no root element"))?;
    let mut root = Map::new();
    root.insert(name, value);
    Ok(Value::Object(root))
}

fn close(
    stack: &mut [OpenElement],
    document: &mut Option<(String, Value)>,
    element: OpenElement,
) {
    let (name, value) = element.finish();
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None => *document = Some((name, value)),
    }
}

fn append_text(stack: &mut [OpenElement], text: &str) -> Result<(), FormatError> {
    if text.is_empty() {
        return Ok(());
    }
    let open = stack
        .last_mut()
        .ok_or_else(|| FormatError::parse(DataFormat::Xml, "text outside the root element"))?;
    open.text.push_str(text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_wraps_in_root() {
        let xml = write_xml(&json!({"name": "omni", "version": 2})).unwrap();
        assert!(xml.starts_with("<root>"));
        assert!(xml.contains("<name>omni</name>"));
        assert!(xml.contains("<version>2</version>"));
        assert!(xml.trim_end().ends_with("</root>"));
    }

    #[test]
    fn test_write_attributes_text_and_null() {
        let xml = write_xml(&json!({
            "link": {"@href": "https://example.com?a=1&b=2", "#text": "home"},
            "empty": null
        }))
        .unwrap();
        assert!(xml.contains(r#"<link href="https://example.com?a=1&amp;b=2">home</link>"#));
        assert!(xml.contains("<empty/>"));
    }

    #[test]
    fn test_write_arrays_repeat_elements() {
        let xml = write_xml(&json!({"tag": ["a", "b"]})).unwrap();
        assert_eq!(xml.matches("<tag>").count(), 2);

        let bare = write_xml(&json!([1, 2, 3])).unwrap();
        assert_eq!(bare.matches("<item>").count(), 3);
    }

    #[test]
    fn test_write_rejects_bad_element_names() {
        let error = write_xml(&json!({"1st": true})).unwrap_err();
        assert!(matches!(error, FormatError::Unsupported(_)));
    }

    #[test]
    fn test_read_maps_document_element() {
        let value = read_xml(
            r#"<?xml version="1.0"?>
            <!-- inventory -->
            <shop open="yes">
                <item>apple</item>
                <item>pear</item>
                <owner>Ada &amp; co</owner>
                <closed/>
            </shop>"#,
        )
        .unwrap();

        assert_eq!(
            value,
            json!({
                "shop": {
                    "@open": "yes",
                    "item": ["apple", "pear"],
                    "owner": "Ada & co",
                    "closed": null
                }
            })
        );
    }

    #[test]
    fn test_read_mixed_text() {
        let value = read_xml(r#"<p lang="en">hello</p>"#).unwrap();
        assert_eq!(value, json!({"p": {"@lang": "en", "#text": "hello"}}));
    }

    #[test]
    fn test_read_rejects_malformed() {
        assert!(read_xml("<a><b></a>").is_err());
        assert!(read_xml("<a>").is_err());
        assert!(read_xml("just text").is_err());
        assert!(read_xml("<a/><b/>").is_err());
    }

    #[test]
    fn test_write_then_read_keeps_structure() {
        let original = json!({"user": {"@id": "7", "name": "Ada", "langs": ["en", "fr"]}});
        let xml = write_xml(&original).unwrap();
        let value = read_xml(&xml).unwrap();
        assert_eq!(value, json!({"root": original}));
    }
}
