//! Merged converter listing
//!
//! Data converters and unit categories share one id namespace. The catalog
//! lists data converters first, then categories in registry order.

use crate::core::formats::DataConverter;
use crate::core::units::{builtin_registry, Category, Registry};
use crate::shared::types::{ConverterKind, ConverterSummary};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Converter id '{0}' is used more than once")]
    DuplicateId(String),
}

/// One entry of the catalog
#[derive(Debug, Clone, Copy)]
pub enum ConverterRef<'a> {
    Data(DataConverter),
    Unit(&'a Category),
}

impl<'a> ConverterRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            ConverterRef::Data(converter) => converter.id(),
            ConverterRef::Unit(category) => category.id(),
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            ConverterRef::Data(converter) => converter.name(),
            ConverterRef::Unit(category) => category.name(),
        }
    }

    pub fn description(&self) -> &'a str {
        match self {
            ConverterRef::Data(converter) => converter.description(),
            ConverterRef::Unit(category) => category.description(),
        }
    }

    pub fn kind(&self) -> ConverterKind {
        match self {
            ConverterRef::Data(_) => ConverterKind::Data,
            ConverterRef::Unit(_) => ConverterKind::Unit,
        }
    }

    pub fn summary(&self) -> ConverterSummary {
        ConverterSummary {
            id: self.id().to_string(),
            name: self.name().to_string(),
            description: self.description().to_string(),
            kind: self.kind(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConverterCatalog<'a> {
    entries: Vec<ConverterRef<'a>>,
    index: HashMap<&'a str, usize>,
}

impl<'a> ConverterCatalog<'a> {
    pub fn new(registry: &'a Registry, data: &[DataConverter]) -> Result<Self, CatalogError> {
        let entries: Vec<ConverterRef<'a>> = data
            .iter()
            .copied()
            .map(ConverterRef::Data)
            .chain(registry.categories().iter().map(ConverterRef::Unit))
            .collect();

        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.id(), position).is_some() {
                return Err(CatalogError::DuplicateId(entry.id().to_string()));
            }
        }

        Ok(Self { entries, index })
    }

    pub fn entries(&self) -> &[ConverterRef<'a>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<ConverterRef<'a>> {
        self.index.get(id).map(|&position| self.entries[position])
    }

    /// Case-insensitive match on name or description, in listing order
    pub fn search(&self, query: &str) -> Vec<ConverterRef<'a>> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                entry.name().to_lowercase().contains(&needle)
                    || entry.description().to_lowercase().contains(&needle)
            })
            .copied()
            .collect()
    }

    pub fn summaries(&self) -> Vec<ConverterSummary> {
        self.entries.iter().map(ConverterRef::summary).collect()
    }
}

static BUILTIN_CATALOG: Lazy<ConverterCatalog<'static>> = Lazy::new(|| {
    ConverterCatalog::new(builtin_registry(), &DataConverter::ALL)
        .expect("built-in converter ids are unique")
});

/// Catalog over the built-in registry and all data converters
pub fn builtin_catalog() -> &'static ConverterCatalog<'static> {
    &BUILTIN_CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::{ConversionLaw, Unit};

    #[test]
    fn test_data_converters_come_first() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.len(), DataConverter::ALL.len() + builtin_registry().len());

        let kinds: Vec<ConverterKind> = catalog.entries().iter().map(ConverterRef::kind).collect();
        let first_unit = kinds.iter().position(|k| *k == ConverterKind::Unit).unwrap();
        assert_eq!(first_unit, DataConverter::ALL.len());
        assert!(kinds[first_unit..].iter().all(|k| *k == ConverterKind::Unit));
        assert_eq!(catalog.entries()[0].id(), "json-to-yaml");
        assert_eq!(catalog.entries()[first_unit].id(), "length");
    }

    #[test]
    fn test_find_resolves_both_kinds() {
        let catalog = builtin_catalog();
        assert!(matches!(catalog.find("url-decode"), Some(ConverterRef::Data(DataConverter::UrlDecode))));
        match catalog.find("temperature") {
            Some(ConverterRef::Unit(category)) => assert_eq!(category.name(), "Temperature"),
            other => panic!("unexpected entry: {:?}", other),
        }
        assert!(catalog.find("nope").is_none());
    }

    #[test]
    fn test_search_name_or_description() {
        let catalog = builtin_catalog();

        let ids: Vec<&str> = catalog.search("base64").iter().map(ConverterRef::id).collect();
        assert_eq!(ids, vec!["base64-encode", "base64-decode"]);

        // "temperature" only appears in the temperature category's text
        let ids: Vec<&str> = catalog.search("TEMPERATURE").iter().map(ConverterRef::id).collect();
        assert_eq!(ids, vec!["temperature"]);

        assert_eq!(catalog.search("").len(), catalog.len());
        assert!(catalog.search("zzzz-no-match").is_empty());
    }

    #[test]
    fn test_rejects_colliding_ids() {
        let clash = Category::new(
            "url-encode",
            "Clash",
            "",
            vec![
                Unit::new("a", "A", ConversionLaw::identity()),
                Unit::new("b", "B", ConversionLaw::linear(2.0)),
            ],
        );
        let registry = Registry::from_categories(vec![clash]).unwrap();
        let error = ConverterCatalog::new(&registry, &DataConverter::ALL).unwrap_err();
        assert_eq!(error, CatalogError::DuplicateId("url-encode".to_string()));
    }

    #[test]
    fn test_summaries_carry_kind() {
        let summaries = builtin_catalog().summaries();
        assert_eq!(summaries[0].kind, ConverterKind::Data);
        assert_eq!(summaries.last().map(|s| s.kind), Some(ConverterKind::Unit));
    }
}
