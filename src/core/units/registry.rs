//! Unit registry
//!
//! Units and categories are immutable once built. A `Registry` is validated
//! when it is constructed, so conversion code can rely on every category
//! having at least two uniquely named units with well-formed laws.

use super::law::{BaseConversion, ConversionLaw};
use crate::shared::types::{CategorySummary, UnitDTO};
use log::warn;
use std::collections::HashMap;
use thiserror::Error;

/// Minimum number of units a category needs to be convertible
pub const MIN_UNITS_PER_CATEGORY: usize = 2;

/// Registry construction failures
///
/// These are defects in a data set, not user errors, so they surface once at
/// startup rather than during conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Category '{category}' has {count} unit(s); at least 2 are required")]
    TooFewUnits { category: String, count: usize },

    #[error("Category '{category}' declares unit '{unit}' more than once")]
    DuplicateUnit { category: String, unit: String },

    #[error("Category id '{0}' is declared more than once")]
    DuplicateCategory(String),

    #[error("Unit '{unit}' in category '{category}' has an invalid law: {reason}")]
    InvalidLaw {
        category: String,
        unit: String,
        reason: String,
    },
}

/// A named measurement unit
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    id: String,
    name: String,
    law: ConversionLaw,
}

impl Unit {
    pub fn new(id: impl Into<String>, name: impl Into<String>, law: ConversionLaw) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            law,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn law(&self) -> &ConversionLaw {
        &self.law
    }

    pub fn to_base(&self, value: f64) -> f64 {
        self.law.to_base(value)
    }

    pub fn from_base(&self, value: f64) -> f64 {
        self.law.from_base(value)
    }
}

/// A group of mutually convertible units sharing one implicit base quantity
#[derive(Debug, Clone)]
pub struct Category {
    id: String,
    name: String,
    description: String,
    units: Vec<Unit>,
    unit_index: HashMap<String, usize>,
    default_from: Option<String>,
    default_to: Option<String>,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        units: Vec<Unit>,
    ) -> Self {
        let unit_index = units
            .iter()
            .enumerate()
            .map(|(position, unit)| (unit.id.clone(), position))
            .collect();

        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            units,
            unit_index,
            default_from: None,
            default_to: None,
        }
    }

    /// Declare the unit pair a new session starts with
    pub fn with_defaults(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.default_from = Some(from.into());
        self.default_to = Some(to.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn find_unit(&self, id: &str) -> Option<&Unit> {
        self.unit_index.get(id).map(|&position| &self.units[position])
    }

    /// Unit pair a new session starts with
    ///
    /// Declared defaults are used only when both resolve; otherwise the pair
    /// is the first two units. `None` only for a category with no units,
    /// which a `Registry` never holds.
    pub fn default_units(&self) -> Option<(&Unit, &Unit)> {
        let declared = self
            .default_from
            .as_deref()
            .and_then(|id| self.find_unit(id))
            .zip(self.default_to.as_deref().and_then(|id| self.find_unit(id)));

        declared.or_else(|| {
            let first = self.units.first()?;
            Some((first, self.units.get(1).unwrap_or(first)))
        })
    }

    pub fn default_from_unit(&self) -> Option<&Unit> {
        self.default_units().map(|(from, _)| from)
    }

    pub fn default_to_unit(&self) -> Option<&Unit> {
        self.default_units().map(|(_, to)| to)
    }

    pub fn summary(&self) -> CategorySummary {
        CategorySummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            unit_count: self.units.len(),
        }
    }

    pub fn unit_dtos(&self) -> Vec<UnitDTO> {
        self.units
            .iter()
            .map(|unit| UnitDTO {
                id: unit.id.clone(),
                label: unit.name.clone(),
                category: self.id.clone(),
                law: unit.law.kind(),
            })
            .collect()
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if self.units.len() < MIN_UNITS_PER_CATEGORY {
            return Err(RegistryError::TooFewUnits {
                category: self.id.clone(),
                count: self.units.len(),
            });
        }

        // The index keeps the last position per id, so a shorter index means duplicates
        if self.unit_index.len() != self.units.len() {
            let duplicate = self
                .units
                .iter()
                .enumerate()
                .find(|(position, unit)| self.unit_index[&unit.id] != *position)
                .map(|(_, unit)| unit.id.clone())
                .unwrap_or_default();
            return Err(RegistryError::DuplicateUnit {
                category: self.id.clone(),
                unit: duplicate,
            });
        }

        for unit in &self.units {
            unit.law.validate().map_err(|reason| RegistryError::InvalidLaw {
                category: self.id.clone(),
                unit: unit.id.clone(),
                reason,
            })?;
        }

        for declared in [&self.default_from, &self.default_to].into_iter().flatten() {
            if self.find_unit(declared).is_none() {
                warn!(
                    "[registry] category '{}' declares unknown default unit '{}', falling back to the first two units",
                    self.id, declared
                );
            }
        }

        Ok(())
    }
}

/// Ordered, validated collection of categories with O(1) lookup by id
#[derive(Debug, Clone)]
pub struct Registry {
    categories: Vec<Category>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry, rejecting malformed data sets
    pub fn from_categories(categories: Vec<Category>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(categories.len());

        for (position, category) in categories.iter().enumerate() {
            category.validate()?;
            if index.insert(category.id.clone(), position).is_some() {
                return Err(RegistryError::DuplicateCategory(category.id.clone()));
            }
        }

        Ok(Self { categories, index })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn find_category(&self, id: &str) -> Option<&Category> {
        self.index.get(id).map(|&position| &self.categories[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Case-insensitive substring match on category names, in registry order
    ///
    /// The iterator borrows the registry; calling `search` again restarts it.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Category> + 'a {
        let needle = query.trim().to_lowercase();
        self.categories
            .iter()
            .filter(move |category| category.name.to_lowercase().contains(&needle))
    }

    pub fn list_categories(&self) -> Vec<CategorySummary> {
        self.categories.iter().map(Category::summary).collect()
    }
}
