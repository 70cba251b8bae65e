//! Bidirectional conversion session
//!
//! Two linked numeric fields over one category. Whichever field was edited
//! last is authoritative; the other is always recomputed from it, so edits,
//! unit changes and swaps can never ping-pong between the two sides.
//!
//! # Invariants
//! - Both unit ids belong to the session's category.
//! - After every transition the dependent field holds `format_number` of the
//!   converted authoritative value, or `""` when that text does not parse or
//!   the conversion is not finite.
//! - The authoritative field's text is kept verbatim.

use super::engine::{convert_text, resolve_unit, ConversionError};
use super::format::format_number;
use super::registry::Category;
use crate::shared::types::SessionSnapshot;
use log::trace;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Text a fresh session starts with in the `from` field
pub const INITIAL_VALUE: &str = "1";

/// One of the two linked fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "omniconvert/")]
pub enum Side {
    From,
    To,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::From => Side::To,
            Side::To => Side::From,
        }
    }
}

/// Live state of one two-field converter
#[derive(Debug, Clone)]
pub struct ConversionSession<'a> {
    category: &'a Category,
    from_unit_id: String,
    to_unit_id: String,
    from_text: String,
    to_text: String,
    last_edited: Side,
}

impl<'a> ConversionSession<'a> {
    /// Start on the category's default unit pair with `1` in the `from` field
    pub fn new(category: &'a Category) -> Result<Self, ConversionError> {
        let missing = || ConversionError::UnitNotFound {
            category: category.id().to_string(),
            unit: String::new(),
        };
        let (from, to) = category.default_units().ok_or_else(missing)?;
        Ok(Self::start(category, from.id().to_string(), to.id().to_string()))
    }

    /// Start on an explicit unit pair
    pub fn with_units(
        category: &'a Category,
        from_unit_id: &str,
        to_unit_id: &str,
    ) -> Result<Self, ConversionError> {
        resolve_unit(category, from_unit_id)?;
        resolve_unit(category, to_unit_id)?;
        Ok(Self::start(
            category,
            from_unit_id.to_string(),
            to_unit_id.to_string(),
        ))
    }

    fn start(category: &'a Category, from_unit_id: String, to_unit_id: String) -> Self {
        let mut session = Self {
            category,
            from_unit_id,
            to_unit_id,
            from_text: INITIAL_VALUE.to_string(),
            to_text: String::new(),
            last_edited: Side::From,
        };
        session.recompute();
        session
    }

    pub fn category(&self) -> &'a Category {
        self.category
    }

    pub fn from_unit_id(&self) -> &str {
        &self.from_unit_id
    }

    pub fn to_unit_id(&self) -> &str {
        &self.to_unit_id
    }

    pub fn from_text(&self) -> &str {
        &self.from_text
    }

    pub fn to_text(&self) -> &str {
        &self.to_text
    }

    pub fn last_edited(&self) -> Side {
        self.last_edited
    }

    /// The user typed into the `from` field
    pub fn edit_from(&mut self, text: &str) {
        self.from_text = text.to_string();
        self.last_edited = Side::From;
        self.recompute();
    }

    /// The user typed into the `to` field
    pub fn edit_to(&mut self, text: &str) {
        self.to_text = text.to_string();
        self.last_edited = Side::To;
        self.recompute();
    }

    /// Select a new `from` unit; unknown ids leave the session untouched
    pub fn change_from_unit(&mut self, unit_id: &str) -> Result<(), ConversionError> {
        resolve_unit(self.category, unit_id)?;
        self.from_unit_id = unit_id.to_string();
        self.recompute();
        Ok(())
    }

    /// Select a new `to` unit; unknown ids leave the session untouched
    pub fn change_to_unit(&mut self, unit_id: &str) -> Result<(), ConversionError> {
        resolve_unit(self.category, unit_id)?;
        self.to_unit_id = unit_id.to_string();
        self.recompute();
        Ok(())
    }

    /// Exchange the two units
    ///
    /// The quantity the user last typed travels with its unit to the other
    /// side and stays authoritative there; the remaining side is recomputed.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from_unit_id, &mut self.to_unit_id);
        let authoritative = match self.last_edited {
            Side::From => std::mem::take(&mut self.from_text),
            Side::To => std::mem::take(&mut self.to_text),
        };
        self.last_edited = self.last_edited.opposite();
        match self.last_edited {
            Side::From => self.from_text = authoritative,
            Side::To => self.to_text = authoritative,
        }
        self.recompute();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            category: self.category.id().to_string(),
            from_unit: self.from_unit_id.clone(),
            to_unit: self.to_unit_id.clone(),
            from_value: self.from_text.clone(),
            to_value: self.to_text.clone(),
            last_edited: self.last_edited,
        }
    }

    /// Settle the dependent field from the authoritative one
    fn recompute(&mut self) {
        let (source_text, source_unit, target_unit) = match self.last_edited {
            Side::From => (&self.from_text, &self.from_unit_id, &self.to_unit_id),
            Side::To => (&self.to_text, &self.to_unit_id, &self.from_unit_id),
        };

        let rendered = match convert_text(self.category, source_unit, target_unit, source_text) {
            Ok(value) => format_number(value),
            Err(error) => {
                trace!("[session] {}: clearing dependent field ({})", self.category.id(), error);
                String::new()
            }
        };

        match self.last_edited {
            Side::From => self.to_text = rendered,
            Side::To => self.from_text = rendered,
        }
    }
}
