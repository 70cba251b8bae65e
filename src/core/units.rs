//! Unit conversion
//!
//! Registry of categories and units, the two-step conversion engine, the
//! display formatter and the linked two-field session built on top of them.

pub mod catalog;
pub mod engine;
pub mod format;
pub mod law;
pub mod registry;
pub mod session;

pub use catalog::{builtin_categories, builtin_registry};
pub use engine::{convert, convert_in, convert_text, parse_number, ConversionError};
pub use format::format_number;
pub use law::{BaseConversion, ConversionLaw, LawKind};
pub use registry::{Category, Registry, RegistryError, Unit};
pub use session::{ConversionSession, Side};
