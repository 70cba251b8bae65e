//! Context detection
//!
//! Local heuristics that look at a pasted text and suggest which data
//! converters apply to it.

pub mod detection;

pub use detection::{detect_format, suggest_converters, DataFormat};
