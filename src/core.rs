//! Domain logic
//!
//! - `units`: unit registry, conversion engine, formatter and linked sessions
//! - `formats`: text data-format converters
//! - `catalog`: merged listing of both converter kinds
//! - `context`: local format detection

pub mod catalog;
pub mod context;
pub mod formats;
pub mod units;
