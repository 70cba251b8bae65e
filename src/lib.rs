pub mod cli;
pub mod commands;
pub mod core;
pub mod logging;
pub mod shared;

use clap::Parser;
use std::process::ExitCode;

pub use crate::commands::{
    convert, convert_units, detect_format, get_category, list_categories, list_converters,
    list_units, new_session, run_data_conversion, search_converters,
};
pub use crate::core::catalog::{builtin_catalog, ConverterCatalog, ConverterRef};
pub use crate::core::formats::{DataConverter, DataFormat, FormatError};
pub use crate::core::units::{
    builtin_registry, format_number, Category, ConversionError, ConversionLaw,
    ConversionSession, Registry, RegistryError, Side, Unit,
};
pub use crate::shared::error::{AppError, AppResult};

/// Binary entry point: parse arguments, run, map the outcome to an exit code
pub fn run() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
