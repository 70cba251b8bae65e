//! Command-line front end

use crate::commands;
use crate::core::context::suggest_converters;
use crate::core::formats::run_converter;
use crate::core::units::{parse_number, ConversionSession};
use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::AppSettings;
use crate::shared::types::{ConverterKind, ConvertUnitsRequest, SessionSnapshot};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, warn};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "omniconvert",
    about = "Unit and data-format converter",
    version
)]
pub struct Cli {
    /// trace|debug|info|warn|error (overrides the settings file)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Settings file to use instead of the platform config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindFilter {
    Unit,
    Data,
}

impl From<KindFilter> for ConverterKind {
    fn from(kind: KindFilter) -> Self {
        match kind {
            KindFilter::Unit => ConverterKind::Unit,
            KindFilter::Data => ConverterKind::Data,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every converter, data converters first.
    List {
        #[arg(long, value_enum)]
        kind: Option<KindFilter>,
    },

    /// Find converters by name or description.
    Search { query: String },

    /// List the units of a category.
    Units { category: String },

    /// Convert one value between two units.
    Convert {
        category: String,
        from: String,
        to: String,
        #[arg(allow_negative_numbers = true)]
        value: String,
        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive two-field session read from stdin.
    Session {
        /// Defaults to the configured default category
        category: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },

    /// Run a data converter over a file or stdin.
    Data {
        /// Defaults to the configured default data converter
        converter: Option<String>,
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Guess the data format of a file or stdin.
    Detect {
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

/// Execute one command against the given streams
pub fn execute(
    command: Commands,
    settings: &AppSettings,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> AppResult<()> {
    match command {
        Commands::List { kind } => {
            let wanted = kind.map(ConverterKind::from);
            for summary in commands::list_converters()
                .into_iter()
                .filter(|summary| wanted.map_or(true, |kind| summary.kind == kind))
            {
                writeln!(out, "{:<28} {}", summary.id, summary.name)?;
            }
        }
        Commands::Search { query } => {
            for summary in commands::search_converters(&query) {
                writeln!(out, "{:<28} {}", summary.id, summary.name)?;
            }
        }
        Commands::Units { category } => {
            for unit in commands::list_units(&category)? {
                writeln!(out, "{:<14} {:<32} {}", unit.id, unit.label, unit.law)?;
            }
        }
        Commands::Convert {
            category,
            from,
            to,
            value,
            json,
        } => {
            let request = ConvertUnitsRequest {
                category,
                amount: parse_number(&value)?,
                from_unit: from,
                to_unit: to,
            };
            let response = commands::convert_units(&request)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
            } else {
                writeln!(out, "{}", response.formatted_result)?;
            }
        }
        Commands::Session { category, from, to } => {
            let category_id = category.unwrap_or_else(|| settings.preferences.default_category.clone());
            let mut session = commands::new_session(&category_id)?;
            if let Some(unit) = from {
                session.change_from_unit(&unit)?;
            }
            if let Some(unit) = to {
                session.change_to_unit(&unit)?;
            }
            run_session(&mut session, input, out)?;
        }
        Commands::Data { converter, input: path } => {
            let converter =
                converter.unwrap_or_else(|| settings.preferences.default_data_converter.clone());
            let text = read_input(path, input)?;
            let output = run_converter(&converter, &text)?;
            writeln!(out, "{}", output)?;
        }
        Commands::Detect { input: path } => {
            let text = read_input(path, input)?;
            let detection = commands::detect_format(&text);
            match (detection.format, detection.confidence) {
                (Some(format), Some(confidence)) => {
                    writeln!(out, "{} ({:.0}%)", format, confidence * 100.0)?;
                    for converter in suggest_converters(&detection) {
                        writeln!(out, "  {}", converter.id())?;
                    }
                }
                _ => writeln!(out, "unknown")?,
            }
        }
    }

    Ok(())
}

fn read_input(path: Option<PathBuf>, stdin: &mut dyn BufRead) -> AppResult<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            stdin.read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// One line of the interactive session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    EditFrom(String),
    EditTo(String),
    FromUnit(String),
    ToUnit(String),
    Swap,
    Show,
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, argument) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let needs_unit = |argument: &str| {
            if argument.is_empty() {
                Err(format!("`{verb}` needs a unit id"))
            } else {
                Ok(argument.to_string())
            }
        };

        match verb {
            "from" => Ok(SessionCommand::EditFrom(argument.to_string())),
            "to" => Ok(SessionCommand::EditTo(argument.to_string())),
            "from-unit" => needs_unit(argument).map(SessionCommand::FromUnit),
            "to-unit" => needs_unit(argument).map(SessionCommand::ToUnit),
            "swap" => Ok(SessionCommand::Swap),
            "" | "show" => Ok(SessionCommand::Show),
            "quit" | "exit" => Ok(SessionCommand::Quit),
            other => Err(format!(
                "unknown command `{other}`; expected from|to|from-unit|to-unit|swap|show|quit"
            )),
        }
    }
}

/// Drive a session from line commands, printing the state after each one
///
/// Bad commands and unknown units are reported inline and do not end the
/// session; it ends on `quit` or end of input.
pub fn run_session(
    session: &mut ConversionSession<'_>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> AppResult<()> {
    writeln!(out, "{}", render_snapshot(&session.snapshot()))?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "error: {}", message)?;
                continue;
            }
        };
        debug!("[session] {:?}", command);

        let outcome = match command {
            SessionCommand::EditFrom(text) => {
                session.edit_from(&text);
                Ok(())
            }
            SessionCommand::EditTo(text) => {
                session.edit_to(&text);
                Ok(())
            }
            SessionCommand::FromUnit(unit) => session.change_from_unit(&unit),
            SessionCommand::ToUnit(unit) => session.change_to_unit(&unit),
            SessionCommand::Swap => {
                session.swap();
                Ok(())
            }
            SessionCommand::Show => Ok(()),
            SessionCommand::Quit => break,
        };

        match outcome {
            Ok(()) => writeln!(out, "{}", render_snapshot(&session.snapshot()))?,
            Err(error) => writeln!(out, "error: {}", error)?,
        }
    }

    out.flush()?;
    Ok(())
}

/// `from_text from_unit = to_text to_unit`
pub fn render_snapshot(snapshot: &SessionSnapshot) -> String {
    format!(
        "{} {} = {} {}",
        snapshot.from_value, snapshot.from_unit, snapshot.to_value, snapshot.to_unit
    )
}

/// Settings for this invocation, with the CLI log level taking precedence
///
/// A broken settings file yields defaults; its error is returned alongside
/// so it can be logged once the logger is running.
pub fn resolve_settings(cli: &Cli) -> (AppSettings, Option<AppError>) {
    let (mut settings, load_error) = match AppSettings::load_at(cli.config.as_deref()) {
        Ok(settings) => (settings, None),
        Err(error) => (AppSettings::default(), Some(error)),
    };
    if let Some(level) = &cli.log_level {
        settings.preferences.log_level = Some(level.clone());
    }
    (settings, load_error)
}

pub fn run(cli: Cli) -> AppResult<()> {
    let (settings, load_error) = resolve_settings(&cli);
    let level = settings
        .preferences
        .log_level
        .clone()
        .unwrap_or_else(|| crate::logging::default_log_level().to_string());
    crate::logging::init_logging(&level).map_err(AppError::Config)?;
    if let Some(error) = load_error {
        warn!("[settings] Failed to load settings, using defaults: {}", error);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli.command, &settings, &mut input, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_lines(category: &str, script: &str) -> String {
        let mut session = commands::new_session(category).unwrap();
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run_session(&mut session, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn execute_to_string(command: Commands, stdin: &str) -> AppResult<String> {
        let mut input = Cursor::new(stdin.as_bytes().to_vec());
        let mut out = Vec::new();
        execute(command, &AppSettings::default(), &mut input, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_session_commands() {
        assert_eq!(
            SessionCommand::parse("from  12.5 \n"),
            Ok(SessionCommand::EditFrom("12.5".to_string()))
        );
        assert_eq!(SessionCommand::parse("to"), Ok(SessionCommand::EditTo(String::new())));
        assert_eq!(
            SessionCommand::parse("to-unit km"),
            Ok(SessionCommand::ToUnit("km".to_string()))
        );
        assert_eq!(SessionCommand::parse("swap"), Ok(SessionCommand::Swap));
        assert_eq!(SessionCommand::parse(""), Ok(SessionCommand::Show));
        assert_eq!(SessionCommand::parse("exit"), Ok(SessionCommand::Quit));
        assert!(SessionCommand::parse("from-unit").is_err());
        assert!(SessionCommand::parse("explode").is_err());
    }

    #[test]
    fn test_session_script() {
        let output = run_lines("temperature", "from 100\nswap\nto-unit parsec\nquit\nfrom 5\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "1 c = 33.800000 f",
                "100 c = 212 f",
                "212 f = 100 c",
                "error: Unknown unit 'parsec' in category 'temperature'",
            ]
        );
    }

    #[test]
    fn test_session_reports_bad_commands_and_continues() {
        let output = run_lines("length", "dance\nfrom abc\n");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("error: unknown command `dance`"));
        assert_eq!(lines[2], "abc ft =  m");
    }

    #[test]
    fn test_convert_command() {
        let output = execute_to_string(
            Commands::Convert {
                category: "temperature".to_string(),
                from: "f".to_string(),
                to: "c".to_string(),
                value: "-40".to_string(),
                json: false,
            },
            "",
        )
        .unwrap();
        assert_eq!(output, "-40\n");
    }

    #[test]
    fn test_convert_command_rejects_garbage() {
        let error = execute_to_string(
            Commands::Convert {
                category: "length".to_string(),
                from: "m".to_string(),
                to: "ft".to_string(),
                value: "ten".to_string(),
                json: true,
            },
            "",
        )
        .unwrap_err();
        assert!(matches!(error, AppError::Conversion(_)));
    }

    #[test]
    fn test_list_filters_by_kind() {
        let output = execute_to_string(
            Commands::List {
                kind: Some(KindFilter::Data),
            },
            "",
        )
        .unwrap();
        assert_eq!(output.lines().count(), 12);
        assert!(output.starts_with("json-to-yaml"));
    }

    #[test]
    fn test_data_and_detect_read_stdin() {
        let output = execute_to_string(
            Commands::Data {
                converter: Some("url-encode".to_string()),
                input: None,
            },
            "a b",
        )
        .unwrap();
        assert_eq!(output, "a%20b\n");

        let output = execute_to_string(
            Commands::Data {
                converter: None,
                input: None,
            },
            r#"{"a": 1}"#,
        )
        .unwrap();
        assert_eq!(output, "a: 1\n");

        let output = execute_to_string(Commands::Detect { input: None }, "[1, 2]").unwrap();
        assert!(output.starts_with("JSON (99%)"));
        assert!(output.contains("json-to-yaml"));
    }

    #[test]
    fn test_cli_parses_global_flags() {
        let cli = Cli::try_parse_from([
            "omniconvert",
            "convert",
            "temperature",
            "c",
            "f",
            "-40",
            "--log-level",
            "warn",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
        assert!(matches!(cli.command, Commands::Convert { ref value, .. } if value == "-40"));
    }

    #[test]
    fn test_broken_settings_file_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let config = path.to_str().unwrap();
        let cli = Cli::try_parse_from(["omniconvert", "--config", config, "list"]).unwrap();
        let (settings, load_error) = resolve_settings(&cli);
        assert_eq!(settings, AppSettings::default());
        assert!(matches!(load_error, Some(AppError::Config(_))));

        let cli = Cli::try_parse_from([
            "omniconvert",
            "--config",
            config,
            "--log-level",
            "info",
            "list",
        ])
        .unwrap();
        let (settings, _) = resolve_settings(&cli);
        assert_eq!(settings.preferences.log_level.as_deref(), Some("info"));
    }
}
