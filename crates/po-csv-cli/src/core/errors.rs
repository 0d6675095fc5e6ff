//! CLI error types using miette for Rust-style diagnostics.
//!
//! Each error class of the converter gets its own diagnostic code and help
//! text. Only [`UsageError`] is handled before reporting; everything else is
//! rendered by miette and exits non-zero.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use miette::Diagnostic;
use po_csv::PoCsvError;
use po_csv_toml::PoCsvConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Error when required operands are missing.
#[derive(Debug, Diagnostic, Error)]
#[error("Invalid number of arguments.")]
#[diagnostic(code(po_csv::usage), help("{usage}"))]
pub struct UsageError {
    /// The usage line of the program.
    pub usage: String,
}

/// Error when an input path does not exist.
#[derive(Debug, Diagnostic, Error)]
#[error("path not found: {}", path.display())]
#[diagnostic(
    code(po_csv::path_not_found),
    help("Check the base directory and table file operands")
)]
pub struct PathNotFoundError {
    /// The missing path.
    pub path: PathBuf,
}

/// Error when a catalog path has no locale segment.
#[derive(Debug, Diagnostic, Error)]
#[error("cannot infer a locale from {}", path.display())]
#[diagnostic(
    code(po_csv::locale::malformed_path),
    help("Catalogs must live at <app>/locale/<locale-id>/LC_MESSAGES/<file>.po")
)]
pub struct MalformedPathError {
    /// The catalog path.
    pub path: PathBuf,
}

/// Error when a catalog holds a message id the table lacks.
#[derive(Debug, Diagnostic, Error)]
#[error("message id '{key}' used by {} is missing from the translation table", path.display())]
#[diagnostic(
    code(po_csv::lookup::missing_key),
    help(
        "Re-export the table with po2csv or add a row for this message id. \
         No catalog was written."
    )
)]
pub struct MissingKeyError {
    /// The escaped message id.
    pub key: String,
    /// The catalog that needs it.
    pub path: PathBuf,
}

/// Error when the table file has no source-string column.
#[derive(Debug, Diagnostic, Error)]
#[error("translation table has no '{column}' column")]
#[diagnostic(
    code(po_csv::table::missing_column),
    help("The header row must name the msgid column; set msgid_column in po-csv.toml if it differs")
)]
pub struct MissingColumnError {
    /// The expected column header.
    pub column: String,
}

/// Error when the inputs cannot be converted.
#[derive(Debug, Diagnostic, Error)]
#[error("invalid input: {message}")]
#[diagnostic(code(po_csv::invalid_argument))]
pub struct InvalidInputError {
    /// What was wrong.
    pub message: String,
}

/// Error when a catalog cannot be parsed.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse catalog {}", path.display())]
#[diagnostic(code(po_csv::catalog::parse_error))]
pub struct CatalogParseError {
    /// The catalog path.
    pub path: PathBuf,

    /// The underlying parser message.
    #[help]
    pub help: String,
}

/// Error when the configuration file cannot be used.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to load po-csv.toml configuration")]
#[diagnostic(code(po_csv::config))]
pub struct ConfigError {
    /// The underlying error message.
    #[help]
    pub help: String,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    PathNotFound(#[from] PathNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MalformedPath(#[from] MalformedPathError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MissingKey(#[from] MissingKeyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    MissingColumn(#[from] MissingColumnError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    CatalogParse(#[from] CatalogParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    #[diagnostic(code(po_csv::io))]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(po_csv::other))]
    Other(String),
}

impl From<PoCsvError> for CliError {
    fn from(err: PoCsvError) -> Self {
        match err {
            PoCsvError::PathNotFound { path } => PathNotFoundError { path }.into(),
            PoCsvError::MalformedPath { path } => MalformedPathError { path }.into(),
            PoCsvError::MissingKey { key, path } => MissingKeyError { key, path }.into(),
            PoCsvError::MissingColumn { column } => MissingColumnError { column }.into(),
            PoCsvError::InvalidArgument(message) => InvalidInputError { message }.into(),
            PoCsvError::CatalogParse { path, message } => CatalogParseError {
                path,
                help: message,
            }
            .into(),
            PoCsvError::Io(err) => CliError::Io(err),
            other => CliError::Other(other.to_string()),
        }
    }
}

impl From<PoCsvConfigError> for CliError {
    fn from(err: PoCsvConfigError) -> Self {
        ConfigError {
            help: err.to_string(),
        }
        .into()
    }
}
