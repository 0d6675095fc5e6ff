//! Operand validation and the usage exit path.

use super::{CliError, UsageError};
use std::path::PathBuf;

/// Exit status for a usage error.
pub const USAGE_EXIT_CODE: i32 = -1;

/// The usage line of one program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Usage {
    pub program: &'static str,
    pub operands: &'static str,
}

impl Usage {
    pub fn line(&self) -> String {
        format!("Usage: {} {}", self.program, self.operands)
    }
}

/// Require exactly the two positional operands.
pub fn require_operands(
    base_path: Option<PathBuf>,
    table_file: Option<PathBuf>,
    extra: &[PathBuf],
    usage: &Usage,
) -> Result<(PathBuf, PathBuf), UsageError> {
    match (base_path, table_file) {
        (Some(base_path), Some(table_file)) if extra.is_empty() => Ok((base_path, table_file)),
        _ => Err(UsageError {
            usage: usage.line(),
        }),
    }
}

/// Print usage errors and exit with [`USAGE_EXIT_CODE`]; hand every other
/// outcome back to the caller for reporting.
pub fn exit_on_usage_error(result: Result<(), CliError>) -> Result<(), CliError> {
    match result {
        Err(CliError::Usage(err)) => {
            println!("{}\n{}", err, err.usage);
            std::process::exit(USAGE_EXIT_CODE);
        },
        other => other,
    }
}
