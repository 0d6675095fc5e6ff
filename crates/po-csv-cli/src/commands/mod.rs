//! CLI command implementations.

mod common;
mod export;
mod import;

pub use common::ConvertArgs;
pub use export::{EXPORT_USAGE, ExportArgs, run_export};
pub use import::{IMPORT_USAGE, ImportArgs, run_import};
