//! `po2csv`: collect every catalog under a base directory into one table.

use crate::commands::ConvertArgs;
use crate::core::{CliError, Usage, require_operands};
use crate::utils::ui;
use clap::Parser;
use po_csv::pipeline;
use std::path::PathBuf;

pub const EXPORT_USAGE: Usage = Usage {
    program: "po2csv",
    operands: "<base_path> <output_file>",
};

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Directory searched recursively for catalogs.
    pub base_path: Option<PathBuf>,

    /// CSV file to write.
    pub output_file: Option<PathBuf>,

    /// Surplus operands, reported as a usage error.
    #[arg(hide = true)]
    pub extra: Vec<PathBuf>,

    #[command(flatten)]
    pub convert: ConvertArgs,
}

/// Run the export command.
pub fn run_export(args: ExportArgs) -> Result<(), CliError> {
    let (base_path, output_file) =
        require_operands(args.base_path, args.output_file, &args.extra, &EXPORT_USAGE)?;
    let options = args.convert.resolve_options(&base_path)?;

    ui::print_export_header();

    let spinner = ui::create_spinner("Reading catalogs...");
    let result = pipeline::export(&base_path, &output_file, &options);
    spinner.finish_and_clear();
    let summary = result?;

    ui::print_locales(&summary.locales);
    ui::print_export_summary(summary.catalogs.len(), summary.rows, &output_file);

    Ok(())
}
