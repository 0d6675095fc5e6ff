//! `csv2po`: write table translations back into every catalog.

use crate::commands::ConvertArgs;
use crate::core::{CliError, Usage, require_operands};
use crate::utils::ui;
use clap::Parser;
use po_csv::pipeline;
use std::path::PathBuf;

pub const IMPORT_USAGE: Usage = Usage {
    program: "csv2po",
    operands: "<base_path> <input_file>",
};

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// Directory searched recursively for catalogs.
    pub base_path: Option<PathBuf>,

    /// CSV file to read.
    pub input_file: Option<PathBuf>,

    /// Surplus operands, reported as a usage error.
    #[arg(hide = true)]
    pub extra: Vec<PathBuf>,

    /// Dry run - show what would change without writing catalogs.
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub convert: ConvertArgs,
}

/// Run the import command.
///
/// Every catalog is resolved against the table before the first one is
/// written, so a missing message id leaves the whole tree untouched.
pub fn run_import(args: ImportArgs) -> Result<(), CliError> {
    let (base_path, input_file) =
        require_operands(args.base_path, args.input_file, &args.extra, &IMPORT_USAGE)?;
    let options = args.convert.resolve_options(&base_path)?;

    ui::print_import_header();

    let spinner = ui::create_spinner("Resolving catalogs...");
    let result = pipeline::plan_import(&base_path, &input_file, &options);
    spinner.finish_and_clear();
    let plan = result?;

    if args.dry_run {
        for staged in plan.changed() {
            ui::print_would_update(staged.path(), staged.changes.len());
            for change in &staged.changes {
                ui::print_entry_diff(&change.msgid, &change.before, &change.after);
            }
        }
        ui::print_import_dry_run_summary(plan.changed().count(), plan.staged.len());
        return Ok(());
    }

    let pb = ui::create_progress_bar(plan.staged.len() as u64, "Writing catalogs...");

    let result = plan.commit_with(|staged, written| {
        if written {
            pb.suspend(|| ui::print_merged(staged.path(), staged.changes.len()));
        }
        pb.inc(1);
    });
    pb.finish_and_clear();
    result?;

    ui::print_import_summary(plan.staged.len());
    Ok(())
}
