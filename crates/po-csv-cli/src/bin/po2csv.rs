use clap::Parser;
use miette::Result as MietteResult;
use po_csv_cli::commands::{ExportArgs, run_export};
use po_csv_cli::core::exit_on_usage_error;
use po_csv_cli::utils::ui;

#[derive(Parser)]
#[command(name = "po2csv")]
#[command(about = "Collect gettext catalogs into one CSV translation table")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    args: ExportArgs,
}

fn main() -> MietteResult<()> {
    ui::install_report_hook();

    let cli = Cli::parse();
    ui::init_logging(cli.args.convert.verbose);

    exit_on_usage_error(run_export(cli.args)).map_err(miette::Report::new)
}
