use clap::Parser;
use miette::Result as MietteResult;
use po_csv_cli::commands::{ImportArgs, run_import};
use po_csv_cli::core::exit_on_usage_error;
use po_csv_cli::utils::ui;

#[derive(Parser)]
#[command(name = "csv2po")]
#[command(about = "Merge CSV translation table values back into gettext catalogs")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    args: ImportArgs,
}

fn main() -> MietteResult<()> {
    ui::install_report_hook();

    let cli = Cli::parse();
    ui::init_logging(cli.args.convert.verbose);

    exit_on_usage_error(run_import(cli.args)).map_err(miette::Report::new)
}
