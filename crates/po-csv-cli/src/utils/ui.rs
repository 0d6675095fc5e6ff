// CLI output formatting with consistent styling using indicatif and colored.
// Results go to stdout with println!; tracing is reserved for diagnostics on stderr.

use colored::Colorize as _;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal as _;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const PD_TICK: Duration = Duration::from_millis(100);

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PO_CSV_LOG";

fn is_interactive() -> bool {
    std::io::stdout().is_terminal()
}

/// Install the tracing subscriber on stderr.
///
/// `verbose` forces `debug`; otherwise `PO_CSV_LOG` is honoured and falls back
/// to `warn`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Install the miette report handler used by both binaries.
pub fn install_report_hook() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))
    .ok();
}

pub fn create_spinner(msg: &str) -> ProgressBar {
    if !is_interactive() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

pub fn create_progress_bar(len: u64, msg: &str) -> ProgressBar {
    if !is_interactive() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

pub fn print_export_header() {
    println!("{}", "PO to CSV Export".dimmed());
}

pub fn print_import_header() {
    println!("{}", "CSV to PO Import".dimmed());
}

pub fn print_locales(locales: &[String]) {
    println!(
        "{} {}",
        "Found".dimmed(),
        format!("{} locale(s)", locales.len()).green()
    );
    println!("{}", locales.join("\n"));
}

pub fn print_export_summary(catalogs: usize, rows: usize, output: &Path) {
    println!(
        "{} {} {}",
        "Wrote".dimmed(),
        format!("{} row(s)", rows).cyan(),
        format!("to {}", output.display()).dimmed()
    );
    println!(
        "{} Processed {} translation files.",
        "Done!".green(),
        catalogs
    );
}

pub fn print_merged(path: &Path, changes: usize) {
    println!(
        "{} {} ({} change(s))",
        "Updated".green(),
        path.display(),
        changes.to_string().cyan()
    );
}

pub fn print_would_update(path: &Path, changes: usize) {
    println!(
        "{} {} ({} change(s))",
        "Would update:".yellow(),
        path.display(),
        changes.to_string().cyan()
    );
}

pub fn print_import_summary(catalogs: usize) {
    println!(
        "{} Merged translations in {} files.",
        "Done!".green(),
        catalogs
    );
}

pub fn print_import_dry_run_summary(changed: usize, catalogs: usize) {
    println!(
        "{} {} of {} file(s) would change",
        "Dry run:".yellow(),
        changed,
        catalogs
    );
}

/// Print the change of one translated string as a line diff.
pub fn print_entry_diff(msgid: &str, before: &str, after: &str) {
    use similar::{ChangeTag, TextDiff};

    println!("  {} {}", "msgid".dimmed(), msgid.bold());

    let diff = TextDiff::from_lines(before, after);
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        let line = format!("  {} {}", sign, change.value().trim_end_matches('\n'));
        match change.tag() {
            ChangeTag::Delete => println!("{}", line.red()),
            ChangeTag::Insert => println!("{}", line.green()),
            ChangeTag::Equal => println!("{}", line.dimmed()),
        }
    }
}
