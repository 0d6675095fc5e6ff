use crate::core::CliError;
use clap::Args;
use po_csv::ConvertOptions;
use po_csv_toml::PoCsvConfig;
use std::path::{Path, PathBuf};

/// Options shared by `po2csv` and `csv2po`.
#[derive(Debug, Clone, Default, Args)]
pub struct ConvertArgs {
    /// Path to a po-csv.toml file (defaults to <base_path>/po-csv.toml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Catalog file extension to scan for, without the dot.
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Log every catalog processed.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Resolve the configuration for `base_path` and apply command-line overrides.
    pub fn resolve_options(&self, base_path: &Path) -> Result<ConvertOptions, CliError> {
        let mut config = PoCsvConfig::resolve(self.config.as_deref(), base_path)?;

        if let Some(extension) = &self.extension {
            config.extension = extension.clone();
            config.validate()?;
        }

        tracing::debug!("Using configuration {:?}", config);
        Ok(config.convert_options())
    }
}
