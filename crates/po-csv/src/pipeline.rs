//! End-to-end export (catalogs to table) and import (table to catalogs).

use crate::error::PoCsvError;
use crate::locale::parse_locales;
use crate::merge::{StagedCatalog, stage_merge};
use crate::scan::{DEFAULT_EXTENSION, find_files};
use crate::table::TranslationTable;
use crate::tabular::{TableLayout, read_csv_file, write_to_csv_file};
use std::path::{Path, PathBuf};

/// Settings shared by both directions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Catalog file extension, without the dot.
    pub extension: String,
    /// Order locale columns lexicographically instead of by discovery.
    pub sort_locales: bool,
    pub layout: TableLayout,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            sort_locales: true,
            layout: TableLayout::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    /// Catalog files read.
    pub catalogs: Vec<PathBuf>,
    /// Locale columns, in header order.
    pub locales: Vec<String>,
    /// Data rows written.
    pub rows: usize,
}

/// Export every catalog under `base` into the CSV file at `output`.
pub fn export(
    base: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ExportSummary, PoCsvError> {
    let catalogs = find_files(base, &options.extension)?;
    let locales = parse_locales(&catalogs, options.sort_locales)?;
    let headers = options.layout.headers(&locales);

    let table = TranslationTable::from_catalogs(&catalogs)?;
    write_to_csv_file(&headers, &table, output, &options.layout)?;

    tracing::info!(
        "Exported {} catalog(s) in {} locale(s) to {}",
        catalogs.len(),
        locales.len(),
        output.display()
    );

    Ok(ExportSummary {
        catalogs,
        locales,
        rows: table.len(),
    })
}

/// Every catalog under a base directory with the table applied in memory.
///
/// Building the plan fails on the first catalog that cannot be resolved, so a
/// plan only exists when every catalog can be written.
#[derive(Debug)]
pub struct ImportPlan {
    /// Rows read from the table file.
    pub rows: usize,
    pub staged: Vec<StagedCatalog>,
}

impl ImportPlan {
    pub fn changed(&self) -> impl Iterator<Item = &StagedCatalog> {
        self.staged.iter().filter(|staged| staged.is_changed())
    }

    /// Write every changed catalog, returning how many were written.
    pub fn commit(&self) -> Result<usize, PoCsvError> {
        self.commit_with(|_, _| {})
    }

    /// Like [`ImportPlan::commit`], calling `on_commit` after each staged
    /// catalog with whether it was written.
    pub fn commit_with<F>(&self, mut on_commit: F) -> Result<usize, PoCsvError>
    where
        F: FnMut(&StagedCatalog, bool),
    {
        let mut written = 0;
        for staged in &self.staged {
            let wrote = staged.commit()?;
            if wrote {
                written += 1;
            }
            on_commit(staged, wrote);
        }
        Ok(written)
    }
}

/// Read the table at `input` and stage it into every catalog under `base`.
pub fn plan_import(
    base: &Path,
    input: &Path,
    options: &ConvertOptions,
) -> Result<ImportPlan, PoCsvError> {
    let table = read_csv_file(input, &options.layout)?;
    let catalogs = find_files(base, &options.extension)?;

    let staged = catalogs
        .iter()
        .map(|path| stage_merge(&table, path))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ImportPlan {
        rows: table.len(),
        staged,
    })
}

#[derive(Debug)]
pub struct ImportSummary {
    /// Catalogs merged (or that would be, in a dry run).
    pub catalogs: usize,
    /// Catalogs rewritten because a translation changed.
    pub written: usize,
    pub plan: ImportPlan,
    pub dry_run: bool,
}

/// Merge the table at `input` into every catalog under `base`.
///
/// Nothing is written unless every catalog resolves against the table. With
/// `dry_run` nothing is written at all.
pub fn import(
    base: &Path,
    input: &Path,
    options: &ConvertOptions,
    dry_run: bool,
) -> Result<ImportSummary, PoCsvError> {
    let plan = plan_import(base, input, options)?;

    let catalogs = plan.staged.len();
    let written = if dry_run { 0 } else { plan.commit()? };

    tracing::info!(
        "Merged {} row(s) into {} catalog(s), {} rewritten{}",
        plan.rows,
        catalogs,
        written,
        if dry_run { " (dry run)" } else { "" }
    );

    Ok(ImportSummary {
        catalogs,
        written,
        plan,
        dry_run,
    })
}
