//! Merging table translations back into catalogs.

use crate::catalog::{CatalogFile, ChangedEntry};
use crate::error::{PoCsvError, ensure_exists};
use crate::escape::{normalize, unescape};
use crate::locale::parse_locale;
use crate::table::TranslationTable;
use std::path::Path;

/// A catalog with table translations applied in memory but not yet saved.
#[derive(Debug)]
pub struct StagedCatalog {
    pub locale: String,
    pub catalog: CatalogFile,
    pub changes: Vec<ChangedEntry>,
}

impl StagedCatalog {
    pub fn path(&self) -> &Path {
        self.catalog.path()
    }

    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Persist the catalog if any translation changed. Returns whether the
    /// file was written.
    pub fn commit(&self) -> Result<bool, PoCsvError> {
        if !self.is_changed() {
            return Ok(false);
        }
        self.catalog.save()?;
        Ok(true)
    }
}

/// Apply `table` to the catalog at `path` without writing it.
///
/// Every singular entry's msgid is escaped and looked up in the table; a
/// msgid with no row fails with [`PoCsvError::MissingKey`]. Entries take the
/// value of the last record for the catalog's locale, unescaped. Records for
/// other locales leave the entry untouched.
pub fn stage_merge(table: &TranslationTable, path: &Path) -> Result<StagedCatalog, PoCsvError> {
    ensure_exists(path)?;

    if table.is_empty() {
        return Err(PoCsvError::invalid_argument("Translations must not be empty."));
    }

    let locale = parse_locale(path)?;
    let mut catalog = CatalogFile::open(path)?;

    let changes = catalog.update_translations(|msgid| {
        let records = table.lookup(&normalize(msgid), path)?;
        Ok(TranslationTable::value_for(records, &locale).map(unescape))
    })?;

    tracing::debug!(
        "Staged {} change(s) for locale '{}' in {}",
        changes.len(),
        locale,
        path.display()
    );

    Ok(StagedCatalog {
        locale,
        catalog,
        changes,
    })
}

/// Apply `table` to the catalog at `path` and write it back.
pub fn merge_translations_to_file(
    table: &TranslationTable,
    path: &Path,
) -> Result<Vec<ChangedEntry>, PoCsvError> {
    let staged = stage_merge(table, path)?;
    staged.commit()?;
    Ok(staged.changes)
}
