//! The in-memory translation table keyed by source string.

use crate::catalog::CatalogFile;
use crate::error::PoCsvError;
use crate::locale::parse_locale;
use indexmap::IndexMap;
use std::path::Path;

/// One locale's translation of a source string.
///
/// `fuzzy` is known when the record was read from a catalog and absent when
/// it was read back from the table file, which does not carry the flag per
/// locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslationRecord {
    pub locale: String,
    pub value: String,
    pub fuzzy: Option<bool>,
}

impl TranslationRecord {
    pub fn new(locale: impl Into<String>, value: impl Into<String>, fuzzy: Option<bool>) -> Self {
        Self {
            locale: locale.into(),
            value: value.into(),
            fuzzy,
        }
    }

    pub fn is_fuzzy(&self) -> bool {
        self.fuzzy.unwrap_or(false)
    }
}

/// Source string to the per-locale records collected for it.
///
/// Records under a key keep the order in which they were added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: IndexMap<String, Vec<TranslationRecord>>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from catalog files, in the order given.
    ///
    /// Keys are the raw source strings. If a catalog repeats a source string
    /// the last occurrence in that file wins.
    pub fn from_catalogs<P: AsRef<Path>>(paths: &[P]) -> Result<Self, PoCsvError> {
        if paths.is_empty() {
            return Err(PoCsvError::invalid_argument("no paths were passed."));
        }

        let mut table = Self::new();

        for path in paths {
            let path = path.as_ref();
            let locale = parse_locale(path)?;
            let catalog = CatalogFile::open(path)?;

            let mut per_file: IndexMap<String, (String, bool)> = IndexMap::new();
            for entry in catalog.entries() {
                per_file.insert(entry.msgid, (entry.msgstr, entry.fuzzy));
            }

            tracing::debug!(
                "Read {} entries for locale '{}' from {}",
                per_file.len(),
                locale,
                path.display()
            );

            for (msgid, (msgstr, fuzzy)) in per_file {
                table.push(msgid, TranslationRecord::new(locale.clone(), msgstr, Some(fuzzy)));
            }
        }

        Ok(table)
    }

    /// Append a record under `key`, creating the key if needed.
    pub fn push(&mut self, key: impl Into<String>, record: TranslationRecord) {
        self.entries.entry(key.into()).or_default().push(record);
    }

    /// Set the records of `key`, dropping any it had.
    pub fn replace(&mut self, key: impl Into<String>, records: Vec<TranslationRecord>) {
        self.entries.insert(key.into(), records);
    }

    pub fn get(&self, key: &str) -> Option<&[TranslationRecord]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Records for `key`, failing with [`PoCsvError::MissingKey`] when the
    /// key is absent. `path` names the catalog that asked for it.
    pub fn lookup(&self, key: &str, path: &Path) -> Result<&[TranslationRecord], PoCsvError> {
        self.get(key).ok_or_else(|| PoCsvError::MissingKey {
            key: key.to_string(),
            path: path.to_path_buf(),
        })
    }

    /// The value of the last record in `records` that carries `locale`.
    pub fn value_for<'a>(records: &'a [TranslationRecord], locale: &str) -> Option<&'a str> {
        records
            .iter()
            .rev()
            .find(|record| record.locale == locale)
            .map(|record| record.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in lexicographic order.
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TranslationRecord])> {
        self.entries
            .iter()
            .map(|(key, records)| (key.as_str(), records.as_slice()))
    }
}
