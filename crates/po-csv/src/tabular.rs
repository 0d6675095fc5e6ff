//! CSV serialization of the translation table.
//!
//! The header row is `[msgid column, fuzzy column, locale...]`. Every data
//! row holds one escaped source string, the fuzzy marker when its last
//! record is fuzzy, and one escaped translation per locale column.

use crate::error::{PoCsvError, ensure_exists};
use crate::escape::normalize;
use crate::table::{TranslationRecord, TranslationTable};
use std::io;
use std::path::Path;

/// Column names and marker used in the table file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableLayout {
    pub msgid_column: String,
    pub fuzzy_column: String,
    pub fuzzy_marker: String,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            msgid_column: "msgid".to_string(),
            fuzzy_column: "fuzzy?".to_string(),
            fuzzy_marker: "*".to_string(),
        }
    }
}

impl TableLayout {
    /// Header row for the given locale columns.
    pub fn headers<S: AsRef<str>>(&self, locales: &[S]) -> Vec<String> {
        let mut headers = Vec::with_capacity(locales.len() + 2);
        headers.push(self.msgid_column.clone());
        headers.push(self.fuzzy_column.clone());
        headers.extend(locales.iter().map(|locale| locale.as_ref().to_string()));
        headers
    }
}

/// Build the cells of one data row, aligned with `headers`.
///
/// The first two headers are taken to be the msgid and fuzzy columns. Every
/// record overwrites the fuzzy cell, so the last one decides it. Locale
/// columns with no record under this key are left empty.
pub fn build_csv_line(
    message_id: &str,
    message_data: &[TranslationRecord],
    headers: &[String],
    layout: &TableLayout,
) -> Result<Vec<String>, PoCsvError> {
    if message_id.is_empty() {
        return Err(PoCsvError::invalid_argument("message ID is empty."));
    }

    if message_data.is_empty() {
        return Err(PoCsvError::invalid_argument(
            "no message data was passed.",
        ));
    }

    if headers.len() <= 2 {
        return Err(PoCsvError::invalid_argument(format!(
            "headers size was {} and it should have been > 2.",
            headers.len()
        )));
    }

    let mut line = vec![String::new(); headers.len()];
    line[0] = normalize(message_id);

    for record in message_data {
        line[1] = if record.is_fuzzy() {
            layout.fuzzy_marker.clone()
        } else {
            String::new()
        };

        let column = headers[2..]
            .iter()
            .position(|header| header == &record.locale)
            .ok_or_else(|| {
                PoCsvError::invalid_argument(format!(
                    "locale '{}' of message '{}' has no column in the headers.",
                    record.locale, message_id
                ))
            })?;

        line[column + 2] = normalize(&record.value);
    }

    Ok(line)
}

/// Write `table` as CSV to `writer`, one row per key sorted by raw key.
pub fn write_csv<W: io::Write>(
    headers: &[String],
    table: &TranslationTable,
    writer: W,
    layout: &TableLayout,
) -> Result<(), PoCsvError> {
    if headers.is_empty() {
        return Err(PoCsvError::invalid_argument("no headers were passed."));
    }

    if table.is_empty() {
        return Err(PoCsvError::invalid_argument(
            "translation table does not contain entries.",
        ));
    }

    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(headers)?;

    for key in table.sorted_keys() {
        let records = table.get(key).unwrap_or_default();
        let line = build_csv_line(key, records, headers, layout)?;
        writer.write_record(&line)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write `table` as a UTF-8 CSV file at `path`.
///
/// Validation happens before the file is created, so an invalid table never
/// truncates an existing file.
pub fn write_to_csv_file(
    headers: &[String],
    table: &TranslationTable,
    path: &Path,
    layout: &TableLayout,
) -> Result<(), PoCsvError> {
    let mut buffer = Vec::new();
    write_csv(headers, table, &mut buffer, layout)?;
    fs_err::write(path, buffer)?;
    tracing::debug!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Parse a CSV table from `reader`.
///
/// Keys are stored exactly as they appear in the msgid column. Every locale
/// column of a row becomes one record; cells missing from a short row add
/// no record.
pub fn read_csv<R: io::Read>(reader: R, layout: &TableLayout) -> Result<TranslationTable, PoCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();

    let msgid_index = headers
        .iter()
        .position(|header| header == layout.msgid_column)
        .ok_or_else(|| PoCsvError::MissingColumn {
            column: layout.msgid_column.clone(),
        })?;

    let locale_columns: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|(_, header)| *header != layout.msgid_column && *header != layout.fuzzy_column)
        .collect();

    let mut table = TranslationTable::new();

    for row in reader.records() {
        let row = row?;
        let Some(message_id) = row.get(msgid_index) else {
            continue;
        };

        let mut records = Vec::with_capacity(locale_columns.len());
        for (index, locale) in &locale_columns {
            if let Some(value) = row.get(*index) {
                records.push(TranslationRecord::new(*locale, value, None));
            }
        }

        // A repeated key replaces the earlier row.
        table.replace(message_id, records);
    }

    Ok(table)
}

/// Parse the CSV file at `path`.
pub fn read_csv_file(path: &Path, layout: &TableLayout) -> Result<TranslationTable, PoCsvError> {
    ensure_exists(path)?;
    let file = fs_err::File::open(path)?;
    let table = read_csv(file, layout)?;
    tracing::debug!("Read {} rows from {}", table.len(), path.display());
    Ok(table)
}
