#![allow(dead_code)] // Functions used by different test binaries appear unused per-binary

//! Shared fixtures for po-csv integration tests.

use std::fs;
use std::path::{Path, PathBuf};

/// A message written into a fixture catalog.
pub struct Msg<'a> {
    pub msgid: &'a str,
    pub msgstr: &'a str,
    pub fuzzy: bool,
}

pub fn msg<'a>(msgid: &'a str, msgstr: &'a str) -> Msg<'a> {
    Msg {
        msgid,
        msgstr,
        fuzzy: false,
    }
}

pub fn fuzzy<'a>(msgid: &'a str, msgstr: &'a str) -> Msg<'a> {
    Msg {
        msgid,
        msgstr,
        fuzzy: true,
    }
}

/// Quote a string the way PO files expect.
pub fn po_quote(s: &str) -> String {
    let mut out = String::from("\"");
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn render_catalog(locale: &str, messages: &[Msg<'_>]) -> String {
    let mut out = format!(
        "msgid \"\"\nmsgstr \"\"\n\"Content-Type: text/plain; charset=UTF-8\\n\"\n\"Language: {}\\n\"\n",
        locale
    );
    for (index, message) in messages.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("#: views.py:{}\n", index + 1));
        if message.fuzzy {
            out.push_str("#, fuzzy\n");
        }
        out.push_str(&format!("msgid {}\n", po_quote(message.msgid)));
        out.push_str(&format!("msgstr {}\n", po_quote(message.msgstr)));
    }
    out
}

/// Write `<root>/<app>/locale/<locale>/LC_MESSAGES/django.po`.
pub fn write_catalog(root: &Path, app: &str, locale: &str, messages: &[Msg<'_>]) -> PathBuf {
    let dir = root.join(app).join("locale").join(locale).join("LC_MESSAGES");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("django.po");
    fs::write(&path, render_catalog(locale, messages)).unwrap();
    path
}

/// `(msgid, msgstr, fuzzy)` triples of a catalog, in file order.
pub fn read_entries(path: &Path) -> Vec<(String, String, bool)> {
    po_csv::CatalogFile::open(path)
        .unwrap()
        .entries()
        .into_iter()
        .map(|entry| (entry.msgid, entry.msgstr, entry.fuzzy))
        .collect()
}
