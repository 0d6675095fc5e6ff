//! Reading and rewriting gettext catalogs.
//!
//! A catalog is held as the text it was read from. Parsing records where the
//! `msgstr` lines of every message sit, and saving splices new `msgstr` lines
//! in for the messages whose translation changed. Comments, flags, previous
//! msgids, obsolete `#~` entries and the header are written back byte for
//! byte, whatever fields the header holds.

use crate::error::{PoCsvError, ensure_exists};
use std::ops::Range;
use std::path::{Path, PathBuf};

/// A singular catalog entry as seen by the converter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub msgid: String,
    pub msgstr: String,
    pub fuzzy: bool,
}

/// A translated string that changed while merging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangedEntry {
    pub msgid: String,
    pub before: String,
    pub after: String,
}

#[derive(Clone, Debug, Default)]
struct Message {
    msgctxt: Option<String>,
    msgid: Option<String>,
    plural: bool,
    plural_forms: bool,
    msgstr: Option<String>,
    /// Source lines holding `msgstr` and its continuation strings.
    msgstr_lines: Range<usize>,
    fuzzy: bool,
    modified: bool,
}

impl Message {
    fn is_started(&self) -> bool {
        self.msgctxt.is_some() || self.msgid.is_some()
    }

    fn is_complete(&self) -> bool {
        self.msgid.is_some() && (self.msgstr.is_some() || self.plural_forms)
    }

    fn is_header(&self) -> bool {
        self.msgctxt.is_none() && self.msgid.as_deref() == Some("")
    }

    /// Singular, non-header messages: the ones the converter reads and writes.
    fn is_translatable(&self) -> bool {
        !self.is_header() && !self.plural && self.msgstr.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Context,
    Id,
    IdPlural,
    Str,
    StrPlural,
}

/// A parsed catalog bound to the file it was read from.
pub struct CatalogFile {
    path: PathBuf,
    lines: Vec<String>,
    messages: Vec<Message>,
}

impl std::fmt::Debug for CatalogFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogFile")
            .field("path", &self.path)
            .field("messages", &self.messages.len())
            .finish()
    }
}

impl CatalogFile {
    /// Read and parse the catalog at `path`.
    pub fn open(path: &Path) -> Result<Self, PoCsvError> {
        ensure_exists(path)?;
        let text = fs_err::read_to_string(path)?;
        Self::parse(path, &text)
    }

    /// Parse catalog `text` as if it had been read from `path`.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Self, PoCsvError> {
        let path = path.into();
        let lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
        let messages = Parser::new(&path).run(&lines)?;

        Ok(Self {
            path,
            lines,
            messages,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Singular entries in file order. The header, plural-form messages and
    /// obsolete entries are skipped.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.messages
            .iter()
            .filter(|message| message.is_translatable())
            .map(|message| CatalogEntry {
                msgid: message.msgid.clone().unwrap_or_default(),
                msgstr: message.msgstr.clone().unwrap_or_default(),
                fuzzy: message.fuzzy,
            })
            .collect()
    }

    /// Overwrite translated strings with the values chosen by `resolve`.
    ///
    /// `resolve` receives each singular entry's msgid and returns the new
    /// translation, or `None` to leave the entry alone. The first error
    /// aborts the walk; entries already updated stay updated in memory only.
    pub fn update_translations<F>(&mut self, mut resolve: F) -> Result<Vec<ChangedEntry>, PoCsvError>
    where
        F: FnMut(&str) -> Result<Option<String>, PoCsvError>,
    {
        let mut changed = Vec::new();

        for message in self.messages.iter_mut().filter(|message| message.is_translatable()) {
            let msgid = message.msgid.clone().unwrap_or_default();
            let Some(value) = resolve(&msgid)? else {
                continue;
            };

            let before = message.msgstr.replace(value.clone()).unwrap_or_default();
            if before == value {
                continue;
            }

            message.modified = true;
            changed.push(ChangedEntry {
                msgid,
                before,
                after: value,
            });
        }

        Ok(changed)
    }

    /// Whether any translation differs from the text that was read.
    pub fn is_modified(&self) -> bool {
        self.messages.iter().any(|message| message.modified)
    }

    /// The catalog text with modified `msgstr` blocks replaced.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut next = 0;

        for message in self.messages.iter().filter(|message| message.modified) {
            let span = &message.msgstr_lines;
            self.lines[next..span.start].iter().for_each(|line| out.push_str(line));

            let eol = line_ending(&self.lines[span.end - 1]);
            let value = message.msgstr.as_deref().unwrap_or_default();
            out.push_str(&render_msgstr(value, eol));
            next = span.end;
        }

        self.lines[next..].iter().for_each(|line| out.push_str(line));
        out
    }

    /// Write the catalog back to the file it was read from.
    pub fn save(&self) -> Result<(), PoCsvError> {
        fs_err::write(&self.path, self.render())?;
        tracing::debug!("Wrote catalog {}", self.path.display());
        Ok(())
    }
}

struct Parser<'a> {
    path: &'a Path,
    messages: Vec<Message>,
    pending: Message,
    field: Option<Field>,
}

impl<'a> Parser<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            messages: Vec::new(),
            pending: Message::default(),
            field: None,
        }
    }

    fn error(&self, index: usize, message: &str) -> PoCsvError {
        PoCsvError::CatalogParse {
            path: self.path.to_path_buf(),
            message: format!("line {}: {}", index + 1, message),
        }
    }

    fn run(mut self, lines: &[String]) -> Result<Vec<Message>, PoCsvError> {
        for (index, raw) in lines.iter().enumerate() {
            let line = raw.trim_start_matches('\u{feff}').trim();

            if line.is_empty() || line.starts_with("#~") {
                self.end_message(index)?;
                self.pending = Message::default();
            } else if let Some(comment) = line.strip_prefix('#') {
                self.push_if_complete();
                self.field = None;
                if let Some(flags) = comment.strip_prefix(',')
                    && flags.split(',').any(|flag| flag.trim() == "fuzzy")
                {
                    self.pending.fuzzy = true;
                }
            } else if line.starts_with('"') {
                self.continue_string(index, line)?;
            } else {
                self.keyword(index, line)?;
            }
        }

        self.end_message(lines.len())?;
        Ok(self.messages)
    }

    fn push_if_complete(&mut self) {
        if self.pending.is_complete() {
            self.messages.push(std::mem::take(&mut self.pending));
            self.field = None;
        }
    }

    fn end_message(&mut self, index: usize) -> Result<(), PoCsvError> {
        self.push_if_complete();
        if self.pending.is_started() {
            return Err(self.error(index, "message has no msgstr"));
        }
        self.field = None;
        Ok(())
    }

    fn continue_string(&mut self, index: usize, line: &str) -> Result<(), PoCsvError> {
        let Some(field) = self.field else {
            return Err(self.error(index, "string outside of a message"));
        };
        let value = decode_string(line).map_err(|reason| self.error(index, reason))?;
        let pending = &mut self.pending;

        match field {
            Field::Context => pending.msgctxt.get_or_insert_default().push_str(&value),
            Field::Id => pending.msgid.get_or_insert_default().push_str(&value),
            Field::Str => {
                pending.msgstr.get_or_insert_default().push_str(&value);
                pending.msgstr_lines.end = index + 1;
            },
            Field::IdPlural | Field::StrPlural => {},
        }

        Ok(())
    }

    fn keyword(&mut self, index: usize, line: &str) -> Result<(), PoCsvError> {
        let quote = line
            .find('"')
            .ok_or_else(|| self.error(index, "expected quoted string"))?;
        let keyword = line[..quote].trim();
        let value = decode_string(&line[quote..]).map_err(|reason| self.error(index, reason))?;

        match keyword {
            "msgctxt" | "msgid" => {
                self.push_if_complete();
                let duplicate = match keyword {
                    "msgctxt" => self.pending.is_started(),
                    _ => self.pending.msgid.is_some(),
                };
                if duplicate {
                    return Err(self.error(index, "message has no msgstr"));
                }
                if keyword == "msgctxt" {
                    self.pending.msgctxt = Some(value);
                    self.field = Some(Field::Context);
                } else {
                    self.pending.msgid = Some(value);
                    self.field = Some(Field::Id);
                }
            },
            "msgid_plural" if self.pending.msgid.is_some() => {
                self.pending.plural = true;
                self.field = Some(Field::IdPlural);
            },
            "msgstr" if self.pending.msgid.is_some() && self.pending.msgstr.is_none() => {
                self.pending.msgstr = Some(value);
                self.pending.msgstr_lines = index..index + 1;
                self.field = Some(Field::Str);
            },
            _ if keyword.starts_with("msgstr[") && self.pending.msgid.is_some() => {
                self.pending.plural_forms = true;
                self.field = Some(Field::StrPlural);
            },
            _ => return Err(self.error(index, &format!("unexpected '{}'", keyword))),
        }

        Ok(())
    }
}

/// Decode one quoted PO string, `"..."`, into its text.
fn decode_string(quoted: &str) -> Result<String, &'static str> {
    let Some(body) = quoted.trim().strip_prefix('"') else {
        return Err("expected quoted string");
    };

    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();

    loop {
        match chars.next() {
            None => return Err("unterminated string"),
            Some('"') => break,
            Some('\\') => match chars.next() {
                None => return Err("unterminated string"),
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('a') => result.push('\u{07}'),
                Some('b') => result.push('\u{08}'),
                Some('f') => result.push('\u{0c}'),
                Some('v') => result.push('\u{0b}'),
                Some('0') => result.push('\0'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                },
            },
            Some(c) => result.push(c),
        }
    }

    if chars.as_str().trim().is_empty() {
        Ok(result)
    } else {
        Err("text after closing quote")
    }
}

fn encode_string(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('"');
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            _ => result.push(c),
        }
    }
    result.push('"');
    result
}

fn line_ending(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

/// Render a `msgstr` block. Values spanning several lines use the gettext
/// layout of an empty first string followed by one string per line.
fn render_msgstr(value: &str, eol: &str) -> String {
    let newline = if eol == "\r\n" { "\r\n" } else { "\n" };
    let segments: Vec<&str> = value.split_inclusive('\n').collect();

    let mut out = String::from("msgstr ");
    if segments.len() <= 1 {
        out.push_str(&encode_string(value));
    } else {
        out.push_str("\"\"");
        for segment in segments {
            out.push_str(newline);
            out.push_str(&encode_string(segment));
        }
    }
    out.push_str(eol);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"# French translations
msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"
"Language: fr\n"

#: views.py:10
msgid "Hello"
msgstr "Bonjour"

#, fuzzy
msgid "Goodbye"
msgstr "Salut"

msgid "Untranslated"
msgstr ""
"#;

    const DJANGO: &str = r#"# SOME DESCRIPTIVE TITLE.
# Copyright (C) YEAR THE PACKAGE'S COPYRIGHT HOLDER
# This file is distributed under the same license as the PACKAGE package.
# FIRST AUTHOR <EMAIL@ADDRESS>, YEAR.
#
#, fuzzy
msgid ""
msgstr ""
"Project-Id-Version: PACKAGE VERSION\n"
"Report-Msgid-Bugs-To: \n"
"POT-Creation-Date: 2024-01-01 12:00+0000\n"
"PO-Revision-Date: YEAR-MO-DA HO:MI+ZONE\n"
"Last-Translator: FULL NAME <EMAIL@ADDRESS>\n"
"Language-Team: LANGUAGE <LL@li.org>\n"
"Language: \n"
"MIME-Version: 1.0\n"
"Content-Type: text/plain; charset=UTF-8\n"
"Content-Transfer-Encoding: 8bit\n"
"Plural-Forms: nplurals=2; plural=(n > 1);\n"

# Translator comment on Hello
#: templates/home.html:4
#| msgid "Helo"
msgid "Hello"
msgstr ""

#: templates/home.html:9
#, python-format
msgid "%(count)s item"
msgid_plural "%(count)s items"
msgstr[0] ""
msgstr[1] ""

#: templates/home.html:12
msgid ""
"A long "
"welcome"
msgstr ""
"Un long "
"accueil"

#~ msgid "Old"
#~ msgstr "Vieux"
"#;

    fn write_sample(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("django.po");
        fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn test_entries_read_flags() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = CatalogFile::open(&write_sample(&temp_dir)).unwrap();

        let entries = catalog.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[0],
            CatalogEntry {
                msgid: "Hello".to_string(),
                msgstr: "Bonjour".to_string(),
                fuzzy: false,
            }
        );
        assert!(entries[1].fuzzy);
        assert_eq!(entries[2].msgstr, "");
    }

    #[test]
    fn test_entries_skip_header_plurals_and_obsolete() {
        let catalog = CatalogFile::parse("django.po", DJANGO).unwrap();

        let entries = catalog.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].msgid, "Hello");
        assert!(!entries[0].fuzzy);
        assert_eq!(entries[1].msgid, "A long welcome");
        assert_eq!(entries[1].msgstr, "Un long accueil");
    }

    #[rstest]
    #[case::no_header("msgid \"Hello\"\nmsgstr \"Bonjour\"\n")]
    #[case::minimal_header(
        "msgid \"\"\nmsgstr \"\"\n\"Content-Type: text/plain; charset=UTF-8\\n\"\n\nmsgid \"Hello\"\nmsgstr \"Bonjour\"\n"
    )]
    #[case::no_trailing_newline("msgid \"Hello\"\nmsgstr \"Bonjour\"")]
    #[case::crlf("msgid \"\"\r\nmsgstr \"\"\r\n\r\nmsgid \"Hello\"\r\nmsgstr \"Bonjour\"\r\n")]
    fn test_parse_accepts_any_header(#[case] text: &str) {
        let catalog = CatalogFile::parse("django.po", text).unwrap();
        assert_eq!(
            catalog.entries(),
            vec![CatalogEntry {
                msgid: "Hello".to_string(),
                msgstr: "Bonjour".to_string(),
                fuzzy: false,
            }]
        );
    }

    #[rstest]
    #[case::missing_msgstr("msgid \"Hello\"\n\nmsgid \"World\"\nmsgstr \"\"\n")]
    #[case::unterminated("msgid \"Hello\nmsgstr \"\"\n")]
    #[case::stray_string("\"orphan\"\n")]
    #[case::unknown_keyword("msgid \"Hello\"\nmsgtxt \"\"\n")]
    fn test_parse_rejects_malformed(#[case] text: &str) {
        let result = CatalogFile::parse("broken.po", text);
        assert!(matches!(result, Err(PoCsvError::CatalogParse { .. })));
    }

    #[test]
    fn test_parse_decodes_escapes() {
        let catalog =
            CatalogFile::parse("django.po", "msgid \"Say \\\"hi\\\"\\n\"\nmsgstr \"a\\\\b\\tc\"\n").unwrap();
        let entries = catalog.entries();
        assert_eq!(entries[0].msgid, "Say \"hi\"\n");
        assert_eq!(entries[0].msgstr, "a\\b\tc");
    }

    #[test]
    fn test_open_missing_file() {
        let result = CatalogFile::open(Path::new("/nonexistent/django.po"));
        assert!(matches!(result, Err(PoCsvError::PathNotFound { .. })));
    }

    #[test]
    fn test_rewrite_changes_only_msgstr() {
        let mut catalog = CatalogFile::parse("django.po", DJANGO).unwrap();

        let changed = catalog
            .update_translations(|msgid| {
                Ok(match msgid {
                    "Hello" => Some("Bonjour".to_string()),
                    _ => None,
                })
            })
            .unwrap();

        assert_eq!(changed.len(), 1);
        assert!(catalog.is_modified());

        let expected = DJANGO.replace(
            "msgid \"Hello\"\nmsgstr \"\"\n",
            "msgid \"Hello\"\nmsgstr \"Bonjour\"\n",
        );
        assert_ne!(expected, DJANGO);
        assert_eq!(catalog.render(), expected);
    }

    #[test]
    fn test_rewrite_multiline_msgstr() {
        let mut catalog = CatalogFile::parse("django.po", DJANGO).unwrap();
        catalog
            .update_translations(|msgid| {
                Ok((msgid == "A long welcome").then(|| "Bienvenue\nà tous".to_string()))
            })
            .unwrap();

        let expected = DJANGO.replace(
            "msgstr \"\"\n\"Un long \"\n\"accueil\"\n",
            "msgstr \"\"\n\"Bienvenue\\n\"\n\"à tous\"\n",
        );
        assert_eq!(catalog.render(), expected);

        let reparsed = CatalogFile::parse("django.po", &catalog.render()).unwrap();
        assert_eq!(reparsed.entries()[1].msgstr, "Bienvenue\nà tous");
    }

    #[test]
    fn test_rewrite_keeps_crlf() {
        let text = "msgid \"Hello\"\r\nmsgstr \"\"\r\n";
        let mut catalog = CatalogFile::parse("django.po", text).unwrap();
        catalog
            .update_translations(|_| Ok(Some("Bonjour".to_string())))
            .unwrap();

        assert_eq!(catalog.render(), "msgid \"Hello\"\r\nmsgstr \"Bonjour\"\r\n");
    }

    #[test]
    fn test_unchanged_catalog_renders_identically() {
        let mut catalog = CatalogFile::parse("django.po", DJANGO).unwrap();
        let changed = catalog
            .update_translations(|msgid| {
                Ok((msgid == "A long welcome").then(|| "Un long accueil".to_string()))
            })
            .unwrap();

        assert!(changed.is_empty());
        assert!(!catalog.is_modified());
        assert_eq!(catalog.render(), DJANGO);
    }

    #[test]
    fn test_update_translations_preserves_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_sample(&temp_dir);
        let mut catalog = CatalogFile::open(&path).unwrap();

        let changed = catalog
            .update_translations(|msgid| {
                Ok(match msgid {
                    "Untranslated" => Some("Non traduit".to_string()),
                    "Hello" => Some("Bonjour".to_string()),
                    _ => None,
                })
            })
            .unwrap();

        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].msgid, "Untranslated");
        catalog.save().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            SAMPLE.replace(
                "msgid \"Untranslated\"\nmsgstr \"\"\n",
                "msgid \"Untranslated\"\nmsgstr \"Non traduit\"\n"
            )
        );

        let reread = CatalogFile::open(&path).unwrap().entries();
        assert_eq!(reread[2].msgstr, "Non traduit");
        assert!(reread[1].fuzzy);
    }

    #[test]
    fn test_update_translations_propagates_errors() {
        let temp_dir = TempDir::new().unwrap();
        let mut catalog = CatalogFile::open(&write_sample(&temp_dir)).unwrap();

        let result = catalog.update_translations(|msgid| {
            Err(PoCsvError::invalid_argument(format!("refused {}", msgid)))
        });

        assert!(matches!(result, Err(PoCsvError::InvalidArgument(msg)) if msg == "refused Hello"));
    }
}
