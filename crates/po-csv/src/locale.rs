//! Locale inference from catalog paths.
//!
//! Catalogs are expected at `<base>/<app>/locale/<locale-id>/<subdir>/<file>`,
//! so the locale is the third path component counted from the end.

use crate::error::{PoCsvError, ensure_exists};
use indexmap::IndexSet;
use std::path::Path;
use unic_langid::LanguageIdentifier;

/// Number of path components from the end at which the locale segment sits.
const LOCALE_DEPTH_FROM_END: usize = 3;

/// Extract the locale identifier from a catalog path.
pub fn parse_locale(path: &Path) -> Result<String, PoCsvError> {
    ensure_exists(path)?;

    let components: Vec<_> = path.components().collect();
    let index = components
        .len()
        .checked_sub(LOCALE_DEPTH_FROM_END)
        .ok_or_else(|| PoCsvError::MalformedPath {
            path: path.to_path_buf(),
        })?;

    let locale = components[index]
        .as_os_str()
        .to_str()
        .ok_or_else(|| PoCsvError::MalformedPath {
            path: path.to_path_buf(),
        })?
        .to_string();

    if locale.parse::<LanguageIdentifier>().is_err() {
        tracing::warn!(
            "Locale segment '{}' of {} is not a valid language identifier",
            locale,
            path.display()
        );
    }

    Ok(locale)
}

/// Collect the distinct locales of `paths`.
///
/// Locales keep first-discovery order unless `sorted` is set, in which case
/// they are ordered lexicographically.
pub fn parse_locales<P: AsRef<Path>>(
    paths: &[P],
    sorted: bool,
) -> Result<Vec<String>, PoCsvError> {
    if paths.is_empty() {
        return Err(PoCsvError::invalid_argument("no paths were passed."));
    }

    let mut locales = IndexSet::new();
    for path in paths {
        locales.insert(parse_locale(path.as_ref())?);
    }

    let mut locales: Vec<String> = locales.into_iter().collect();
    if sorted {
        locales.sort();
    }
    Ok(locales)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch_catalog(root: &Path, locale: &str) -> std::path::PathBuf {
        let dir = root.join("app/locale").join(locale).join("LC_MESSAGES");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("django.po");
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn test_parse_locale_from_django_layout() {
        let temp_dir = TempDir::new().unwrap();
        let path = touch_catalog(temp_dir.path(), "pt_BR");

        assert_eq!(parse_locale(&path).unwrap(), "pt_BR");
    }

    #[test]
    fn test_parse_locale_missing_path() {
        let result = parse_locale(Path::new("/nonexistent/app/locale/fr/LC_MESSAGES/django.po"));
        assert!(matches!(result, Err(PoCsvError::PathNotFound { .. })));
    }

    #[test]
    fn test_parse_locale_too_short() {
        // The root directory exists but has a single component.
        let result = parse_locale(Path::new("/"));
        assert!(matches!(result, Err(PoCsvError::MalformedPath { .. })));
    }

    #[test]
    fn test_parse_locales_collapses_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let fr = touch_catalog(temp_dir.path(), "fr");
        let es = touch_catalog(temp_dir.path(), "es");

        let other_dir = temp_dir.path().join("other/locale/fr/LC_MESSAGES");
        fs::create_dir_all(&other_dir).unwrap();
        let fr_again = other_dir.join("django.po");
        fs::write(&fr_again, "").unwrap();

        let locales = parse_locales(&[fr.clone(), es.clone(), fr_again.clone()], false).unwrap();
        assert_eq!(locales, vec!["fr", "es"]);

        let sorted = parse_locales(&[fr, es, fr_again], true).unwrap();
        assert_eq!(sorted, vec!["es", "fr"]);
    }

    #[test]
    fn test_parse_locales_empty() {
        let paths: Vec<std::path::PathBuf> = Vec::new();
        let result = parse_locales(&paths, true);
        assert!(matches!(result, Err(PoCsvError::InvalidArgument(_))));
    }
}
