#![doc = include_str!("../README.md")]

pub mod catalog;
pub mod error;
pub mod escape;
pub mod locale;
pub mod merge;
pub mod pipeline;
pub mod scan;
pub mod table;
pub mod tabular;

pub use catalog::{CatalogEntry, CatalogFile, ChangedEntry};
pub use error::PoCsvError;
pub use escape::{normalize, unescape};
pub use locale::{parse_locale, parse_locales};
pub use merge::{StagedCatalog, merge_translations_to_file, stage_merge};
pub use pipeline::{ConvertOptions, ExportSummary, ImportPlan, ImportSummary};
pub use scan::find_files;
pub use table::{TranslationRecord, TranslationTable};
pub use tabular::{TableLayout, build_csv_line, read_csv_file, write_to_csv_file};
