//! Filesystem discovery of book sources.
//!
//! A corpus root contains one USFM file per book, named `<CODE>.<ext>`
//! (e.g. `GEN.usfm`). Discovery is lenient about unexpected files: anything
//! whose name is not a well-formed code is skipped with a warning, and
//! well-formed codes outside the canon are carried through so their chapters
//! sort after the canon.

use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
    assemble::BookSource,
    domain::{BookCode, BookId, Config},
};

/// Errors that abort a conversion run.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// A book source file could not be read.
    #[error("failed to read book source {path}")]
    Io {
        /// The offending file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A canonical book has no source file under the root.
    #[error("missing source file for {} ({})", .0.code(), .0.name())]
    MissingBook(BookId),
}

/// Discovers all book sources under `root`.
///
/// Only files with the configured extension participate; the book code is
/// the portion of the file name before the first `.`. Files whose code is
/// not well-formed are skipped with a warning, and codes outside the canon
/// are reported but kept. Paths are sorted before reading so discovery
/// order, which also decides the relative order of non-canonical books in
/// the output, does not depend on the directory walker.
///
/// # Errors
///
/// Returns [`CorpusError::Io`] if a matching file cannot be read. Discovery
/// finds whatever is present; use [`require_complete`] to demand the full
/// canon.
pub fn discover(root: &Path, config: &Config) -> Result<Vec<BookSource>, CorpusError> {
    let mut sources = Vec::new();

    for path in collect_source_paths(root, &config.extension) {
        let Some(code) = code_from_path(&path) else {
            tracing::warn!("skipping file with invalid book code: {}", path.display());
            continue;
        };

        if code.canon_position().is_none() {
            tracing::warn!("book code {code} is not part of the canon; its chapters will sort last");
        }

        let text = std::fs::read_to_string(&path).map_err(|source| CorpusError::Io {
            path: path.clone(),
            source,
        })?;

        sources.push(BookSource::new(code, text));
    }

    Ok(sources)
}

/// Verifies that every canonical book is present in `sources`.
///
/// # Errors
///
/// Returns [`CorpusError::MissingBook`] naming the first absent book in
/// canonical order.
pub fn require_complete(sources: &[BookSource]) -> Result<(), CorpusError> {
    BookId::ALL
        .into_iter()
        .find(|id| {
            !sources
                .iter()
                .any(|source| source.code == BookCode::Canonical(*id))
        })
        .map_or(Ok(()), |missing| Err(CorpusError::MissingBook(missing)))
}

fn collect_source_paths(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension() == Some(OsStr::new(extension)))
        .map(walkdir::DirEntry::into_path)
        .collect();
    paths.sort();
    paths
}

fn code_from_path(path: &Path) -> Option<BookCode> {
    let name = path.file_name()?.to_str()?;
    let stem = name.split('.').next()?;
    BookCode::parse(stem).ok()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write_book(root: &Path, name: &str, text: &str) {
        std::fs::write(root.join(name), text).unwrap();
    }

    #[test]
    fn discovers_books_by_extension() {
        let dir = TempDir::new().unwrap();
        write_book(dir.path(), "GEN.usfm", "\\c 1\n\\v 1 a");
        write_book(dir.path(), "EXO.usfm", "\\c 1\n\\v 1 b");
        write_book(dir.path(), "notes.txt", "not a book");

        let sources = discover(dir.path(), &Config::default()).unwrap();
        let codes: Vec<&str> = sources.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["EXO", "GEN"]);
    }

    #[test]
    fn respects_configured_extension() {
        let dir = TempDir::new().unwrap();
        write_book(dir.path(), "GEN.txt", "\\c 1\n\\v 1 a");
        write_book(dir.path(), "EXO.usfm", "\\c 1\n\\v 1 b");

        let config = Config {
            extension: "txt".to_string(),
            ..Config::default()
        };
        let sources = discover(dir.path(), &config).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].code.as_str(), "GEN");
    }

    #[test]
    fn skips_files_with_malformed_codes() {
        let dir = TempDir::new().unwrap();
        write_book(dir.path(), "GEN.usfm", "\\c 1\n\\v 1 a");
        write_book(dir.path(), "readme.usfm", "not a code");

        let sources = discover(dir.path(), &Config::default()).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].code.as_str(), "GEN");
    }

    #[test]
    fn keeps_well_formed_codes_outside_the_canon() {
        let dir = TempDir::new().unwrap();
        write_book(dir.path(), "TOB.usfm", "\\c 1\n\\v 1 a");

        let sources = discover(dir.path(), &Config::default()).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].code.canon_position(), None);
    }

    #[test]
    fn reads_full_book_text() {
        let dir = TempDir::new().unwrap();
        let text = "\\id GEN\n\\c 1\n\\p\n\\v 1 In the beginning";
        write_book(dir.path(), "GEN.usfm", text);

        let sources = discover(dir.path(), &Config::default()).unwrap();
        assert_eq!(sources[0].text, text);
    }

    #[test]
    fn empty_root_discovers_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(discover(dir.path(), &Config::default()).unwrap().is_empty());
    }

    #[test]
    fn require_complete_reports_first_missing_book() {
        let dir = TempDir::new().unwrap();
        write_book(dir.path(), "GEN.usfm", "\\c 1\n\\v 1 a");
        write_book(dir.path(), "LEV.usfm", "\\c 1\n\\v 1 b");

        let sources = discover(dir.path(), &Config::default()).unwrap();
        let error = require_complete(&sources).unwrap_err();
        assert!(matches!(error, CorpusError::MissingBook(BookId::Exodus)));
        assert_eq!(error.to_string(), "missing source file for EXO (Exodus)");
    }

    #[test]
    fn require_complete_accepts_the_full_canon() {
        let sources: Vec<BookSource> = BookId::ALL
            .into_iter()
            .map(|id| BookSource::new(id.into(), String::new()))
            .collect();
        assert!(require_complete(&sources).is_ok());
    }
}
