//! USFM scripture to verse-annotated Markdown conversion.
//!
//! Books are USFM text files stored in a directory, one per canonical book.

pub mod domain;
pub use domain::{BookCode, BookId, ChapterId, ChapterRecord, Config};

pub mod rewrite;
pub use rewrite::rewrite;

pub mod assemble;
pub use assemble::{BookSource, assemble};

/// Filesystem discovery of book sources and serialization of the output.
pub mod storage;
pub use storage::{CorpusError, discover, require_complete, write_chapters};
