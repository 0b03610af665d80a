//! Canonical ordering and chapter assembly.
//!
//! The assembler turns a set of per-book raw USFM sources into the ordered
//! collection of chapter records: books are sorted into canonical order,
//! split into chapter segments, and each segment is rewritten.

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    domain::{BookCode, ChapterId, ChapterRecord},
    rewrite::rewrite,
};

/// The marker that delimits chapter segments in a book source.
const CHAPTER_MARKER: &str = "\\c ";

/// One book's raw source text, keyed by its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSource {
    /// The book's source key.
    pub code: BookCode,

    /// The full unprocessed USFM text of the book.
    pub text: String,
}

impl BookSource {
    /// Creates a source from a code and its raw text.
    #[must_use]
    pub const fn new(code: BookCode, text: String) -> Self {
        Self { code, text }
    }
}

/// Assembles the ordered chapter collection from a set of book sources.
///
/// Books are stable-sorted by canon position, so unrecognised codes trail
/// every canonical book in discovery order. Within a book, chapters appear
/// in source order, which is ascending chapter order for well-formed input.
///
/// Each book is rewritten on its own rayon worker; the indexed collect
/// re-imposes the sorted order deterministically, so parallelism never
/// leaks into the output order.
#[must_use]
pub fn assemble(mut books: Vec<BookSource>) -> Vec<ChapterRecord> {
    books.sort_by_key(|book| book.code.canon_position().unwrap_or(usize::MAX));

    books
        .par_iter()
        .map(book_chapters)
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Splits one book into chapter segments and rewrites each of them.
///
/// The split discards everything before the first chapter marker (book title
/// and introduction matter) and re-prepends the marker to each retained
/// segment so the rewriter's first rule still sees it. Segments without a
/// leading chapter number are skipped and reported.
fn book_chapters(book: &BookSource) -> Vec<ChapterRecord> {
    book.text
        .split(CHAPTER_MARKER)
        .skip(1)
        .filter_map(|segment| {
            let Some(number) = leading_number(segment) else {
                tracing::warn!(
                    book = book.code.as_str(),
                    "chapter marker without a number; segment skipped"
                );
                return None;
            };

            let raw = format!("{CHAPTER_MARKER}{segment}");
            Some(ChapterRecord {
                chapter_id: ChapterId::new(book.code.clone(), number),
                markdown: rewrite(&raw),
            })
        })
        .collect()
}

/// Parses the leading ASCII digit run of a chapter segment.
fn leading_number(segment: &str) -> Option<u32> {
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    segment[..end].parse().ok()
}
