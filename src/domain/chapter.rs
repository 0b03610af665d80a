use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

use crate::domain::book::{BookCode, InvalidCodeError};

/// Identifies one chapter: a book code plus a chapter number, rendered as
/// `<CODE>.<number>` (e.g. `GEN.1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterId {
    book: BookCode,
    chapter: u32,
}

impl ChapterId {
    /// Creates a chapter identifier from pre-validated parts.
    #[must_use]
    pub const fn new(book: BookCode, chapter: u32) -> Self {
        Self { book, chapter }
    }

    /// Returns the book component.
    #[must_use]
    pub const fn book(&self) -> &BookCode {
        &self.book
    }

    /// Returns the chapter number component.
    #[must_use]
    pub const fn chapter(&self) -> u32 {
        self.chapter
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.book, self.chapter)
    }
}

impl Serialize for ChapterId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Errors that can occur when parsing a chapter identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseChapterIdError {
    /// The `.` separator between code and number is missing.
    #[error("Invalid chapter id format: {0}")]
    Syntax(String),

    /// The book code portion is malformed.
    #[error(transparent)]
    Code(#[from] InvalidCodeError),

    /// The chapter number portion is not a number.
    #[error("Invalid chapter number in '{0}': expected an integer, got {1}")]
    Number(String, String),
}

impl FromStr for ChapterId {
    type Err = ParseChapterIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (code, number) = s
            .split_once('.')
            .ok_or_else(|| ParseChapterIdError::Syntax(s.to_string()))?;

        let book = BookCode::parse(code)?;
        let chapter = number
            .parse()
            .map_err(|_| ParseChapterIdError::Number(s.to_string(), number.to_string()))?;

        Ok(Self { book, chapter })
    }
}

impl TryFrom<&str> for ChapterId {
    type Error = ParseChapterIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

/// The unit of output: one chapter's identifier plus its rewritten Markdown.
///
/// Created once per chapter by the assembler and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterRecord {
    /// The composite `<CODE>.<number>` key.
    #[serde(rename = "chapterId")]
    pub chapter_id: ChapterId,

    /// The rewritten Markdown body, with verse markers inline.
    pub markdown: String,
}
