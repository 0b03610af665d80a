//! JSON serialization of the assembled chapter collection.
//!
//! The output is a flat array of `{"chapterId", "markdown"}` objects in
//! canonical order; this is the contract the downstream reader consumes.

use std::io::Write;

use crate::domain::ChapterRecord;

/// Writes the chapter collection as a JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails or the underlying writer does.
pub fn write_chapters<W: Write>(
    writer: W,
    chapters: &[ChapterRecord],
    pretty: bool,
) -> serde_json::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, chapters)
    } else {
        serde_json::to_writer(writer, chapters)
    }
}

/// Renders the chapter collection as a JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn chapters_to_string(chapters: &[ChapterRecord], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(chapters)
    } else {
        serde_json::to_string(chapters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookId, ChapterId};

    fn record(book: BookId, chapter: u32, markdown: &str) -> ChapterRecord {
        ChapterRecord {
            chapter_id: ChapterId::new(book.into(), chapter),
            markdown: markdown.to_string(),
        }
    }

    #[test]
    fn compact_array_with_external_field_names() {
        let chapters = vec![
            record(BookId::Genesis, 1, "[1] In the beginning"),
            record(BookId::Genesis, 2, "[1] Thus the heavens"),
        ];

        let json = chapters_to_string(&chapters, false).unwrap();
        assert_eq!(
            json,
            r#"[{"chapterId":"GEN.1","markdown":"[1] In the beginning"},{"chapterId":"GEN.2","markdown":"[1] Thus the heavens"}]"#
        );
    }

    #[test]
    fn pretty_output_parses_back_to_the_same_value() {
        let chapters = vec![record(BookId::Psalms, 117, "[1] Praise the LORD")];

        let compact: serde_json::Value =
            serde_json::from_str(&chapters_to_string(&chapters, false).unwrap()).unwrap();
        let pretty: serde_json::Value =
            serde_json::from_str(&chapters_to_string(&chapters, true).unwrap()).unwrap();
        assert_eq!(compact, pretty);
    }

    #[test]
    fn writer_and_string_agree() {
        let chapters = vec![record(BookId::Jude, 1, "[1] Jude, a servant")];

        let mut bytes = Vec::new();
        write_chapters(&mut bytes, &chapters, false).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            chapters_to_string(&chapters, false).unwrap()
        );
    }

    #[test]
    fn empty_collection_is_an_empty_array() {
        assert_eq!(chapters_to_string(&[], false).unwrap(), "[]");
    }

    #[test]
    fn markdown_newlines_survive_a_round_trip() {
        let chapters = vec![record(BookId::Psalms, 3, "*A Psalm of David.*\n\n[1] O LORD")];

        let json = chapters_to_string(&chapters, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value[0]["markdown"],
            serde_json::json!("*A Psalm of David.*\n\n[1] O LORD")
        );
    }
}
