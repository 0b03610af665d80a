//! The tag rewriting pipeline.
//!
//! A raw USFM chapter is reduced to verse-annotated Markdown by an ordered
//! sequence of pattern substitutions. Order matters: later rules assume
//! earlier ones have already fired, and the catch-all must run last so it
//! cannot consume syntax meant for a more specific rule.

use std::sync::LazyLock;

use regex::Regex;

/// A single substitution applied during rewriting.
///
/// The rule sequence is configuration data, not runtime state: built once,
/// shared process-wide, never mutated.
struct TagRule {
    pattern: Regex,
    replacement: &'static str,
}

impl TagRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("rule patterns are statically known"),
            replacement,
        }
    }
}

static RULES: LazyLock<Vec<TagRule>> = LazyLock::new(|| {
    vec![
        // Chapter marker: stripped, leaving no residue at the chapter start.
        TagRule::new(r"\\c +\d+ *", ""),
        // Footnotes: drop the whole span, shortest open..close match.
        TagRule::new(r"\\f.+?\\f\*", ""),
        // Cross references: drop the span, trailing non-alphabetic residue
        // before the close tag, and one leading space.
        TagRule::new(r" ?\\x *.+?[^a-zA-Z]*\\x\*", ""),
        // Poetry levels: keep the text, drop the tag.
        TagRule::new(r"\\q\d+", ""),
        // Verses: the marker becomes an inline bracketed number. A preceding
        // newline is consumed so verses flow within their paragraph.
        TagRule::new(r"\n?\\v (\d+) *", "[$1] "),
        // Paragraph breaks, then the stray leading space they can introduce.
        TagRule::new(r"\\p", "\n"),
        TagRule::new(r"\n ", "\n"),
        // Strong's number wrappers: keep only the wrapped word.
        TagRule::new(r#"\\w (\S*)\|strong="\S*"\\w\*"#, "$1"),
        TagRule::new(r#"\\\+w (\S*)\|strong="\S*"\\\+w\*"#, "$1"),
        // Words of Jesus.
        TagRule::new(r"\\wj( *)(.+?)( *)\\wj\*", "**$2**"),
        // Bold.
        TagRule::new(r"\\bd (.+?)\\bd\*", "**$1**"),
        // Italics render as bold in the reader; not a naming error.
        TagRule::new(r"\\it( *)(.+?)( *)\\it\*", "**$2**"),
        // Descriptions (psalm superscriptions).
        TagRule::new(r"\\d( *)(.+?)( *)\n", "*$2*\n\n"),
        // Selahs.
        TagRule::new(r"\\qs ?(.+) ?\\qs\*", "\n*$1*"),
    ]
});

/// Any remaining recognised tag syntax no specific rule handled.
static CATCH_ALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-z0-9]+\*?").expect("rule patterns are statically known"));

/// Span-opening tags that should have been consumed by their dedicated rule.
/// Any still present after the rule pass indicate a dangling span.
const SPAN_TAGS: [&str; 8] = [
    "\\f", "\\x", "\\wj", "\\bd", "\\it", "\\qs", "\\w ", "\\+w ",
];

/// Rewrites one raw USFM chapter into verse-annotated Markdown.
///
/// A pure function of its input and the fixed rule table. Verse markers are
/// never dropped, only reformatted: `\v 3` becomes `[3] `, which is what
/// lets downstream consumers re-split chapters into verses by scanning for
/// bracket-number tokens.
///
/// A span whose open tag never finds its close tag is left for the catch-all
/// rule, which strips the bare tag syntax best-effort; the dangling span is
/// reported as a warning, never an error.
///
/// ```
/// let md = canonmd::rewrite("\\c 1 \\p \\v 1 In the beginning");
/// assert_eq!(md, "[1] In the beginning");
/// ```
#[must_use]
pub fn rewrite(raw_chapter: &str) -> String {
    let mut text = raw_chapter.to_owned();
    for rule in &*RULES {
        text = rule
            .pattern
            .replace_all(&text, rule.replacement)
            .into_owned();
    }

    for tag in SPAN_TAGS {
        if text.contains(tag) {
            tracing::warn!("unterminated {tag} span in chapter; tag syntax stripped");
        }
    }

    CATCH_ALL.replace_all(&text, "").trim().to_string()
}
