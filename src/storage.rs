/// Book-file discovery.
pub mod directory;
/// JSON serialization of the assembled chapters.
pub mod json;

pub use directory::{CorpusError, discover, require_complete};
pub use json::{chapters_to_string, write_chapters};
