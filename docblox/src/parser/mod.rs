pub mod error;
mod extract;

pub use error::TagWarning;
pub use extract::extract_blocks;

use crate::SourceFile;

/// Parser entry point.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Extract every documented block from the source text.
    pub fn parse(&self) -> SourceFile {
        SourceFile {
            blocks: extract_blocks(&self.source),
            source_id: self.file_id,
        }
    }
}
