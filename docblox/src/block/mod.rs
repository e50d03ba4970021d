pub mod tag;

use std::ops::Range;

/// One doc-comment together with the declaration fragment that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Description lines. Blank entries are paragraph breaks.
    pub lines: Vec<String>,
    /// `@name rest` lines, in the order they appear.
    pub tags: Vec<Tag>,
    /// Whitespace-normalized declaration fragment following the comment.
    pub code: String,
}

impl Block {
    /// A comment with neither description nor tags carries no documentation.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.tags.is_empty()
    }
}

/// A single `@name rest` line.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
    /// Remainder of the line after the tag name, trimmed.
    pub rest: String,
    /// Byte span of the tag line in source for error reporting.
    pub span: Range<usize>,
}
