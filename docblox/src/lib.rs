pub mod block;
pub mod parser;

use crate::block::Block;

/// The doc-comment blocks extracted from one source file, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub blocks: Vec<Block>,
    /// The source file ID (for error reporting with codespan-reporting).
    pub source_id: usize,
}
