use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};

use crate::block::Tag;

/// A tag whose argument did not fit its grammar. The tag still counts, but
/// the field it would have filled keeps its default.
#[derive(Debug, Clone, PartialEq)]
pub struct TagWarning {
    pub message: String,
    pub span: Range<usize>,
    pub file_id: usize,
    pub notes: Vec<String>,
}

impl TagWarning {
    pub fn new(message: impl Into<String>, span: Range<usize>, file_id: usize) -> Self {
        TagWarning {
            message: message.into(),
            span,
            file_id,
            notes: Vec::new(),
        }
    }

    /// Warning pointing at a malformed `@tag` line.
    pub fn malformed(tag: &Tag, expected: &str, file_id: usize) -> Self {
        TagWarning::new(
            format!("malformed @{} argument", tag.name),
            tag.span.clone(),
            file_id,
        )
        .with_note(format!("expected {}", expected))
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        Diagnostic::new(Severity::Warning)
            .with_message(&self.message)
            .with_labels(vec![Label::primary(self.file_id, self.span.clone())])
            .with_notes(self.notes.clone())
    }
}
