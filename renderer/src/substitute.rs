use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use docblox::parser::{Parser, TagWarning};

use crate::error::LoadError;
use crate::markdown::render_source;
use crate::scope::Threshold;
use crate::template::TemplateSet;

/// A BEGIN/END placeholder pair; the level digit is optional and the body,
/// including previously generated output, is discarded.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)<!--\s+BEGIN\s+DOC-COMMENT\s+(?:H([1-6])\s+)?(\S+)\s+-->(?s:.)*?<!--\s+END\s+DOC-COMMENT\s+-->",
    )
    .unwrap()
});

pub const GENERATED_NOTICE: &str = "<!-- AUTOMATICALLY GENERATED, DO NOT EDIT -->";
pub const CLOSE_MARKER: &str = "<!-- END DOC-COMMENT -->";

/// Supplies the text of source files named by placeholders.
pub trait SourceLoader {
    fn load(&mut self, filename: &str) -> Result<LoadedSource, LoadError>;
}

/// Source text plus the file ID its diagnostics should point at.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSource {
    pub text: String,
    pub file_id: usize,
}

/// In-memory sources keyed by filename. Diagnostics carry file ID 0.
impl SourceLoader for HashMap<String, String> {
    fn load(&mut self, filename: &str) -> Result<LoadedSource, LoadError> {
        self.get(filename)
            .map(|text| LoadedSource {
                text: text.clone(),
                file_id: 0,
            })
            .ok_or_else(|| LoadError::Missing(filename.to_string()))
    }
}

/// A piece of a target document.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    /// Text copied through unchanged.
    Raw(&'a str),
    /// A placeholder to regenerate.
    Placeholder { level: u8, filename: &'a str },
}

/// The rewritten document and everything worth reporting about it.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    pub text: String,
    pub warnings: Vec<TagWarning>,
    /// Filenames whose source could not be loaded.
    pub failures: Vec<String>,
}

/// Does `doc` contain at least one placeholder?
pub fn has_placeholder(doc: &str) -> bool {
    PLACEHOLDER.is_match(doc)
}

/// Split a document into raw text and placeholders. The sequence always
/// alternates and always ends with a (possibly empty) raw segment.
pub fn split_document(doc: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(doc) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let level = caps
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(1);
        let filename = caps.get(2).map_or("", |m| m.as_str());

        segments.push(Segment::Raw(&doc[last..whole.start()]));
        segments.push(Segment::Placeholder { level, filename });
        last = whole.end();
    }

    segments.push(Segment::Raw(&doc[last..]));
    segments
}

/// Regenerate every placeholder in `doc` from its source file.
///
/// Markers are rebuilt rather than copied, so running this on its own output
/// with unchanged sources is a no-op. A source that fails to load leaves an
/// empty placeholder behind; the rest of the document is still processed.
pub fn filter_document(
    doc: &str,
    threshold: Threshold,
    templates: &TemplateSet,
    loader: &mut dyn SourceLoader,
) -> Substitution {
    let mut out = String::with_capacity(doc.len());
    let mut warnings = Vec::new();
    let mut failures = Vec::new();

    for segment in split_document(doc) {
        match segment {
            Segment::Raw(text) => out.push_str(text),
            Segment::Placeholder { level, filename } => {
                out.push_str(&open_marker(level, filename));

                match loader.load(filename) {
                    Ok(source) => {
                        debug!(filename, level, "regenerating placeholder");
                        let file = Parser::new(source.text, source.file_id).parse();
                        let rendered = render_source(&file, level, threshold, templates);
                        out.push_str(&rendered.markdown);
                        warnings.extend(rendered.warnings);
                    }
                    Err(error) => {
                        warn!(filename, %error, "leaving placeholder empty");
                        failures.push(filename.to_string());
                    }
                }

                out.push_str(CLOSE_MARKER);
            }
        }
    }

    Substitution {
        text: out,
        warnings,
        failures,
    }
}

/// Opening marker and generated-content notice for a placeholder.
pub fn open_marker(level: u8, filename: &str) -> String {
    format!(
        "<!-- BEGIN DOC-COMMENT H{} {} -->\n{}\n",
        level, filename, GENERATED_NOTICE
    )
}
