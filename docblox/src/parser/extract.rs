use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::block::{Block, Tag};

const OPEN: &str = "/**";
const CLOSE: &str = "*/";
const TERMINATORS: [char; 2] = [';', '{'];

static TAG_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*@(\S+)\s*(.*)$").unwrap());

/// `var|let|const name = ...` -- only the keyword and identifier are kept.
static DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^((?:var|let|const)\s+[^=\s]+)\s*=").unwrap());

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Split C-like source text into doc-comment blocks.
///
/// The scan is not comment-aware: a `/**` or `*/` inside sample code or a
/// string literal is taken at face value.
pub fn extract_blocks(source: &str) -> Vec<Block> {
    let mut state = ExtractState::new(source);
    state.run();
    state.blocks
}

// ---------------------------------------------------------------------------
// Extraction state
// ---------------------------------------------------------------------------

enum Phase {
    /// Skipping text until the next `/**`.
    Ignore,
    /// Inside a doc-comment whose body begins at `start`.
    Comment { start: usize, absorbed: bool },
    /// Comment captured; reading the declaration that follows it.
    Code { body: Range<usize> },
    Done,
}

struct ExtractState<'a> {
    source: &'a str,
    pos: usize,
    blocks: Vec<Block>,
}

impl<'a> ExtractState<'a> {
    fn new(source: &'a str) -> Self {
        ExtractState {
            source,
            pos: 0,
            blocks: Vec::new(),
        }
    }

    fn run(&mut self) {
        let mut phase = Phase::Ignore;

        loop {
            phase = match phase {
                Phase::Ignore => match self.source[self.pos..].find(OPEN) {
                    Some(offset) => Phase::Comment {
                        start: self.pos + offset + OPEN.len(),
                        absorbed: false,
                    },
                    None => Phase::Done,
                },

                Phase::Comment { start, absorbed } => {
                    let Some(offset) = self.source[start..].find(CLOSE) else {
                        break;
                    };
                    let end = start + offset;
                    let after = end + CLOSE.len();
                    let rest = &self.source[after..];
                    let next = rest.trim_start();

                    // A doc-comment directly followed by another one is a
                    // stub (e.g. an inherited-doc marker): the second wins.
                    if !absorbed && next.starts_with(OPEN) {
                        let sibling = after + (rest.len() - next.len());
                        Phase::Comment {
                            start: sibling + OPEN.len(),
                            absorbed: true,
                        }
                    } else {
                        self.pos = after;
                        Phase::Code { body: start..end }
                    }
                }

                Phase::Code { body } => {
                    let rest = &self.source[self.pos..];
                    match rest.find(TERMINATORS) {
                        Some(offset) => {
                            let code = &rest[..offset];
                            self.push_block(body, code);
                            self.pos += offset + 1;
                            Phase::Ignore
                        }
                        // Nothing terminates the declaration: the comment is dropped.
                        None => Phase::Done,
                    }
                }

                Phase::Done => break,
            };
        }
    }

    fn push_block(&mut self, body: Range<usize>, code: &str) {
        let (lines, tags) = self.split_comment(body);
        let block = Block {
            lines,
            tags,
            code: normalize_code(code),
        };
        if !block.is_empty() {
            self.blocks.push(block);
        }
    }

    /// Break a comment body into description lines and tags.
    fn split_comment(&self, body: Range<usize>) -> (Vec<String>, Vec<Tag>) {
        let mut lines = Vec::new();
        let mut tags = Vec::new();
        let mut seen_tag = false;
        let mut line_start = body.start;

        for (index, raw) in self.source[body].split('\n').enumerate() {
            let start = line_start;
            line_start += raw.len() + 1;

            // The remainder of the `/**` line is almost always empty.
            if index == 0 && raw.trim().is_empty() {
                continue;
            }

            let line = clean_line(raw);
            match TAG_LINE.captures(&line) {
                Some(caps) => {
                    seen_tag = true;
                    let indent = raw.len() - raw.trim_start().len();
                    tags.push(Tag {
                        name: caps[1].to_string(),
                        rest: caps[2].to_string(),
                        span: start + indent..start + raw.trim_end().len(),
                    });
                }
                // Blank lines after the first tag are trailing noise.
                None if seen_tag && line.is_empty() => {}
                None => lines.push(line),
            }
        }

        (lines, tags)
    }
}

/// Strip the leading `* ` decoration and trailing whitespace, keeping any
/// indentation past the decoration.
fn clean_line(raw: &str) -> String {
    let line = raw.trim_start();
    let line = match line.strip_prefix('*') {
        Some(after) if after.is_empty() => after,
        Some(after) if after.starts_with(char::is_whitespace) => {
            let mut chars = after.chars();
            chars.next();
            chars.as_str()
        }
        _ => line,
    };
    line.trim_end().to_string()
}

/// Collapse whitespace runs and shorten variable declarations to their name.
fn normalize_code(code: &str) -> String {
    let code = code.split_whitespace().collect::<Vec<_>>().join(" ");
    match DECLARATION.captures(&code) {
        Some(caps) => caps[1].to_string(),
        None => code,
    }
}
