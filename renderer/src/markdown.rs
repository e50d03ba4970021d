use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use docblox::SourceFile;
use docblox::block::Block;
use docblox::parser::{Parser, TagWarning};

use crate::fields::{Admission, RenderFields, admit};
use crate::scope::{Scope, Threshold};
use crate::template::{Fields, TemplateSet};

static TRAILING_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Markdown generated for one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub markdown: String,
    pub warnings: Vec<TagWarning>,
}

/// Render every admitted block of `source`.
///
/// `level` is the header level of top-level blocks; members of a class,
/// module or interface are rendered one level deeper.
pub fn render_source(
    source: &SourceFile,
    level: u8,
    threshold: Threshold,
    templates: &TemplateSet,
) -> Rendered {
    let mut scope = Scope::default();
    let mut warnings = Vec::new();
    let mut out = String::new();
    let mut rendered = 0usize;

    for block in &source.blocks {
        let (next, admission) = admit(scope, block, threshold, source.source_id, &mut warnings);
        scope = next;

        if let Admission::Render(fields) = admission {
            let depth = scope.depth(level, fields.opens_scope);
            render_block(&mut out, block, &fields, depth, templates);
            rendered += 1;
        }
    }

    debug!(
        blocks = source.blocks.len(),
        rendered,
        source_id = source.source_id,
        "rendered source"
    );

    Rendered {
        markdown: tidy(&out),
        warnings,
    }
}

/// Parse and render source text in one step, discarding warnings.
pub fn src_to_markdown(
    source: &str,
    level: u8,
    threshold: Threshold,
    templates: &TemplateSet,
) -> String {
    let file = Parser::new(source.to_string(), 0).parse();
    render_source(&file, level, threshold, templates).markdown
}

fn render_block(
    out: &mut String,
    block: &Block,
    fields: &RenderFields,
    depth: usize,
    templates: &TemplateSet,
) {
    let none = Fields::new();

    // Header
    let header = Fields::new()
        .with("text", header_text(&fields.implements, &block.code))
        .with("code", block.code.as_str())
        .with("visibility", fields.visibility.map_or("", |v| v.as_str()))
        .with("type", fields.declared_type.as_str())
        .with("name", fields.declared_name.as_str())
        .with("implements", fields.implements.as_str());
    out.push_str(&templates.header.pre.apply(&none));
    out.push_str(&"#".repeat(depth));
    out.push(' ');
    out.push_str(&templates.header.item.apply(&header));
    out.push_str(&templates.header.post.apply(&none));
    out.push('\n');

    // Description: indented lines stay verbatim, the rest reflows.
    for line in &block.lines {
        if line.is_empty() {
            out.push_str("\n\n");
        } else if line.starts_with(char::is_whitespace) {
            out.push_str(line);
            out.push('\n');
        } else {
            out.push_str(line);
            out.push(' ');
        }
    }

    // Parameters
    if !fields.params.is_empty() {
        out.push_str(&templates.params.pre.apply(&none));
        for param in &fields.params {
            let item = Fields::new()
                .with("name", param.name.as_str())
                .with("type", param.ty.as_str())
                .with("desc", param.desc.as_str());
            out.push_str(&templates.params.item.apply(&item));
        }
        out.push_str(&templates.params.post.apply(&none));
    }

    // Return value
    if fields.has_return() {
        let item = Fields::new()
            .with("type", fields.return_type.as_str())
            .with("desc", fields.return_desc.as_str());
        out.push_str(&templates.returns.pre.apply(&none));
        out.push_str(&templates.returns.item.apply(&item));
        out.push_str(&templates.returns.post.apply(&none));
    }

    out.push('\n');
}

/// Header label: the declaration, prefixed by what it implements. `$` is
/// escaped so Markdown math extensions leave it alone.
fn header_text(implements: &str, code: &str) -> String {
    let code = code.replace('$', "\\$");
    if implements.is_empty() {
        code
    } else {
        format!("implements {} {}", implements, code)
    }
}

/// Strip trailing blanks from every line, then squeeze blank-line runs down
/// to a single paragraph break.
fn tidy(markdown: &str) -> String {
    let stripped = TRAILING_SPACE.replace_all(markdown, "");
    BLANK_RUN.replace_all(&stripped, "\n\n").into_owned()
}
