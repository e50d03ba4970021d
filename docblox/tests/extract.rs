use docblox::block::Block;
use docblox::block::tag::{self, Parameter, TagKind, TypeName, Visibility};
use docblox::parser::{Parser, extract_blocks};

fn single(source: &str) -> Block {
    let blocks = extract_blocks(source);
    assert_eq!(blocks.len(), 1, "expected one block, got {:#?}", blocks);
    blocks.into_iter().next().unwrap()
}

fn tag_names(block: &Block) -> Vec<&str> {
    block.tags.iter().map(|t| t.name.as_str()).collect()
}

#[test]
fn function_with_description_and_tags() {
    let src = "\
/**
 * Greet a user.
 *
 * @param {string} name - the user's name
 * @return {string} greeting
 */
function greet(name) {
  return 'hi ' + name;
}
";
    let block = single(src);
    assert_eq!(block.lines, vec!["Greet a user.", ""]);
    assert_eq!(tag_names(&block), vec!["param", "return"]);
    assert_eq!(block.tags[0].rest, "{string} name - the user's name");
    assert_eq!(block.tags[1].rest, "{string} greeting");
    assert_eq!(block.code, "function greet(name)");
}

#[test]
fn code_whitespace_is_collapsed() {
    let block = single("/** Doc */\nint\n   add(int a,\n\tint b);\n");
    assert_eq!(block.code, "int add(int a, int b)");
}

#[test]
fn variable_declarations_lose_their_initializer() {
    let blocks = extract_blocks(
        "/** A */\nconst LIMIT = 42;\n/** B */\nlet   counter   = {};\n/** C */\nvar x;\n",
    );
    let codes: Vec<&str> = blocks.iter().map(|b| b.code.as_str()).collect();
    assert_eq!(codes, vec!["const LIMIT", "let counter", "var x"]);
}

#[test]
fn text_on_opening_line_is_kept() {
    let block = single("/** Short summary. */\nvoid f();");
    assert_eq!(block.lines, vec!["Short summary."]);
}

#[test]
fn blank_lines_after_first_tag_are_dropped() {
    let src = "/**\n * Intro\n *\n * @public\n *\n * @param {int} x\n *\n */\nvoid f(int x);";
    let block = single(src);
    assert_eq!(block.lines, vec!["Intro", ""]);
    assert_eq!(tag_names(&block), vec!["public", "param"]);
}

#[test]
fn trailing_delimiter_line_is_a_blank_line() {
    let block = single("/**\n * Only text\n */\nvoid f();");
    assert_eq!(block.lines, vec!["Only text", ""]);
}

#[test]
fn indentation_after_decoration_is_preserved() {
    let src = "/**\n * Example:\n *\n *     let x = f();\n */\nfn f();";
    let block = single(src);
    assert_eq!(block.lines, vec!["Example:", "", "    let x = f();", ""]);
}

#[test]
fn empty_comment_produces_no_block() {
    assert!(extract_blocks("/** */\nvoid f();\n/***/ void g();").is_empty());
}

#[test]
fn decorated_blank_comment_still_yields_a_block() {
    let block = single("/**\n *\n */\nvoid g();");
    assert_eq!(block.lines, vec!["", ""]);
}

#[test]
fn plain_comments_are_ignored() {
    let blocks = extract_blocks("/* not docs */ int a;\n// nor this\n/** Docs */ int b;");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].code, "int b");
}

#[test]
fn sibling_doc_comment_is_absorbed() {
    let src = "/** {@inheritDoc} */\n/**\n * Real docs\n */\nvoid f();";
    let block = single(src);
    assert_eq!(block.lines, vec!["Real docs", ""]);
    assert_eq!(block.code, "void f()");
}

#[test]
fn only_one_sibling_is_absorbed() {
    let src = "/** A */ /** B */ /** C */ int x;";
    let block = single(src);
    assert_eq!(block.lines, vec!["B"]);
    assert_eq!(block.code, "/** C */ int x");
}

#[test]
fn unterminated_declaration_drops_the_comment() {
    let blocks = extract_blocks("/** First */ int a;\n/** Dangling */\n");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].lines, vec!["First"]);
}

#[test]
fn unclosed_comment_stops_extraction() {
    let blocks = extract_blocks("/** First */ int a;\n/** never closed\n int b;");
    assert_eq!(blocks.len(), 1);
}

#[test]
fn tag_spans_point_at_source() {
    let src = "/**\n   * @ignore please\n */\nint x;";
    let block = single(src);
    let span = block.tags[0].span.clone();
    assert_eq!(&src[span], "* @ignore please");
}

#[test]
fn parser_records_source_id() {
    let file = Parser::new("/** Doc */ int x;".to_string(), 7).parse();
    assert_eq!(file.source_id, 7);
    assert_eq!(file.blocks.len(), 1);
}

// ---------------------------------------------------------------------------
// Tag sub-grammars
// ---------------------------------------------------------------------------

#[test]
fn parameter_with_dash_separator() {
    assert_eq!(
        tag::parse_parameter("{string} name - the user's name"),
        Some(Parameter {
            ty: "string".into(),
            name: "name".into(),
            desc: "the user's name".into(),
        })
    );
}

#[test]
fn parameter_without_description() {
    assert_eq!(
        tag::parse_parameter("{int} count"),
        Some(Parameter {
            ty: "int".into(),
            name: "count".into(),
            desc: String::new(),
        })
    );
}

#[test]
fn parameter_without_type_is_malformed() {
    assert_eq!(tag::parse_parameter("count"), None);
    assert_eq!(tag::parse_parameter("{int} -count"), None);
}

#[test]
fn type_name_with_and_without_type() {
    assert_eq!(
        tag::parse_type_name("{Base} Widget"),
        Some(TypeName {
            ty: "Base".into(),
            name: "Widget".into(),
        })
    );
    assert_eq!(
        tag::parse_type_name("Widget"),
        Some(TypeName {
            ty: String::new(),
            name: "Widget".into(),
        })
    );
    assert_eq!(tag::parse_type_name(""), Some(TypeName::default()));
}

#[test]
fn type_only() {
    assert_eq!(tag::parse_type("{Countable}"), Some("Countable".to_string()));
    assert_eq!(tag::parse_type("Countable"), Some("Countable".to_string()));
    assert_eq!(tag::parse_type("Two Words"), None);
    assert_eq!(tag::parse_type(""), None);
}

#[test]
fn tag_kinds() {
    assert_eq!(TagKind::of("module"), TagKind::ScopeOpen);
    assert_eq!(TagKind::of("endinterface"), TagKind::ScopeClose);
    assert_eq!(TagKind::of("parameter"), TagKind::Param);
    assert_eq!(TagKind::of("returns"), TagKind::Return);
    assert_eq!(
        TagKind::of("protected"),
        TagKind::Visibility(Visibility::Protected)
    );
    assert_eq!(TagKind::of("since"), TagKind::Other);
}
