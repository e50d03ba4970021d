use super::Fields;

/// A template read from configuration: literal text with `{field}`
/// interpolations. `{{` and `}}` produce literal braces; an unclosed `{` is
/// kept as text.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateString {
    pub parts: Vec<TemplateStringPart>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateStringPart {
    /// Literal text content.
    Literal(String),
    /// A field name to be looked up at render time.
    Field(String),
}

impl TemplateString {
    pub fn parse(source: &str) -> Self {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(c) = rest.chars().next() {
            if rest.starts_with("{{") {
                literal.push('{');
                rest = &rest[2..];
            } else if rest.starts_with("}}") {
                literal.push('}');
                rest = &rest[2..];
            } else if c == '{' {
                match rest[1..].find('}') {
                    Some(end) => {
                        if !literal.is_empty() {
                            parts.push(TemplateStringPart::Literal(std::mem::take(&mut literal)));
                        }
                        parts.push(TemplateStringPart::Field(rest[1..=end].trim().to_string()));
                        rest = &rest[end + 2..];
                    }
                    None => {
                        literal.push_str(rest);
                        rest = "";
                    }
                }
            } else {
                literal.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }

        if !literal.is_empty() {
            parts.push(TemplateStringPart::Literal(literal));
        }
        TemplateString { parts }
    }

    pub fn render(&self, fields: &Fields) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                TemplateStringPart::Literal(text) => out.push_str(text),
                TemplateStringPart::Field(name) => out.push_str(fields.get(name)),
            }
        }
        out
    }
}
