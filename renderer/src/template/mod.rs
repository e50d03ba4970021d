pub mod merge;
pub mod template_string;

use std::fmt;
use std::sync::Arc;

use crate::template::template_string::TemplateString;

pub use merge::merge;

/// Output produced for a slot that holds neither text nor a template.
pub const INVALID_OUTPUT: &str = "?";

/// Named values handed to a template. Lookups of absent fields yield `""`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(&'static str, String)>,
}

impl Fields {
    pub fn new() -> Self {
        Fields::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.entries.push((name, value.into()));
        self
    }

    pub fn get(&self, name: &str) -> &str {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map_or("", |(_, value)| value.as_str())
    }
}

pub type TemplateFn = Arc<dyn Fn(&Fields) -> String + Send + Sync>;

/// One `pre`/`item`/`post` slot of a template section.
#[derive(Clone)]
pub enum TemplateValue {
    /// Fixed text; fields are ignored.
    Constant(String),
    /// Built-in template computed from the fields.
    Function(TemplateFn),
    /// Configured text with `{field}` interpolation.
    Pattern(TemplateString),
    /// A configured value of the wrong kind.
    Invalid,
}

impl TemplateValue {
    pub fn function(f: impl Fn(&Fields) -> String + Send + Sync + 'static) -> Self {
        TemplateValue::Function(Arc::new(f))
    }

    pub fn apply(&self, fields: &Fields) -> String {
        match self {
            TemplateValue::Constant(text) => text.clone(),
            TemplateValue::Function(f) => f(fields),
            TemplateValue::Pattern(template) => template.render(fields),
            TemplateValue::Invalid => INVALID_OUTPUT.to_string(),
        }
    }

    /// Interpret a configuration value: a string is constant text, a table
    /// with a `template` string interpolates fields, anything else is invalid.
    pub fn from_toml(value: &toml::Value) -> Self {
        match value {
            toml::Value::String(text) => TemplateValue::Constant(text.clone()),
            toml::Value::Table(table) => match table.get("template") {
                Some(toml::Value::String(source)) => {
                    TemplateValue::Pattern(TemplateString::parse(source))
                }
                _ => TemplateValue::Invalid,
            },
            _ => TemplateValue::Invalid,
        }
    }
}

impl fmt::Debug for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateValue::Constant(text) => f.debug_tuple("Constant").field(text).finish(),
            TemplateValue::Function(_) => f.write_str("Function(..)"),
            TemplateValue::Pattern(template) => f.debug_tuple("Pattern").field(template).finish(),
            TemplateValue::Invalid => f.write_str("Invalid"),
        }
    }
}

/// The three slots of a section, emitted as `pre`, one `item` per entry, `post`.
#[derive(Debug, Clone)]
pub struct Slots {
    pub pre: TemplateValue,
    pub item: TemplateValue,
    pub post: TemplateValue,
}

impl Slots {
    pub fn invalid() -> Self {
        Slots {
            pre: TemplateValue::Invalid,
            item: TemplateValue::Invalid,
            post: TemplateValue::Invalid,
        }
    }

    pub fn slot_mut(&mut self, name: &str) -> Option<&mut TemplateValue> {
        match name {
            "pre" => Some(&mut self.pre),
            "item" => Some(&mut self.item),
            "post" => Some(&mut self.post),
            _ => None,
        }
    }
}

/// Templates for every rendered section. Built once, then shared by reference.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub header: Slots,
    pub params: Slots,
    pub returns: Slots,
}

impl TemplateSet {
    pub fn section_mut(&mut self, name: &str) -> Option<&mut Slots> {
        match name {
            "header" => Some(&mut self.header),
            "params" => Some(&mut self.params),
            "return" => Some(&mut self.returns),
            _ => None,
        }
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        TemplateSet {
            header: Slots {
                pre: TemplateValue::Constant(String::new()),
                item: TemplateValue::function(|f| format!("`{}`\n", f.get("text"))),
                post: TemplateValue::Constant(String::new()),
            },
            params: Slots {
                pre: TemplateValue::Constant("\n**Parameters:**\n\n".to_string()),
                item: TemplateValue::function(|f| {
                    let desc = f.get("desc");
                    let desc = if desc.is_empty() {
                        String::new()
                    } else {
                        format!(" — {}", desc)
                    };
                    format!("* `{}` — `{}`{}\n", f.get("name"), f.get("type"), desc)
                }),
                post: TemplateValue::Constant("\n".to_string()),
            },
            returns: Slots {
                pre: TemplateValue::Constant(String::new()),
                item: TemplateValue::function(|f| {
                    let ty = f.get("type");
                    let desc = f.get("desc");
                    let dash = if ty.is_empty() && desc.is_empty() { "" } else { "—" };
                    format!("\n**Returns:** `{}` {} {}\n", ty, dash, desc)
                }),
                post: TemplateValue::Constant(String::new()),
            },
        }
    }
}
