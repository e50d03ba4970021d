use std::sync::LazyLock;

use regex::Regex;

/// `{Type}` or a bare `Type`, nothing else.
static TYPE_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{?([^\s}]+)\}?$").unwrap());

/// `[{Type}] rest` -- the type is only taken when followed by whitespace.
static TYPE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\{?([^\s}]+)?\}?\s+)?(.*)$").unwrap());

/// `{Type} name [- ]description`
static TYPE_NAME_DESC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\{?([^\s}]+)\}?\s+([^-]\S*)(?:\s+-)?(?:\s+(.*))?$").unwrap()
});

/// Member visibility declared by `@public`, `@protected`, `@private` or `@access`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn from_name(name: &str) -> Option<Visibility> {
        match name {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// What a tag name means to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `@class`, `@module`, `@interface`
    ScopeOpen,
    /// `@endclass`, `@endmodule`, `@endinterface`
    ScopeClose,
    Implements,
    /// A bare `@public`, `@protected` or `@private`.
    Visibility(Visibility),
    /// `@access <visibility>`
    Access,
    /// `@param`, `@parameter`
    Param,
    /// `@return`, `@returns`
    Return,
    Ignore,
    Other,
}

impl TagKind {
    pub fn of(name: &str) -> TagKind {
        match name {
            "class" | "module" | "interface" => TagKind::ScopeOpen,
            "endclass" | "endmodule" | "endinterface" => TagKind::ScopeClose,
            "implements" => TagKind::Implements,
            "access" => TagKind::Access,
            "param" | "parameter" => TagKind::Param,
            "return" | "returns" => TagKind::Return,
            "ignore" => TagKind::Ignore,
            other => match Visibility::from_name(other) {
                Some(visibility) => TagKind::Visibility(visibility),
                None => TagKind::Other,
            },
        }
    }
}

/// An optional type followed by free text, as in `@class {Base} Name` or
/// `@return {string} the result`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeName {
    pub ty: String,
    pub name: String,
}

/// A `@param` record. Absent parts are empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameter {
    pub ty: String,
    pub name: String,
    pub desc: String,
}

/// Parse a type-only argument (`@implements {Iface}`).
pub fn parse_type(rest: &str) -> Option<String> {
    TYPE_ONLY
        .captures(rest)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()).to_string())
}

/// Parse an optional type followed by a name or description.
pub fn parse_type_name(rest: &str) -> Option<TypeName> {
    TYPE_NAME.captures(rest).map(|caps| TypeName {
        ty: caps.get(1).map_or("", |m| m.as_str()).to_string(),
        name: caps.get(2).map_or("", |m| m.as_str()).to_string(),
    })
}

/// Parse `{type} name [- ]description`. The name may not start with `-`.
pub fn parse_parameter(rest: &str) -> Option<Parameter> {
    TYPE_NAME_DESC.captures(rest).map(|caps| Parameter {
        ty: caps.get(1).map_or("", |m| m.as_str()).to_string(),
        name: caps.get(2).map_or("", |m| m.as_str()).to_string(),
        desc: caps.get(3).map_or("", |m| m.as_str()).to_string(),
    })
}
