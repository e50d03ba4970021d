use docblox::block::Block;
use docblox::block::tag::{self, Parameter, TagKind, Visibility};
use docblox::parser::TagWarning;

use crate::scope::{Scope, Threshold};

/// Information gathered from a block's tags, consumed by the templates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFields {
    pub visibility: Option<Visibility>,
    /// `class`, `module` or `interface`, followed by the declared type if any.
    pub declared_type: String,
    pub declared_name: String,
    pub implements: String,
    pub params: Vec<Parameter>,
    pub return_type: String,
    pub return_desc: String,
    /// True for the block that opened the current scope.
    pub opens_scope: bool,
}

impl RenderFields {
    pub fn has_return(&self) -> bool {
        !self.return_type.is_empty() || !self.return_desc.is_empty()
    }
}

/// Outcome of running a block's tags.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    Render(RenderFields),
    Drop,
}

/// Interpret a block's tags in order, returning the scope for the next block
/// and whether this one is rendered.
///
/// A dropping tag ends processing at once; scope changes made by earlier tags
/// of the same block still carry over.
pub fn admit(
    mut scope: Scope,
    block: &Block,
    threshold: Threshold,
    source_id: usize,
    warnings: &mut Vec<TagWarning>,
) -> (Scope, Admission) {
    let mut fields = RenderFields::default();

    for tag in &block.tags {
        match TagKind::of(&tag.name) {
            TagKind::ScopeOpen => {
                scope = scope.enter();
                fields.opens_scope = true;
                if let Some(declared) = tag::parse_type_name(&tag.rest) {
                    fields.declared_type = format!("{} {}", tag.name, declared.ty)
                        .trim_end()
                        .to_string();
                    fields.declared_name = declared.name;
                }
            }

            TagKind::ScopeClose => return (scope.exit(), Admission::Drop),

            TagKind::Implements => match tag::parse_type(&tag.rest) {
                Some(target) => fields.implements = target,
                None => warnings.push(TagWarning::malformed(tag, "`{Type}`", source_id)),
            },

            TagKind::Visibility(visibility) => {
                fields.visibility = Some(visibility);
                if !threshold.admits(visibility) {
                    return (scope, Admission::Drop);
                }
            }

            TagKind::Access => {
                if let Some(visibility) = Visibility::from_name(&tag.rest) {
                    fields.visibility = Some(visibility);
                    if !threshold.admits(visibility) {
                        return (scope, Admission::Drop);
                    }
                }
            }

            TagKind::Param => match tag::parse_parameter(&tag.rest) {
                Some(param) => fields.params.push(param),
                None => warnings.push(TagWarning::malformed(
                    tag,
                    "`{type} name [- description]`",
                    source_id,
                )),
            },

            TagKind::Return => {
                let ret = tag::parse_type_name(&tag.rest).unwrap_or_default();
                fields.return_type = ret.ty;
                fields.return_desc = ret.name;
            }

            TagKind::Ignore => return (scope, Admission::Drop),

            TagKind::Other => {}
        }
    }

    (scope, Admission::Render(fields))
}
