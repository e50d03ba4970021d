pub mod error;
pub mod fields;
pub mod markdown;
pub mod scope;
pub mod substitute;
pub mod template;

pub use error::LoadError;
pub use markdown::{Rendered, render_source, src_to_markdown};
pub use scope::Threshold;
pub use substitute::{
    LoadedSource, SourceLoader, Substitution, filter_document, has_placeholder,
};
pub use template::TemplateSet;
