pub mod catalog;
pub mod rule;
pub mod report;
pub mod rewriter;
pub mod error;

pub use catalog::{EnumTypeRule, RetypeKind, RuleCatalog};
pub use error::{Result, SchemaFixError};
pub use report::{RewriteChange, RewriteReport};
pub use rewriter::{
    Rewrite, RewriteOptions, SchemaRewriter, CONFIRMATION_MESSAGE, DEFAULT_SCHEMA_PATH,
};
pub use rule::{RuleKind, SubstitutionRule};
