use crate::error::{Result, SchemaFixError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered description of every substitution the rewriter performs.
///
/// Enum-block removal always runs first; `types` then run in list order,
/// each one seeing the output of the ones before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleCatalog {
    #[serde(default = "default_remove_enum_blocks")]
    pub remove_enum_blocks: bool,
    #[serde(default)]
    pub types: Vec<EnumTypeRule>,
}

/// A single enum type name and how its references get rewritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumTypeRule {
    pub name: String,
    #[serde(default)]
    pub kind: RetypeKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetypeKind {
    /// `Name @default(VALUE)` becomes `String @default("VALUE")`
    #[default]
    WithDefault,
    /// Every `Name` token becomes `String`
    Bare,
}

fn default_remove_enum_blocks() -> bool {
    true
}

impl EnumTypeRule {
    /// Rule that rewrites `name @default(VALUE)` references
    pub fn with_default(name: &str) -> Self {
        EnumTypeRule {
            name: name.to_string(),
            kind: RetypeKind::WithDefault,
        }
    }

    /// Rule that replaces every `name` token with `String`
    pub fn bare(name: &str) -> Self {
        EnumTypeRule {
            name: name.to_string(),
            kind: RetypeKind::Bare,
        }
    }
}

impl RuleCatalog {
    /// The catalog for the freelancer platform schema.
    /// The interleaving of `with_default` and `bare` entries is significant.
    pub fn builtin() -> Self {
        RuleCatalog {
            remove_enum_blocks: true,
            types: vec![
                EnumTypeRule::with_default("ApplicationStatus"),
                EnumTypeRule::with_default("FreelancerStatus"),
                EnumTypeRule::with_default("OnboardingStatus"),
                EnumTypeRule::with_default("Tier"),
                EnumTypeRule::with_default("Grade"),
                EnumTypeRule::bare("TestType"),
                EnumTypeRule::with_default("ProjectStatus"),
                EnumTypeRule::with_default("EvaluationFrequency"),
                EnumTypeRule::bare("PaymentModel"),
                EnumTypeRule::with_default("ApplicationProjectStatus"),
                EnumTypeRule::with_default("AssignmentStatus"),
                EnumTypeRule::bare("RecordType"),
                EnumTypeRule::with_default("PaymentStatus"),
                EnumTypeRule::bare("NotificationType"),
            ],
        }
    }

    /// Check that every type name is a plain identifier and appears once.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for rule in &self.types {
            if !is_identifier(&rule.name) {
                return Err(SchemaFixError::Catalog(format!(
                    "'{}' is not a valid enum type name",
                    rule.name
                )));
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(SchemaFixError::Catalog(format!(
                    "Enum type '{}' is listed more than once",
                    rule.name
                )));
            }
        }
        Ok(())
    }

    /// Number of substitution rules this catalog compiles to
    pub fn rule_count(&self) -> usize {
        self.types.len() + usize::from(self.remove_enum_blocks)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
