use crate::catalog::{EnumTypeRule, RetypeKind};
use crate::error::Result;
use crate::report::RewriteChange;
use regex::{Captures, Regex};

/// `enum Name { ... }` with a non-empty body and no nested closing brace.
const ENUM_BLOCK_PATTERN: &str = r"enum\s+(\w+)\s*\{[^}]+\}";

/// What a compiled rule rewrites
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    RemoveEnumBlocks,
    RetypeWithDefault { type_name: String },
    RetypeBare { type_name: String },
}

/// A compiled (pattern, replacement-template) pair.
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pub kind: RuleKind,
    pub regex: Regex,
    /// Template in `regex` expansion syntax (`${1}` refers to the first group)
    pub replacement: String,
}

impl SubstitutionRule {
    pub fn remove_enum_blocks() -> Result<Self> {
        Ok(SubstitutionRule {
            kind: RuleKind::RemoveEnumBlocks,
            regex: Regex::new(ENUM_BLOCK_PATTERN)?,
            replacement: String::new(),
        })
    }

    /// Compile one catalog entry. The type name only matches as a whole identifier.
    pub fn retype(rule: &EnumTypeRule) -> Result<Self> {
        let name = regex::escape(&rule.name);
        let compiled = match rule.kind {
            RetypeKind::WithDefault => SubstitutionRule {
                kind: RuleKind::RetypeWithDefault {
                    type_name: rule.name.clone(),
                },
                regex: Regex::new(&format!(r"\b{name}\s+@default\((\w+)\)"))?,
                replacement: r#"String @default("${1}")"#.to_string(),
            },
            RetypeKind::Bare => SubstitutionRule {
                kind: RuleKind::RetypeBare {
                    type_name: rule.name.clone(),
                },
                regex: Regex::new(&format!(r"\b{name}\b"))?,
                replacement: "String".to_string(),
            },
        };
        Ok(compiled)
    }

    /// Replace every non-overlapping match in one left-to-right pass.
    /// Returns the new text and one change per match.
    pub fn apply(&self, input: &str) -> (String, Vec<RewriteChange>) {
        let mut changes = Vec::new();
        let output = self
            .regex
            .replace_all(input, |caps: &Captures| {
                changes.push(self.change_for(caps));
                let mut dst = String::new();
                caps.expand(&self.replacement, &mut dst);
                dst
            })
            .into_owned();
        (output, changes)
    }

    fn change_for(&self, caps: &Captures) -> RewriteChange {
        let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string()).unwrap_or_default();
        match &self.kind {
            RuleKind::RemoveEnumBlocks => RewriteChange::EnumRemoved { name: group(1) },
            RuleKind::RetypeWithDefault { type_name } => RewriteChange::FieldRetyped {
                type_name: type_name.clone(),
                default: group(1),
            },
            RuleKind::RetypeBare { type_name } => RewriteChange::TypeReplaced {
                type_name: type_name.clone(),
            },
        }
    }
}
