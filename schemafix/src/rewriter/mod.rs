use crate::catalog::RuleCatalog;
use crate::error::Result;
use crate::report::{RewriteChange, RewriteReport};
use crate::rule::SubstitutionRule;
use std::path::Path;

/// Schema location relative to the backend directory
pub const DEFAULT_SCHEMA_PATH: &str = "prisma/schema.prisma";

/// Printed to stdout after a successful rewrite
pub const CONFIRMATION_MESSAGE: &str = "✅ Schema fixed - all enums converted to String types";

/// Rewritten text plus every substitution that produced it
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub content: String,
    pub changes: Vec<RewriteChange>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteOptions {
    /// Rewrite in memory only; leave the file untouched
    pub dry_run: bool,
}

/// Applies an ordered list of substitution rules to a schema document.
pub struct SchemaRewriter {
    rules: Vec<SubstitutionRule>,
}

impl SchemaRewriter {
    /// Validate and compile a catalog. Enum-block removal, when enabled,
    /// is always the first rule.
    pub fn new(catalog: &RuleCatalog) -> Result<Self> {
        catalog.validate()?;

        let mut rules = Vec::with_capacity(catalog.rule_count());
        if catalog.remove_enum_blocks {
            rules.push(SubstitutionRule::remove_enum_blocks()?);
        }
        for type_rule in &catalog.types {
            rules.push(SubstitutionRule::retype(type_rule)?);
        }

        Ok(SchemaRewriter { rules })
    }

    /// Compile the built-in catalog
    pub fn builtin() -> Result<Self> {
        Self::new(&RuleCatalog::builtin())
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    /// Run every rule in order, each on the output of the previous one.
    pub fn rewrite_str(&self, content: &str) -> Rewrite {
        let mut current = content.to_string();
        let mut changes = Vec::new();

        for rule in &self.rules {
            let (next, rule_changes) = rule.apply(&current);
            log::debug!("{:?}: {} match(es)", rule.kind, rule_changes.len());
            current = next;
            changes.extend(rule_changes);
        }

        Rewrite {
            content: current,
            changes,
        }
    }

    /// Read the whole file, rewrite it, and write it back to the same path.
    ///
    /// The file is overwritten in place: there is no backup and no atomic
    /// rename, so an interrupted write can lose data.
    pub fn rewrite_file(&self, path: &Path, options: RewriteOptions) -> Result<RewriteReport> {
        let content = std::fs::read_to_string(path)?;
        log::info!("Read {} ({} bytes)", path.display(), content.len());

        let rewrite = self.rewrite_str(&content);

        if options.dry_run {
            log::info!(
                "Dry run: {} change(s) not written to {}",
                rewrite.changes.len(),
                path.display()
            );
        } else {
            std::fs::write(path, &rewrite.content)?;
            log::info!(
                "Wrote {} ({} change(s))",
                path.display(),
                rewrite.changes.len()
            );
        }

        Ok(RewriteReport {
            path: path.to_path_buf(),
            written: !options.dry_run,
            changes: rewrite.changes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EnumTypeRule;
    use crate::error::SchemaFixError;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const DEFAULT_TYPES: [&str; 10] = [
        "ApplicationStatus",
        "FreelancerStatus",
        "OnboardingStatus",
        "Tier",
        "Grade",
        "ProjectStatus",
        "EvaluationFrequency",
        "ApplicationProjectStatus",
        "AssignmentStatus",
        "PaymentStatus",
    ];

    const BARE_TYPES: [&str; 4] = ["TestType", "PaymentModel", "RecordType", "NotificationType"];

    fn sample_schema() -> &'static str {
        r#"generator client {
  provider = "prisma-client-js"
}

enum Tier {
  BRONZE
  SILVER
  GOLD
}

enum TestType {
  MCQ
  PRACTICAL
}

enum ApplicationProjectStatus {
  APPLIED
  SELECTED
}

model Freelancer {
  id        String   @id @default(uuid())
  tier      Tier     @default(BRONZE)
  status    FreelancerStatus @default(PENDING)
}

model Test {
  id   String   @id
  type TestType
}

model ProjectApplication {
  id     String @id
  status ApplicationProjectStatus @default(APPLIED)
}

model Payment {
  model  PaymentModel
  status PaymentStatus @default(PENDING)
}
"#
    }

    #[test]
    fn test_concrete_scenario() {
        let rewriter = SchemaRewriter::builtin().unwrap();
        let out = rewriter.rewrite_str("enum Tier { BRONZE SILVER GOLD }\nmodel X { level Tier @default(GOLD) }");
        assert_eq!(out.content, "\nmodel X { level String @default(\"GOLD\") }");
        assert_eq!(
            out.changes,
            vec![
                RewriteChange::EnumRemoved { name: "Tier".into() },
                RewriteChange::FieldRetyped {
                    type_name: "Tier".into(),
                    default: "GOLD".into()
                },
            ]
        );
    }

    #[test]
    fn test_full_schema() {
        let rewriter = SchemaRewriter::builtin().unwrap();
        let out = rewriter.rewrite_str(sample_schema());
        let expected = r#"generator client {
  provider = "prisma-client-js"
}







model Freelancer {
  id        String   @id @default(uuid())
  tier      String @default("BRONZE")
  status    String @default("PENDING")
}

model Test {
  id   String   @id
  type String
}

model ProjectApplication {
  id     String @id
  status String @default("APPLIED")
}

model Payment {
  model  String
  status String @default("PENDING")
}
"#;
        assert_eq!(out.content, expected);
        assert!(!out.content.contains("enum "));
    }

    #[test]
    fn test_every_default_type_is_retyped() {
        let rewriter = SchemaRewriter::builtin().unwrap();
        for name in DEFAULT_TYPES {
            let input = format!("model M {{\n  f {name} @default(VALUE_ONE)\n}}\n");
            let out = rewriter.rewrite_str(&input);
            assert_eq!(
                out.content,
                "model M {\n  f String @default(\"VALUE_ONE\")\n}\n",
                "type {name}"
            );
        }
    }

    #[test]
    fn test_every_bare_type_is_replaced() {
        let rewriter = SchemaRewriter::builtin().unwrap();
        for name in BARE_TYPES {
            let input = format!("model M {{\n  f {name}\n  g {name}?\n}}\n");
            let out = rewriter.rewrite_str(&input);
            assert_eq!(out.content, "model M {\n  f String\n  g String?\n}\n", "type {name}");
            assert_eq!(out.changes.len(), 2);
        }
    }

    #[test]
    fn test_second_run_is_noop() {
        let rewriter = SchemaRewriter::builtin().unwrap();
        let first = rewriter.rewrite_str(sample_schema());
        let second = rewriter.rewrite_str(&first.content);
        assert_eq!(second.content, first.content);
        assert!(second.changes.is_empty());
    }

    #[test]
    fn test_enum_body_removed_before_bare_replacement() {
        let rewriter = SchemaRewriter::builtin().unwrap();
        let out = rewriter.rewrite_str("enum Kind {\n  TestType\n  RecordType\n}\nmodel M { t TestType }");
        assert_eq!(out.content, "\nmodel M { t String }");
        assert!(!out.content.contains("TestType"));
        assert!(!out.content.contains("Kind"));
        assert_eq!(
            out.changes.iter().filter(|c| matches!(c, RewriteChange::TypeReplaced { .. })).count(),
            1
        );
    }

    #[test]
    fn test_no_matches_is_not_an_error() {
        let rewriter = SchemaRewriter::builtin().unwrap();
        let input = "model User {\n  id String @id\n}\n";
        let out = rewriter.rewrite_str(input);
        assert_eq!(out.content, input);
        assert!(out.changes.is_empty());
    }

    #[test]
    fn test_custom_catalog_respects_order() {
        // Bare rules leave an existing default unquoted.
        let catalog = RuleCatalog {
            remove_enum_blocks: false,
            types: vec![EnumTypeRule::bare("Flag"), EnumTypeRule::with_default("Flag2")],
        };
        let rewriter = SchemaRewriter::new(&catalog).unwrap();
        assert_eq!(rewriter.rules().len(), 2);
        let out = rewriter.rewrite_str("a Flag @default(ON)\nb Flag2 @default(OFF)\nenum E { A }");
        assert_eq!(
            out.content,
            "a String @default(ON)\nb String @default(\"OFF\")\nenum E { A }"
        );
    }

    #[test]
    fn test_new_rejects_invalid_catalog() {
        let catalog = RuleCatalog {
            remove_enum_blocks: true,
            types: vec![EnumTypeRule::bare("Not(Valid")],
        };
        assert!(matches!(
            SchemaRewriter::new(&catalog),
            Err(SchemaFixError::Catalog(_))
        ));
    }

    #[test]
    fn test_rewrite_file_in_place() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("schema.prisma");
        std::fs::write(&path, sample_schema()).unwrap();

        let rewriter = SchemaRewriter::builtin().unwrap();
        let report = rewriter.rewrite_file(&path, RewriteOptions::default()).unwrap();

        assert!(report.written);
        assert_eq!(report.removed_enums(), vec!["Tier", "TestType", "ApplicationProjectStatus"]);
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, rewriter.rewrite_str(sample_schema()).content);
    }

    #[test]
    fn test_rewrite_file_dry_run_leaves_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("schema.prisma");
        std::fs::write(&path, sample_schema()).unwrap();

        let rewriter = SchemaRewriter::builtin().unwrap();
        let report = rewriter
            .rewrite_file(&path, RewriteOptions { dry_run: true })
            .unwrap();

        assert!(!report.written);
        assert!(!report.is_noop());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), sample_schema());
    }

    #[test]
    fn test_rewrite_file_missing() {
        let tmp = TempDir::new().unwrap();
        let rewriter = SchemaRewriter::builtin().unwrap();
        let err = rewriter
            .rewrite_file(&tmp.path().join("nope.prisma"), RewriteOptions::default())
            .unwrap_err();
        assert!(matches!(err, SchemaFixError::Io(_)));
    }

    #[test]
    fn test_rewrite_file_directory_target() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("schema.prisma");
        std::fs::create_dir(&dir).unwrap();

        let rewriter = SchemaRewriter::builtin().unwrap();
        let err = rewriter
            .rewrite_file(&dir, RewriteOptions::default())
            .unwrap_err();
        assert!(matches!(err, SchemaFixError::Io(_)));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_rewrite_file_preserves_unicode() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("schema.prisma");
        std::fs::write(&path, "// Café ✅\nmodel M { g Grade @default(A) }\n").unwrap();

        let rewriter = SchemaRewriter::builtin().unwrap();
        rewriter.rewrite_file(&path, RewriteOptions::default()).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "// Café ✅\nmodel M { g String @default(\"A\") }\n"
        );
    }
}
