use crate::error::Result;
use super::types::RuleCatalog;
use std::path::Path;

/// Parse a rules.yaml file into a RuleCatalog
pub fn parse_catalog(path: &Path) -> Result<RuleCatalog> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog_str(&content)
}

/// Parse a catalog YAML string into a validated RuleCatalog
pub fn parse_catalog_str(content: &str) -> Result<RuleCatalog> {
    let catalog: RuleCatalog = serde_yaml::from_str(content)?;
    catalog.validate()?;
    Ok(catalog)
}
