use anyhow::{Context, Result};
use std::path::Path;

use crate::models::site::{Observatory, ObservatoryCatalog, BUILTIN_OBSERVATORIES};
use crate::parsing::json_targets;
use crate::parsing::target_list::{self, ParseSummary};

/// Unified interface for loading target lists from the flat delimited
/// format or JSON, detected by extension.
pub struct TargetListLoader;

impl TargetListLoader {
    /// Load targets from a file (auto-detects by extension; anything that
    /// is not `.json` is treated as the flat format).
    pub fn load_from_file(path: &Path) -> Result<ParseSummary> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read target list: {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::load_from_json_str(&content)
        } else {
            Ok(target_list::parse_target_list(&content))
        }
    }

    /// Load targets from a JSON string. JSON input is all-or-nothing: a bad
    /// entry fails the load rather than producing line errors.
    pub fn load_from_json_str(json_str: &str) -> Result<ParseSummary> {
        let targets =
            json_targets::parse_targets_json_str(json_str).context("Failed to parse JSON target list")?;
        Ok(ParseSummary {
            targets,
            errors: Vec::new(),
        })
    }
}

/// Loader for the named observatory catalog.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a TOML catalog file and merge it over the built-in table.
    /// File entries win on id collisions.
    pub fn load_from_file(path: &Path) -> Result<Vec<Observatory>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read observatory catalog: {}", path.display()))?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(toml_str: &str) -> Result<Vec<Observatory>> {
        let parsed: ObservatoryCatalog =
            toml::from_str(toml_str).context("Failed to parse observatory catalog TOML")?;

        let mut merged: Vec<Observatory> = BUILTIN_OBSERVATORIES.clone();
        for entry in parsed.observatory {
            if let Some(existing) = merged
                .iter_mut()
                .find(|o| o.id.eq_ignore_ascii_case(&entry.id))
            {
                *existing = entry;
            } else {
                merged.push(entry);
            }
        }
        Ok(merged)
    }

    /// The built-in table alone.
    pub fn builtin() -> Vec<Observatory> {
        BUILTIN_OBSERVATORIES.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_flat_list_from_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".txt").unwrap();
        writeln!(
            file,
            "T1 ,. 01:00:00 ,. +10:00:00 ,. 9.0 ,. 2455000.5 ,. 1.0 ,. 2.0"
        )
        .unwrap();

        let summary = TargetListLoader::load_from_file(file.path()).unwrap();
        assert_eq!(summary.targets.len(), 1);
        assert!(summary.errors.is_empty());
    }

    #[test]
    fn load_json_list_from_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".json").unwrap();
        write!(
            file,
            r#"[{{"name": "T1", "ra_deg": 15.0, "dec_deg": 10.0}}]"#
        )
        .unwrap();

        let summary = TargetListLoader::load_from_file(file.path()).unwrap();
        assert_eq!(summary.targets.len(), 1);
    }

    #[test]
    fn missing_file_is_fatal() {
        let result = TargetListLoader::load_from_file(Path::new("/nonexistent/targets.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn catalog_merge_overrides_builtin() {
        let toml = r#"
            [[observatory]]
            id = "flwo"
            name = "Whipple (override)"
            latitude = 31.7
            longitude = -110.9
            timezone = "America/Phoenix"

            [[observatory]]
            id = "backyard"
            name = "Backyard dome"
            latitude = 48.1
            longitude = 11.6
            timezone = "Europe/Berlin"
        "#;
        let catalog = CatalogLoader::load_from_str(toml).unwrap();

        let flwo = catalog.iter().find(|o| o.id == "flwo").unwrap();
        assert_eq!(flwo.name, "Whipple (override)");
        assert!(catalog.iter().any(|o| o.id == "backyard"));
        // built-ins not mentioned in the file are still there
        assert!(catalog.iter().any(|o| o.id == "maunakea"));
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(CatalogLoader::load_from_str("not [valid toml").is_err());
    }
}
