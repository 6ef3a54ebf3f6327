//! Configuration file support for depcomply.
//!
//! Provides YAML-based configuration through `depcomply.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::compliance::domain::LicenseFamily;
use crate::compliance::policies::LicenseDictionary;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "depcomply.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Reference used in file URLs for components without a version.
    pub default_version: Option<String>,
    /// Component name patterns excluded from scanning.
    pub ignore: Option<Vec<String>>,
    pub license_overrides: Option<Vec<LicenseOverride>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Forces the family of one SPDX identifier.
#[derive(Debug, Deserialize)]
pub struct LicenseOverride {
    pub spdx_id: String,
    #[serde(rename = "type")]
    pub family: String,
}

impl ConfigFile {
    /// Dictionary with this file's overrides layered over the built-in table.
    pub fn license_dictionary(&self) -> Result<LicenseDictionary> {
        let overrides = self
            .license_overrides
            .iter()
            .flatten()
            .map(|o| {
                let family: LicenseFamily = o.family.parse().map_err(anyhow::Error::msg)?;
                Ok((o.spdx_id.trim().to_string(), family))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(LicenseDictionary::with_overrides(overrides))
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(version) = &config.default_version {
        if version.trim().is_empty() {
            bail!(
                "Invalid config: default_version must not be empty.\n\n\
                 💡 Hint: Use a branch or tag name such as \"master\" or \"main\", or remove the field."
            );
        }
    }

    for (i, entry) in config.license_overrides.iter().flatten().enumerate() {
        if entry.spdx_id.trim().is_empty() {
            bail!(
                "Invalid config: license_overrides[{}].spdx_id must not be empty.\n\n\
                 💡 Hint: Each override needs an SPDX identifier (e.g., \"BSD-3-Clause\").",
                i
            );
        }
        if let Err(e) = entry.family.parse::<LicenseFamily>() {
            bail!(
                "Invalid config: license_overrides[{}].type: {}\n\n\
                 💡 Hint: Pick the family whose obligations match the license.",
                i,
                e
            );
        }
    }
    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.yml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
default_version: main
ignore:
  - "github.com/acme/*"
  - example.com/internal
license_overrides:
  - spdx_id: BSD-3-Clause-Clear
    type: notice
  - spdx_id: Acme-1.0
    type: Permissive
"#,
        );

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.default_version.as_deref(), Some("main"));
        assert_eq!(
            config.ignore.as_deref(),
            Some(&["github.com/acme/*".to_string(), "example.com/internal".to_string()][..])
        );

        let dictionary = config.license_dictionary().unwrap();
        assert_eq!(dictionary.override_count(), 2);
        assert_eq!(dictionary.family_of("Acme-1.0"), LicenseFamily::Permissive);
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "default_version: trunk\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.default_version.as_deref(), Some("trunk"));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config_from_path(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "invalid: yaml: [[[broken");
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_empty_spdx_id_validation_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
license_overrides:
  - spdx_id: "   "
    type: notice
"#,
        );
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("spdx_id must not be empty"));
    }

    #[test]
    fn test_invalid_type_validation_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
license_overrides:
  - spdx_id: MIT
    type: lenient
"#,
        );
        let err = load_config_from_path(&path).unwrap_err().to_string();
        assert!(err.contains("license_overrides[0].type"));
        assert!(err.contains("restricted"));
    }

    #[test]
    fn test_empty_default_version_validation_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "default_version: \"\"\n");
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("default_version must not be empty"));
    }

    #[test]
    fn test_unknown_fields_captured() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "ignore: []\nformat: json\ncheck_cve: true\n");
        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("format"));
        assert!(config.unknown_fields.contains_key("check_cve"));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.default_version.is_none());
        assert!(config.ignore.is_none());
        assert!(config.license_overrides.is_none());
        assert_eq!(config.license_dictionary().unwrap().override_count(), 0);
    }
}
