use crate::compliance::domain::Finding;
use crate::shared::security::validate_contained_path;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// Maximum length for component names (security limit)
const MAX_COMPONENT_NAME_LENGTH: usize = 512;

/// NewType wrapper for a canonical component name with validation
///
/// Names are module paths such as `github.com/acme/widget` or `gopkg.in/yaml.v3`.
/// They are joined onto the destination directory, so they must be relative
/// and may not contain `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentName(String);

impl ComponentName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Component name cannot be empty");
        }

        if name.len() > MAX_COMPONENT_NAME_LENGTH {
            anyhow::bail!(
                "Component name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_COMPONENT_NAME_LENGTH
            );
        }

        if !name.chars().all(|c| {
            c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '~' | '+' | '@')
        }) {
            anyhow::bail!(
                "Component name '{}' contains invalid characters. Only alphanumeric, hyphens, underscores, dots, slashes, tildes, plus and at signs are allowed.",
                name
            );
        }

        validate_contained_path(Path::new(&name), "Component name")?;

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComponentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dependency as reported by the dependency lister, before scanning
#[derive(Debug, Clone, PartialEq)]
pub struct Dependency {
    name: ComponentName,
    /// Empty for the module under development or a local replacement
    version: String,
    /// Local source directory, absent when the sources were never downloaded
    dir: Option<PathBuf>,
}

impl Dependency {
    pub fn new(name: String, version: String, dir: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            name: ComponentName::new(name)?,
            version,
            dir: dir.filter(|d| !d.as_os_str().is_empty()),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn component_name(&self) -> &ComponentName {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

/// A scanned dependency with its license findings, ordered by path
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    name: ComponentName,
    version: String,
    root: PathBuf,
    findings: Vec<Finding>,
}

impl Component {
    pub fn new(name: ComponentName, version: String, root: PathBuf, findings: Vec<Finding>) -> Self {
        Self {
            name,
            version,
            root,
            findings,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_name_module_path() {
        let name = ComponentName::new("github.com/acme/widget".to_string()).unwrap();
        assert_eq!(name.as_str(), "github.com/acme/widget");
        assert_eq!(format!("{}", name), "github.com/acme/widget");
    }

    #[test]
    fn test_component_name_empty() {
        assert!(ComponentName::new(String::new()).is_err());
    }

    #[test]
    fn test_component_name_rejects_traversal() {
        let result = ComponentName::new("github.com/../../etc".to_string());
        assert!(result.unwrap_err().to_string().contains("'..'"));
    }

    #[test]
    fn test_component_name_rejects_absolute() {
        assert!(ComponentName::new("/etc/passwd".to_string()).is_err());
    }

    #[test]
    fn test_component_name_rejects_separators_and_spaces() {
        assert!(ComponentName::new("lib a".to_string()).is_err());
        assert!(ComponentName::new("lib,a".to_string()).is_err());
        assert!(ComponentName::new("lib\\a".to_string()).is_err());
    }

    #[test]
    fn test_component_name_too_long() {
        let result = ComponentName::new("a".repeat(MAX_COMPONENT_NAME_LENGTH + 1));
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_dependency_empty_dir_is_absent() {
        let dep = Dependency::new("lib-a".to_string(), "v1.0.0".to_string(), Some(PathBuf::new()))
            .unwrap();
        assert!(dep.dir().is_none());
        assert_eq!(dep.version(), "v1.0.0");
    }

    #[test]
    fn test_dependency_keeps_dir() {
        let dep = Dependency::new(
            "lib-a".to_string(),
            String::new(),
            Some(PathBuf::from("/mod/lib-a")),
        )
        .unwrap();
        assert_eq!(dep.dir(), Some(Path::new("/mod/lib-a")));
        assert_eq!(dep.version(), "");
        assert_eq!(dep.name(), "lib-a");
    }
}
