use depcomply::prelude::*;
use std::path::{Path, PathBuf};

/// Mock DependencyLister returning a fixed dependency set
pub struct MockDependencyLister {
    pub dependencies: Vec<(String, String, Option<PathBuf>)>,
    pub should_fail: bool,
}

#[allow(dead_code)]
impl MockDependencyLister {
    pub fn new() -> Self {
        Self {
            dependencies: Vec::new(),
            should_fail: false,
        }
    }

    pub fn with_dependency(mut self, name: &str, version: &str, dir: &Path) -> Self {
        self.dependencies
            .push((name.to_string(), version.to_string(), Some(dir.to_path_buf())));
        self
    }

    pub fn with_undownloaded(mut self, name: &str, version: &str) -> Self {
        self.dependencies
            .push((name.to_string(), version.to_string(), None));
        self
    }

    pub fn with_failure() -> Self {
        Self {
            dependencies: Vec::new(),
            should_fail: true,
        }
    }
}

impl DependencyLister for MockDependencyLister {
    fn list_dependencies(&self, _project_path: &Path) -> Result<Vec<Dependency>> {
        if self.should_fail {
            anyhow::bail!("Mock dependency lister failure");
        }
        self.dependencies
            .iter()
            .map(|(name, version, dir)| Dependency::new(name.clone(), version.clone(), dir.clone()))
            .collect()
    }
}
