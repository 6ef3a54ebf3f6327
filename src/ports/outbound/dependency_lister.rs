use crate::compliance::domain::Dependency;
use crate::shared::Result;
use std::path::Path;

/// DependencyLister port for enumerating the resolved dependencies of a project
///
/// Implementations ask the project's build tool for the full dependency set,
/// including where each dependency lives on disk.
pub trait DependencyLister {
    /// Lists every resolved dependency of the project at `project_path`
    ///
    /// The main module is reported too, with an empty version. Order is the
    /// build tool's order and is preserved by callers.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The build tool cannot be run
    /// - Its output cannot be parsed
    fn list_dependencies(&self, project_path: &Path) -> Result<Vec<Dependency>>;
}
