use std::path::PathBuf;

/// Reference used in file URLs when a component has no version
pub const DEFAULT_VERSION: &str = "master";

/// ScanRequest - input of the license scan
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Directory of the project whose dependencies are scanned
    pub project_path: PathBuf,
    /// Component name patterns excluded from the scan
    pub exclude_patterns: Vec<String>,
    /// Substitute for an empty component version
    pub default_version: String,
}

impl ScanRequest {
    pub fn new(project_path: PathBuf, exclude_patterns: Vec<String>) -> Self {
        Self {
            project_path,
            exclude_patterns,
            default_version: DEFAULT_VERSION.to_string(),
        }
    }

    pub fn with_default_version(mut self, default_version: Option<String>) -> Self {
        if let Some(version) = default_version.filter(|v| !v.trim().is_empty()) {
            self.default_version = version.trim().to_string();
        }
        self
    }
}
