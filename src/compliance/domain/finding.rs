use crate::compliance::domain::LicenseFamily;
use std::path::{Path, PathBuf};

/// One classified license file inside a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    license_id: String,
    /// Relative to the component root
    path: PathBuf,
    family: LicenseFamily,
    url: Option<String>,
}

impl Finding {
    pub fn new(license_id: String, path: PathBuf, family: LicenseFamily) -> Self {
        Self {
            license_id,
            path,
            family,
            url: None,
        }
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url.filter(|u| !u.is_empty());
        self
    }

    pub fn license_id(&self) -> &str {
        &self.license_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn family(&self) -> LicenseFamily {
        self.family
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
