use crate::compliance::domain::LicenseFamily;
use crate::shared::Result;
use std::path::Path;

/// Result of classifying one license file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseMatch {
    pub license_id: String,
    pub family: LicenseFamily,
}

impl LicenseMatch {
    pub fn new(license_id: impl Into<String>, family: LicenseFamily) -> Self {
        Self {
            license_id: license_id.into(),
            family,
        }
    }
}

/// LicenseClassifier port for identifying the license in a file
///
/// Kept deliberately narrow so that scanning can be exercised with a fake.
pub trait LicenseClassifier {
    /// Identifies the license text stored at `path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or matches no known license.
    /// Scanners treat that as "not a license file" and move on.
    fn identify(&self, path: &Path) -> Result<LicenseMatch>;
}
