use crate::shared::Result;
use std::path::Path;

/// ManifestReader port for loading a previously written compliance manifest
pub trait ManifestReader {
    /// Reads the raw manifest text
    ///
    /// # Errors
    /// Returns an error if the file is missing, is not a regular file,
    /// or exceeds the manifest size limit
    fn read_manifest(&self, path: &Path) -> Result<String>;
}
