use crate::ports::outbound::ManifestReader;
use crate::shared::error::ComplianceError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_MANIFEST_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading manifests from the file system
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads a file after rejecting symlinks, non-regular files and
    /// anything larger than `max_size`
    fn safe_read_file(&self, path: &Path, file_type: &str, max_size: u64) -> Result<String> {
        validate_regular_file(path, file_type)?;

        let file_size = fs::metadata(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_type, e))?
            .len();
        validate_file_size(file_size, path, max_size)?;

        fs::read_to_string(path).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_type, e))
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestReader for FileSystemReader {
    fn read_manifest(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ComplianceError::FileReadError {
                path: path.to_path_buf(),
                details: "Manifest file does not exist. Generate one with `depcomply report -o <FILE>`."
                    .to_string(),
            }
            .into());
        }

        self.safe_read_file(path, "manifest", MAX_MANIFEST_SIZE)
            .map_err(|e| {
                ComplianceError::FileReadError {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                }
                .into()
            })
    }
}
