use crate::shared::Result;
use std::fs;
use std::path::{Component, Path};

/// Maximum manifest file size (10 MB)
pub const MAX_MANIFEST_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum license file size read by the classifier (1 MB)
pub const MAX_LICENSE_FILE_SIZE: u64 = 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Security
/// Uses `symlink_metadata()` so that the link itself is checked, not its target.
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Validates that a path taken from untrusted input stays inside its base directory
///
/// Component names and manifest license paths are joined onto the destination
/// or the component root, so they must be relative and free of `..`.
///
/// # Errors
/// Returns an error if the path is empty, absolute, or contains a parent or
/// prefix component
pub fn validate_contained_path(relative: &Path, description: &str) -> Result<()> {
    if relative.as_os_str().is_empty() {
        anyhow::bail!("{} cannot be empty", description);
    }

    for component in relative.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => anyhow::bail!(
                "Security: {} '{}' contains '..' which is not allowed",
                description,
                relative.display()
            ),
            Component::RootDir | Component::Prefix(_) => anyhow::bail!(
                "Security: {} '{}' must be a relative path",
                description,
                relative.display()
            ),
        }
    }

    Ok(())
}
