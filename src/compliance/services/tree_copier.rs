use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Directory never copied out of a component
const SKIPPED_DIR: &str = ".git";

/// TreeCopier - copies component files into the destination tree
///
/// Module caches are often read-only, so copies gain owner read/write on
/// files and owner read/write/execute on directories.
pub struct TreeCopier;

impl TreeCopier {
    /// Recursively copies `src` into `dst`, skipping `.git`
    ///
    /// Entries are copied in file-name order. Symbolic links are recreated as
    /// links, not followed. When `dst` lies inside `src`, the directory
    /// holding `dst` is not copied into itself.
    pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
        create_dir(dst)?;

        let src = src
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", src.display()))?;
        let dst_canonical = dst
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", dst.display()))?;
        let nested_dst = dst_canonical.starts_with(&src).then_some(dst_canonical.as_path());

        copy_dir(&src, dst, nested_dst)
    }

    /// Copies one file, creating parent directories as needed
    pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
        if let Some(parent) = dst.parent() {
            create_dir(parent)?;
        }
        fs::copy(src, dst)
            .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
        add_owner_permissions(dst, 0o600)
    }
}

fn copy_dir(src: &Path, dst: &Path, nested_dst: Option<&Path>) -> Result<()> {
    create_dir(dst)?;

    let mut entries = fs::read_dir(src)
        .with_context(|| format!("Failed to read directory {}", src.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("Failed to read directory {}", src.display()))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name();
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        let target = dst.join(&name);

        if file_type.is_dir() {
            if name == SKIPPED_DIR || nested_dst.is_some_and(|d| d.starts_with(&path)) {
                continue;
            }
            copy_dir(&path, &target, nested_dst)?;
        } else if file_type.is_symlink() {
            copy_symlink(&path, &target)?;
        } else {
            TreeCopier::copy_file(&path, &target)?;
        }
    }

    Ok(())
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    add_owner_permissions(dir, 0o700)
}

#[cfg(unix)]
fn add_owner_permissions(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .permissions();
    permissions.set_mode(permissions.mode() | mode);
    fs::set_permissions(path, permissions)
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn add_owner_permissions(path: &Path, _mode: u32) -> Result<()> {
    let mut permissions = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .permissions();
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let link = fs::read_link(src).with_context(|| format!("Failed to read link {}", src.display()))?;
    std::os::unix::fs::symlink(&link, dst)
        .with_context(|| format!("Failed to create link {}", dst.display()))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, _dst: &Path) -> Result<()> {
    tracing::debug!(path = %src.display(), "skipping symbolic link");
    Ok(())
}
