use crate::compliance::domain::ManifestRow;
use std::path::PathBuf;

/// DispatchRequest - input of the save phase
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    /// Rows to dispatch, in manifest order
    pub rows: Vec<ManifestRow>,
    /// Project whose dependencies provide the on-disk component trees
    pub project_path: PathBuf,
    /// Destination root; must not exist unless `force` is set
    pub save_path: PathBuf,
    /// Remove an existing destination first
    pub force: bool,
}

impl DispatchRequest {
    pub fn new(rows: Vec<ManifestRow>, project_path: PathBuf, save_path: PathBuf, force: bool) -> Self {
        Self {
            rows,
            project_path,
            save_path,
            force,
        }
    }
}
