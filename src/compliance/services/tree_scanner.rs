use crate::compliance::domain::Finding;
use crate::ports::outbound::LicenseClassifier;
use crate::shared::error::ComplianceError;
use crate::shared::Result;
use anyhow::Context;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into: VCS metadata, vendored JS and test fixtures
pub const PRUNED_DIRS: &[&str] = &[".git", ".hg", ".svn", "node_modules", "testdata", "fixtures"];

static LICENSE_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(LICEN[CS]E(-[0-9A-Za-z.\-]+)?|COPYING(\.LESSER)?|UNLICENSE|NOTICE)(\.(txt|md|markdown|rst))?$",
    )
    .expect("license file name pattern is valid")
});

static NOTICE_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^NOTICE(\.(txt|md))?$").expect("notice file name pattern is valid")
});

/// Whether `name` is a candidate license file name (case-sensitive)
pub fn is_license_file_name(name: &str) -> bool {
    LICENSE_FILE_NAME.is_match(name)
}

/// Whether `name` is a NOTICE file shipped next to a license
pub fn is_notice_file_name(name: &str) -> bool {
    NOTICE_FILE_NAME.is_match(name)
}

fn is_pruned(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| PRUNED_DIRS.contains(&name))
}

/// TreeScanner - finds and classifies every license file under a component root
pub struct TreeScanner;

impl TreeScanner {
    /// Scans `root` and returns findings ordered by relative path
    ///
    /// Symlinks are neither followed nor classified. A candidate the
    /// classifier rejects is dropped.
    ///
    /// # Errors
    /// - `ComplianceError::EmptyRoot` if `root` is empty or not a directory
    /// - `ComplianceError::LicenseNotFound` if no candidate could be classified
    /// - an I/O error if the tree cannot be walked
    pub fn scan<C: LicenseClassifier + ?Sized>(
        component: &str,
        root: &Path,
        classifier: &C,
    ) -> Result<Vec<Finding>> {
        if root.as_os_str().is_empty() || !root.is_dir() {
            return Err(ComplianceError::EmptyRoot {
                component: component.to_string(),
            }
            .into());
        }

        let mut findings = Vec::new();
        for relative in Self::candidate_files(root)? {
            match classifier.identify(&root.join(&relative)) {
                Ok(matched) => findings.push(Finding::new(
                    matched.license_id,
                    relative,
                    matched.family,
                )),
                Err(e) => {
                    tracing::debug!(
                        component,
                        path = %relative.display(),
                        "skipping unclassifiable license candidate: {e:#}"
                    );
                }
            }
        }

        if findings.is_empty() {
            return Err(ComplianceError::LicenseNotFound {
                component: component.to_string(),
                root: root.to_path_buf(),
            }
            .into());
        }

        findings.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(findings)
    }

    /// Relative paths of every license and notice candidate under `root`,
    /// in path order
    ///
    /// Applies the same pruning as `scan`; symlinks are skipped.
    pub fn candidate_files(root: &Path) -> Result<Vec<PathBuf>> {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_pruned(e));

        let mut candidates = Vec::new();
        for entry in walker {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if !entry.file_name().to_str().is_some_and(is_license_file_name) {
                continue;
            }

            let relative = entry.path().strip_prefix(root).with_context(|| {
                format!("{} is outside {}", entry.path().display(), root.display())
            })?;
            candidates.push(relative.to_path_buf());
        }

        candidates.sort();
        Ok(candidates)
    }
}
