use crate::application::dto::{DispatchReport, DispatchRequest};
use crate::compliance::domain::{Dependency, ManifestRow};
use crate::compliance::policies::{ComplianceAction, LicenseDictionary, StrictnessResolver};
use crate::compliance::services::{is_license_file_name, is_notice_file_name, TreeCopier, TreeScanner};
use crate::ports::outbound::{DependencyLister, ProgressReporter};
use crate::shared::error::{ComplianceError, ComponentFailure, RejectedComponent};
use crate::shared::Result;
use anyhow::Context;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Aggregated license texts, one section per shipped component
pub const LICENSES_FILE: &str = "licenses.txt";
/// Full source copies of reciprocal and restricted components
pub const SOURCE_DIR: &str = "src";
/// License and notice copies of notice-only components
pub const NOTICES_DIR: &str = "notices";

/// What a successfully dispatched row contributed to the destination
struct RowOutcome {
    action: ComplianceAction,
    section: String,
}

/// DispatchComplianceUseCase - fulfils the obligation of every manifest row
///
/// The governing family is re-derived from each row's license expression,
/// so a manifest edited by hand between the two phases is honoured. Rows are
/// independent: a rejected or broken row is recorded and the next row is
/// processed anyway.
///
/// # Type Parameters
/// * `DL` - DependencyLister implementation
/// * `PR` - ProgressReporter implementation
pub struct DispatchComplianceUseCase<DL, PR> {
    dependency_lister: DL,
    progress_reporter: PR,
    dictionary: LicenseDictionary,
}

impl<DL, PR> DispatchComplianceUseCase<DL, PR>
where
    DL: DependencyLister,
    PR: ProgressReporter,
{
    pub fn new(dependency_lister: DL, progress_reporter: PR, dictionary: LicenseDictionary) -> Self {
        Self {
            dependency_lister,
            progress_reporter,
            dictionary,
        }
    }

    /// Dispatches every row into `request.save_path`
    ///
    /// # Errors
    /// - `ComplianceError::DestinationExists` if the destination exists and
    ///   `force` is not set
    /// - `ComplianceError::DispatchFailed` after the full pass if any row was
    ///   rejected or failed; the destination still holds every other row
    pub fn execute(&self, request: DispatchRequest) -> Result<DispatchReport> {
        self.progress_reporter.report(&format!(
            "📖 Listing dependencies of: {}",
            request.project_path.display()
        ));
        let dependencies: HashMap<String, Dependency> = self
            .dependency_lister
            .list_dependencies(&request.project_path)?
            .into_iter()
            .map(|d| (d.name().to_string(), d))
            .collect();

        prepare_destination(&request.save_path, request.force)?;

        let total = request.rows.len();
        let mut report = DispatchReport {
            licenses_file: request.save_path.join(LICENSES_FILE),
            ..DispatchReport::default()
        };
        let mut licenses = String::new();
        let mut rejected = Vec::new();
        let mut failed = Vec::new();

        for (index, row) in request.rows.iter().enumerate() {
            self.progress_reporter
                .report_progress(index, total, Some(row.component()));

            match self.dispatch_row(row, &dependencies, &request.save_path) {
                Ok(None) => {
                    self.progress_reporter.report_error(&format!(
                        "🚫 {} rejected (license: {})",
                        row.component(),
                        row.license()
                    ));
                    rejected.push(RejectedComponent {
                        component: row.component().to_string(),
                        license: row.license().to_string(),
                    });
                }
                Ok(Some(outcome)) => {
                    licenses.push_str(&outcome.section);
                    match outcome.action {
                        ComplianceAction::RedistributeSource => {
                            report.sources.push(row.component().to_string())
                        }
                        _ => report.notices.push(row.component().to_string()),
                    }
                }
                Err(e) => {
                    let failure = ComponentFailure {
                        component: row.component().to_string(),
                        reason: format!("{:#}", e),
                    };
                    self.progress_reporter
                        .report_error(&format!("⚠️  {}", failure));
                    failed.push(failure);
                }
            }
        }
        self.progress_reporter.report_progress(total, total, None);

        fs::write(&report.licenses_file, licenses).map_err(|e| ComplianceError::FileWriteError {
            path: report.licenses_file.clone(),
            details: e.to_string(),
        })?;

        if !rejected.is_empty() || !failed.is_empty() {
            self.progress_reporter.report_completion(&format!(
                "❌ Saved {} component(s); {} rejected, {} failed",
                report.component_count(),
                rejected.len(),
                failed.len()
            ));
            return Err(ComplianceError::DispatchFailed { rejected, failed }.into());
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Saved {} component(s) to {}",
            report.component_count(),
            request.save_path.display()
        ));
        Ok(report)
    }

    /// `Ok(None)` means the row is rejected
    fn dispatch_row(
        &self,
        row: &ManifestRow,
        dependencies: &HashMap<String, Dependency>,
        save_path: &Path,
    ) -> Result<Option<RowOutcome>> {
        let family = StrictnessResolver::resolve_expression(row.license(), &self.dictionary)?;
        let action = ComplianceAction::for_family(family);
        if action == ComplianceAction::Reject {
            return Ok(None);
        }

        let dependency = dependencies
            .get(row.component())
            .ok_or_else(|| anyhow::anyhow!("not found among the project's dependencies"))?;
        let root = dependency.dir().ok_or_else(|| ComplianceError::EmptyRoot {
            component: row.component().to_string(),
        })?;

        let license_path = match row.license_path() {
            Some(path) => path.to_path_buf(),
            None => find_top_level_license(root)?,
        };
        let shipped = shipped_files(root, &license_path)?;

        match action {
            ComplianceAction::RedistributeSource => {
                let dst = save_path.join(SOURCE_DIR).join(row.component());
                TreeCopier::copy_tree(root, &dst)?;
            }
            _ => {
                let dst = save_path.join(NOTICES_DIR).join(row.component());
                for (path, _) in &shipped {
                    TreeCopier::copy_file(&root.join(path), &dst.join(path))?;
                }
            }
        }

        let texts: Vec<&str> = shipped.iter().map(|(_, text)| text.as_str()).collect();
        Ok(Some(RowOutcome {
            action,
            section: license_section(row, &texts),
        }))
    }
}

/// Removes an existing destination when forced, refuses it otherwise
fn prepare_destination(save_path: &Path, force: bool) -> Result<()> {
    match fs::symlink_metadata(save_path) {
        Ok(metadata) if force => {
            let removed = if metadata.is_dir() {
                fs::remove_dir_all(save_path)
            } else {
                fs::remove_file(save_path)
            };
            removed.with_context(|| format!("Failed to remove {}", save_path.display()))?;
        }
        Ok(_) => {
            return Err(ComplianceError::DestinationExists {
                path: save_path.to_path_buf(),
            }
            .into())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to inspect destination {}", save_path.display())))
        }
    }

    fs::create_dir_all(save_path).map_err(|e| ComplianceError::FileWriteError {
        path: save_path.to_path_buf(),
        details: e.to_string(),
    })?;
    Ok(())
}

/// First license file directly under the component root, by name
fn find_top_level_license(root: &Path) -> Result<PathBuf> {
    let mut names: Vec<String> = fs::read_dir(root)
        .with_context(|| format!("Failed to read directory {}", root.display()))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_license_file_name(name) && !is_notice_file_name(name))
        .collect();
    names.sort();

    names
        .into_iter()
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("license file not found in {}", root.display()))
}

/// Every license and notice file of a component with its contents
///
/// The governing license comes first, then the remaining candidates in path
/// order.
fn shipped_files(root: &Path, license_path: &Path) -> Result<Vec<(PathBuf, String)>> {
    let others = TreeScanner::candidate_files(root)?
        .into_iter()
        .filter(|path| path != license_path);

    std::iter::once(license_path.to_path_buf())
        .chain(others)
        .map(|path| {
            let text = read_text(&root.join(&path))?;
            Ok((path, text))
        })
        .collect()
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// One `licenses.txt` section
fn license_section(row: &ManifestRow, texts: &[&str]) -> String {
    let mut section = format!("============= {} =============\n", row.component());
    if let Some(url) = row.url() {
        section.push_str(url);
        section.push('\n');
    }
    section.push('\n');

    for text in texts {
        section.push_str(text);
        if !text.ends_with('\n') {
            section.push('\n');
        }
    }
    section.push('\n');
    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::domain::ComponentName;

    fn row(name: &str, license: &str, url: Option<&str>) -> ManifestRow {
        ManifestRow::new(
            ComponentName::new(name.to_string()).unwrap(),
            license.to_string(),
            url.map(str::to_string),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_license_section_with_url_and_notice() {
        let section = license_section(
            &row("example.com/a", "Apache-2.0", Some("https://example.com/a/LICENSE")),
            &["Apache License", "Acme NOTICE\n"],
        );
        assert_eq!(
            section,
            "============= example.com/a =============\n\
             https://example.com/a/LICENSE\n\
             \n\
             Apache License\n\
             Acme NOTICE\n\
             \n"
        );
    }

    #[test]
    fn test_license_section_without_url() {
        let section = license_section(&row("example.com/a", "MIT", None), &["MIT text\n"]);
        assert_eq!(section, "============= example.com/a =============\n\nMIT text\n\n");
    }

    #[test]
    fn test_find_top_level_license_prefers_license_over_notice() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("NOTICE"), "n").unwrap();
        fs::write(dir.path().join("LICENSE"), "l").unwrap();
        fs::write(dir.path().join("README"), "r").unwrap();
        assert_eq!(find_top_level_license(dir.path()).unwrap(), PathBuf::from("LICENSE"));
    }

    #[test]
    fn test_find_top_level_license_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/LICENSE"), "l").unwrap();
        assert!(find_top_level_license(dir.path()).is_err());
    }

    #[test]
    fn test_shipped_files_puts_governing_license_first() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("third_party/x")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules/y")).unwrap();
        fs::write(dir.path().join("LICENSE"), "MIT").unwrap();
        fs::write(dir.path().join("NOTICE"), "root notice").unwrap();
        fs::write(dir.path().join("third_party/x/LICENSE"), "BSD").unwrap();
        fs::write(dir.path().join("node_modules/y/LICENSE"), "ISC").unwrap();

        let shipped = shipped_files(dir.path(), Path::new("third_party/x/LICENSE")).unwrap();
        assert_eq!(
            shipped,
            vec![
                (PathBuf::from("third_party/x/LICENSE"), "BSD".to_string()),
                (PathBuf::from("LICENSE"), "MIT".to_string()),
                (PathBuf::from("NOTICE"), "root notice".to_string()),
            ]
        );
    }

    #[test]
    fn test_prepare_destination_reports_uninspectable_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("licenses.csv");
        fs::write(&file, "x").unwrap();

        let err = prepare_destination(&file.join("out"), false).unwrap_err();
        assert!(err.to_string().contains("Failed to inspect destination"));
        assert!(err.downcast_ref::<ComplianceError>().is_none());
    }

    #[test]
    fn test_prepare_destination_refuses_existing() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = prepare_destination(dir.path(), false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComplianceError>(),
            Some(ComplianceError::DestinationExists { .. })
        ));
    }

    #[test]
    fn test_prepare_destination_force_clears() {
        let dir = tempfile::TempDir::new().unwrap();
        let dest = dir.path().join("out");
        fs::create_dir_all(dest.join("old")).unwrap();
        fs::write(dest.join("old/file"), "stale").unwrap();

        prepare_destination(&dest, true).unwrap();
        assert!(dest.is_dir());
        assert!(!dest.join("old").exists());
    }
}
