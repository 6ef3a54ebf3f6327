use crate::application::dto::{ScanRequest, ScanResponse, ScannedComponent};
use crate::compliance::domain::{Component, Dependency, Finding, ManifestRow};
use crate::compliance::policies::StrictnessResolver;
use crate::compliance::services::{ComponentFilter, TreeScanner};
use crate::ports::outbound::{DependencyLister, LicenseClassifier, ProgressReporter, SourceLocator};
use crate::shared::error::{ComplianceError, ComponentFailure};
use crate::shared::Result;
use std::path::Path;

/// ScanLicensesUseCase - finds the governing license of every dependency
///
/// Components are processed one at a time in dependency order. A component
/// that cannot be scanned is recorded as a failure and the scan moves on, so
/// one run reports every broken component at once.
///
/// # Type Parameters
/// * `DL` - DependencyLister implementation
/// * `C` - LicenseClassifier implementation
/// * `SL` - SourceLocator implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanLicensesUseCase<DL, C, SL, PR> {
    dependency_lister: DL,
    classifier: C,
    source_locator: SL,
    progress_reporter: PR,
}

impl<DL, C, SL, PR> ScanLicensesUseCase<DL, C, SL, PR>
where
    DL: DependencyLister,
    C: LicenseClassifier,
    SL: SourceLocator,
    PR: ProgressReporter,
{
    pub fn new(dependency_lister: DL, classifier: C, source_locator: SL, progress_reporter: PR) -> Self {
        Self {
            dependency_lister,
            classifier,
            source_locator,
            progress_reporter,
        }
    }

    /// Scans every non-excluded dependency of the project
    ///
    /// # Errors
    /// Returns an error only when the dependency set itself cannot be
    /// obtained or every dependency is excluded. Per-component problems are
    /// reported in `ScanResponse::failures`.
    pub async fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        let dependencies = self.list_dependencies(&request.project_path)?;
        let dependencies = self.apply_exclusion_filters(dependencies, &request.exclude_patterns)?;

        let total = dependencies.len();
        let mut components = Vec::with_capacity(total);
        let mut failures = Vec::new();

        for (index, dependency) in dependencies.iter().enumerate() {
            self.progress_reporter
                .report_progress(index, total, Some(dependency.name()));

            match self.scan_component(dependency, &request.default_version).await {
                Ok(scanned) => components.push(scanned),
                Err(e) => {
                    let failure = ComponentFailure {
                        component: dependency.name().to_string(),
                        reason: failure_reason(&e),
                    };
                    self.progress_reporter
                        .report_error(&format!("⚠️  {}", failure));
                    failures.push(failure);
                }
            }
        }
        self.progress_reporter.report_progress(total, total, None);

        self.progress_reporter.report_completion(&format!(
            "✅ Scanned {} component(s): {} resolved, {} failed",
            total,
            components.len(),
            failures.len()
        ));

        Ok(ScanResponse::new(components, failures))
    }

    fn list_dependencies(&self, project_path: &Path) -> Result<Vec<Dependency>> {
        self.progress_reporter.report(&format!(
            "📖 Listing dependencies of: {}",
            project_path.display()
        ));

        let dependencies = self.dependency_lister.list_dependencies(project_path)?;

        self.progress_reporter
            .report(&format!("✅ Detected {} component(s)", dependencies.len()));
        Ok(dependencies)
    }

    fn apply_exclusion_filters(
        &self,
        dependencies: Vec<Dependency>,
        patterns: &[String],
    ) -> Result<Vec<Dependency>> {
        if patterns.is_empty() {
            return Ok(dependencies);
        }

        let filter = ComponentFilter::new(patterns.to_vec())?;
        let original_count = dependencies.len();
        let kept = filter.filter_dependencies(dependencies);

        let excluded_count = original_count - kept.len();
        if excluded_count > 0 {
            self.progress_reporter.report(&format!(
                "🚫 Excluded {} component(s) based on filters",
                excluded_count
            ));
        }

        if kept.is_empty() && original_count > 0 {
            anyhow::bail!(
                "All {} component(s) were excluded by the provided filters. \
                 The manifest would be empty. Please adjust your exclusion patterns.",
                original_count
            );
        }

        for pattern in filter.get_unmatched_patterns() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Exclude pattern '{}' did not match any dependencies.",
                pattern
            ));
        }

        Ok(kept)
    }

    async fn scan_component(&self, dependency: &Dependency, default_version: &str) -> Result<ScannedComponent> {
        let name = dependency.name();
        let root = dependency.dir().ok_or_else(|| ComplianceError::EmptyRoot {
            component: name.to_string(),
        })?;

        let findings = TreeScanner::scan(name, root, &self.classifier)?;
        let governing_family = StrictnessResolver::resolve(&findings)?;

        let version = if dependency.version().is_empty() {
            tracing::warn!(
                component = name,
                default_version,
                "component has no version, using the default reference for file URLs"
            );
            default_version
        } else {
            dependency.version()
        };
        let findings = self.attach_urls(name, version, findings).await;

        let governing = StrictnessResolver::governing_finding(&findings)?;
        let row = ManifestRow::new(
            dependency.component_name().clone(),
            governing.license_id().to_string(),
            governing.url().map(str::to_string),
            Some(governing.path().to_path_buf()),
        )?;

        let component = Component::new(
            dependency.component_name().clone(),
            dependency.version().to_string(),
            root.to_path_buf(),
            findings,
        );

        Ok(ScannedComponent {
            component,
            governing_family,
            row,
        })
    }

    /// Fills in public URLs; a failed lookup leaves every URL empty
    async fn attach_urls(&self, name: &str, version: &str, findings: Vec<Finding>) -> Vec<Finding> {
        match self.source_locator.locate(name, version).await {
            Ok(source) => findings
                .into_iter()
                .map(|f| {
                    let url = source.file_url(f.path());
                    f.with_url(url)
                })
                .collect(),
            Err(e) => {
                tracing::warn!(component = name, version, "could not locate public source: {e:#}");
                findings
            }
        }
    }
}

/// One-line reason for a per-component failure
fn failure_reason(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ComplianceError>() {
        Some(ComplianceError::EmptyRoot { .. }) => {
            "no local directory (is the module downloaded?)".to_string()
        }
        Some(ComplianceError::LicenseNotFound { root, .. }) => {
            format!("license not found under {}", root.display())
        }
        _ => format!("{:#}", error),
    }
}
