use crate::application::dto::{ScanRequest, ScanResponse};
use crate::application::use_cases::ScanLicensesUseCase;
use crate::ports::outbound::{DependencyLister, LicenseClassifier, ProgressReporter, SourceLocator};
use crate::shared::error::{ComplianceError, RejectedComponent};
use crate::shared::Result;

/// CheckLicensesUseCase - fails when any dependency could not be shipped
///
/// Runs a full scan and collects every component whose governing family is
/// Unknown or Forbidden. A component whose license could not be found at all
/// is Unknown too, so scan failures are reported alongside.
pub struct CheckLicensesUseCase<DL, C, SL, PR> {
    scan: ScanLicensesUseCase<DL, C, SL, PR>,
}

impl<DL, C, SL, PR> CheckLicensesUseCase<DL, C, SL, PR>
where
    DL: DependencyLister,
    C: LicenseClassifier,
    SL: SourceLocator,
    PR: ProgressReporter,
{
    pub fn new(scan: ScanLicensesUseCase<DL, C, SL, PR>) -> Self {
        Self { scan }
    }

    /// # Errors
    /// `ComplianceError::RejectedLicenses` listing every violating component,
    /// or the scan's own error if dependencies could not be listed
    pub async fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        let response = self.scan.execute(request).await?;

        let mut rejected = response.rejected_components();
        rejected.extend(response.failures.iter().map(|f| RejectedComponent {
            component: f.component.clone(),
            license: format!("unknown, {}", f.reason),
        }));

        if !rejected.is_empty() {
            return Err(ComplianceError::RejectedLicenses { rejected }.into());
        }

        Ok(response)
    }
}
