/// Use cases module containing application business logic orchestration
mod check_licenses;
mod dispatch_compliance;
mod scan_licenses;

pub use check_licenses::CheckLicensesUseCase;
pub use dispatch_compliance::{DispatchComplianceUseCase, LICENSES_FILE, NOTICES_DIR, SOURCE_DIR};
pub use scan_licenses::ScanLicensesUseCase;
