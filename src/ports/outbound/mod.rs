/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (build tool, file system, network, console).
pub mod dependency_lister;
pub mod license_classifier;
pub mod manifest_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod source_locator;

pub use dependency_lister::DependencyLister;
pub use license_classifier::{LicenseClassifier, LicenseMatch};
pub use manifest_reader::ManifestReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use source_locator::SourceLocator;
