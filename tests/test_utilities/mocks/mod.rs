/// Mock implementations for testing
mod fake_classifier;
mod mock_dependency_lister;
mod mock_progress_reporter;
mod mock_source_locator;

pub use fake_classifier::FakeClassifier;
pub use mock_dependency_lister::MockDependencyLister;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_source_locator::MockSourceLocator;
