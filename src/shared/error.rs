use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish license problems from
/// tool failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every component resolved and its obligation was fulfilled
    Success = 0,
    /// One or more components failed scanning, were rejected, or could not be saved
    LicenseIssuesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (missing manifest, destination exists, I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::LicenseIssuesDetected => write!(f, "License Issues Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// A component together with the license it declared, used in aggregate reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedComponent {
    pub component: String,
    pub license: String,
}

impl fmt::Display for RejectedComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (license: {})", self.component, self.license)
    }
}

/// A component that could not be processed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentFailure {
    pub component: String,
    pub reason: String,
}

impl fmt::Display for ComponentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.component, self.reason)
    }
}

fn bullet_list<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| format!("  - {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Application-specific errors for license scanning and compliance.
///
/// Per-component variants always carry the component name so that a failure
/// can be traced back to the dependency that caused it.
#[derive(Debug, Error)]
pub enum ComplianceError {
    #[error("Component {component} has no local directory\n\n💡 Hint: Download the dependency sources first (e.g. `go mod download`)")]
    EmptyRoot { component: String },

    #[error("License not found for component {component} under {root}\n\n💡 Hint: Add a license override or exclude the component with --exclude")]
    LicenseNotFound { component: String, root: PathBuf },

    #[error("{} component(s) could not be scanned:\n{}", .failures.len(), bullet_list(.failures))]
    ScanFailed { failures: Vec<ComponentFailure> },

    #[error("{} component(s) have rejected licenses:\n{}\n\n💡 Hint: Review each license and add a license_overrides entry if it is acceptable", .rejected.len(), bullet_list(.rejected))]
    RejectedLicenses { rejected: Vec<RejectedComponent> },

    #[error("Compliance failed for {} component(s)\nRejected:\n{}\nFailed:\n{}", .rejected.len() + .failed.len(), bullet_list(.rejected), bullet_list(.failed))]
    DispatchFailed {
        rejected: Vec<RejectedComponent>,
        failed: Vec<ComponentFailure>,
    },

    #[error("Destination already exists: {path}\n\n💡 Hint: Use --force to replace it")]
    DestinationExists { path: PathBuf },

    #[error("Failed to parse manifest line {line}: {details}\n\n💡 Hint: Each line must be `<name>, <url or Unknown>, <license>[, <license path>]`")]
    ManifestParseError { line: usize, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    /// Validation error for domain value objects
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl ComplianceError {
    /// Whether this error reports license problems rather than a tool failure
    pub fn is_license_issue(&self) -> bool {
        matches!(
            self,
            ComplianceError::EmptyRoot { .. }
                | ComplianceError::LicenseNotFound { .. }
                | ComplianceError::ScanFailed { .. }
                | ComplianceError::RejectedLicenses { .. }
                | ComplianceError::DispatchFailed { .. }
        )
    }
}
