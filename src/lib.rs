//! depcomply - license compliance for dependency trees
//!
//! This library scans the local source trees of a project's dependencies for
//! license files, classifies them into license families, resolves the strictest
//! obligation per component, and saves the notices or full source that
//! redistribution requires. It follows hexagonal architecture.
//!
//! # Architecture
//!
//! - **Domain Layer** (`compliance`): families, components, findings, manifest rows,
//!   strictness resolution and the pure services built on them
//! - **Application Layer** (`application`): scan, check and dispatch use cases
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): Go toolchain, hosting lookups, text classification,
//!   filesystem and console
//! - **Shared** (`shared`): error types, exit codes and path safety checks
//!
//! # Example
//!
//! ```no_run
//! use depcomply::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! let use_case = ScanLicensesUseCase::new(
//!     GoModuleLister::new(),
//!     TextLicenseClassifier::default(),
//!     HostingSourceLocator::new()?,
//!     StderrProgressReporter::new(),
//! );
//!
//! let response = use_case
//!     .execute(ScanRequest::new(PathBuf::from("."), vec![]))
//!     .await?;
//! print!("{}", ManifestCodec::encode(&response.manifest_rows()));
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod compliance;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::classifier::TextLicenseClassifier;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::golang::GoModuleLister;
    pub use crate::adapters::outbound::network::HostingSourceLocator;
    pub use crate::application::dto::{
        DispatchReport, DispatchRequest, ScanRequest, ScanResponse, ScannedComponent,
    };
    pub use crate::application::use_cases::{
        CheckLicensesUseCase, DispatchComplianceUseCase, ScanLicensesUseCase,
    };
    pub use crate::compliance::domain::{
        Component, ComponentName, Dependency, Finding, LicenseFamily, ManifestRow, RemoteSource,
    };
    pub use crate::compliance::policies::{ComplianceAction, LicenseDictionary, StrictnessResolver};
    pub use crate::compliance::services::{ComponentFilter, ManifestCodec, TreeCopier, TreeScanner};
    pub use crate::ports::outbound::{
        DependencyLister, LicenseClassifier, LicenseMatch, ManifestReader, OutputPresenter,
        ProgressReporter, SourceLocator,
    };
    pub use crate::shared::Result;
}
