/// Compliance core: license families, findings, manifest rows and the
/// policies and services that turn scanned trees into obligations.
pub mod domain;
pub mod policies;
pub mod services;
