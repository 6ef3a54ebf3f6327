use crate::compliance::domain::{Component, LicenseFamily, ManifestRow};
use crate::shared::error::{ComponentFailure, RejectedComponent};

/// A successfully scanned component and the license that governs it
#[derive(Debug, Clone)]
pub struct ScannedComponent {
    pub component: Component,
    pub governing_family: LicenseFamily,
    pub row: ManifestRow,
}

impl ScannedComponent {
    pub fn is_rejected(&self) -> bool {
        self.governing_family.is_absorbing()
    }
}

/// ScanResponse - outcome of scanning every dependency
///
/// Scanning never stops at the first broken component: successes and
/// failures are both kept, in dependency order.
#[derive(Debug, Clone, Default)]
pub struct ScanResponse {
    pub components: Vec<ScannedComponent>,
    pub failures: Vec<ComponentFailure>,
}

impl ScanResponse {
    pub fn new(components: Vec<ScannedComponent>, failures: Vec<ComponentFailure>) -> Self {
        Self {
            components,
            failures,
        }
    }

    /// Manifest rows of the successfully scanned components
    pub fn manifest_rows(&self) -> Vec<ManifestRow> {
        self.components.iter().map(|c| c.row.clone()).collect()
    }

    /// Components whose governing family is Unknown or Forbidden
    pub fn rejected_components(&self) -> Vec<RejectedComponent> {
        self.components
            .iter()
            .filter(|c| c.is_rejected())
            .map(|c| {
                let license = match c.row.url() {
                    Some(url) => format!("{} ({}), {}", c.row.license(), c.governing_family, url),
                    None => format!("{} ({})", c.row.license(), c.governing_family),
                };
                RejectedComponent {
                    component: c.row.component().to_string(),
                    license,
                }
            })
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
