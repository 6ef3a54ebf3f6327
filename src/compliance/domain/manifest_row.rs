use crate::compliance::domain::ComponentName;
use crate::shared::security::validate_contained_path;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// Separates the fields of a manifest line; no field may contain it
pub const FIELD_SEPARATOR: &str = ", ";

fn ensure_no_separator(component: &ComponentName, field: &str, value: &str) -> Result<()> {
    if value.contains(FIELD_SEPARATOR) {
        anyhow::bail!(
            "{} of component {} contains the manifest field separator {:?}: {}",
            field,
            component,
            FIELD_SEPARATOR,
            value
        );
    }
    Ok(())
}

/// One manifest line: a component and the license that governs it
///
/// The governing family is not stored; it is re-derived from `license` when
/// the row is dispatched, so a human may edit the license between phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    component: ComponentName,
    /// One identifier, or alternatives joined with `/`
    license: String,
    url: Option<String>,
    license_path: Option<PathBuf>,
}

impl ManifestRow {
    pub fn new(
        component: ComponentName,
        license: String,
        url: Option<String>,
        license_path: Option<PathBuf>,
    ) -> Result<Self> {
        let license = license.trim().to_string();
        if license.is_empty() {
            anyhow::bail!("License of component {} cannot be empty", component);
        }
        ensure_no_separator(&component, "License", &license)?;
        if let Some(url) = &url {
            ensure_no_separator(&component, "URL", url)?;
        }
        if let Some(path) = &license_path {
            validate_contained_path(path, "License path")?;
            ensure_no_separator(&component, "License path", &path.to_string_lossy())?;
        }
        Ok(Self {
            component,
            license,
            url: url.filter(|u| !u.is_empty()),
            license_path,
        })
    }

    pub fn component(&self) -> &str {
        self.component.as_str()
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn license_path(&self) -> Option<&Path> {
        self.license_path.as_deref()
    }
}
