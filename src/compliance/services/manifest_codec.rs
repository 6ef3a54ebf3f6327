use crate::compliance::domain::{ComponentName, ManifestRow};
pub use crate::compliance::domain::manifest_row::FIELD_SEPARATOR;
use crate::shared::error::ComplianceError;
use crate::shared::Result;
use std::path::PathBuf;

/// Placeholder written when a component has no public URL
pub const UNKNOWN_URL: &str = "Unknown";

/// ManifestCodec - text encoding of manifest rows
///
/// One row per line: `name, url-or-Unknown, license[, license-path]`.
/// Blank lines and lines starting with `#` are ignored on input, so a
/// hand-edited manifest may carry comments.
pub struct ManifestCodec;

impl ManifestCodec {
    pub fn encode(rows: &[ManifestRow]) -> String {
        let mut out = String::new();
        for row in rows {
            out.push_str(&Self::encode_row(row));
            out.push('\n');
        }
        out
    }

    fn encode_row(row: &ManifestRow) -> String {
        let mut fields = vec![
            row.component().to_string(),
            row.url().unwrap_or(UNKNOWN_URL).to_string(),
            row.license().to_string(),
        ];
        if let Some(path) = row.license_path() {
            let segments: Vec<String> = path
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            fields.push(segments.join("/"));
        }
        fields.join(FIELD_SEPARATOR)
    }

    /// Parses a manifest, preserving row order
    ///
    /// # Errors
    /// Returns `ComplianceError::ManifestParseError` naming the 1-based line of
    /// the first malformed row
    pub fn decode(content: &str) -> Result<Vec<ManifestRow>> {
        let mut rows = Vec::new();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let row = Self::decode_row(line).map_err(|e| ComplianceError::ManifestParseError {
                line: index + 1,
                details: format!("{:#}", e),
            })?;
            rows.push(row);
        }

        Ok(rows)
    }

    fn decode_row(line: &str) -> Result<ManifestRow> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
        if !(3..=4).contains(&fields.len()) {
            anyhow::bail!(
                "expected 3 or 4 fields separated by {:?}, found {}",
                FIELD_SEPARATOR,
                fields.len()
            );
        }

        let component = ComponentName::new(fields[0].to_string())?;
        let url = match fields[1] {
            "" | UNKNOWN_URL => None,
            url => Some(url.to_string()),
        };
        let license_path = fields
            .get(3)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        ManifestRow::new(component, fields[2].to_string(), url, license_path)
    }
}
