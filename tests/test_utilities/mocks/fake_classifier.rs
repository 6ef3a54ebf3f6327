use depcomply::prelude::*;
use std::fs;
use std::path::Path;

/// Classifier that reads the SPDX identifier from the first line of the file
///
/// NOTICE files and files whose first line is `?` are unclassifiable.
pub struct FakeClassifier {
    dictionary: LicenseDictionary,
}

impl FakeClassifier {
    pub fn new() -> Self {
        Self {
            dictionary: LicenseDictionary::new(),
        }
    }
}

impl LicenseClassifier for FakeClassifier {
    fn identify(&self, path: &Path) -> Result<LicenseMatch> {
        let is_notice = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("NOTICE"));
        if is_notice {
            anyhow::bail!("{} is a notice, not a license", path.display());
        }

        let content = fs::read_to_string(path)?;
        let id = content.lines().next().unwrap_or("").trim();
        if id.is_empty() || id == "?" {
            anyhow::bail!("no license text recognised in {}", path.display());
        }
        Ok(LicenseMatch::new(id, self.dictionary.family_of(id)))
    }
}
