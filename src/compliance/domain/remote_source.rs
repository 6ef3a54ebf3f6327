use std::path::Path;

/// Public hosting location of one component at one revision
///
/// `file_template` uses the placeholders `{repo}`, `{commit}` and `{file}`,
/// e.g. `{repo}/blob/{commit}/{file}` for GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSource {
    repo_url: String,
    file_template: String,
    commit: String,
    /// Directory of the component inside the repository, empty at the root
    subdir: String,
}

impl RemoteSource {
    pub fn new(repo_url: String, file_template: String, commit: String, subdir: String) -> Self {
        Self {
            repo_url: repo_url.trim_end_matches('/').to_string(),
            file_template,
            commit,
            subdir: subdir.trim_matches('/').to_string(),
        }
    }

    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    pub fn commit(&self) -> &str {
        &self.commit
    }

    pub fn subdir(&self) -> &str {
        &self.subdir
    }

    /// Public URL of a file given by its path relative to the component root
    ///
    /// Returns `None` when no template is known for the host or the path is empty.
    pub fn file_url(&self, relative_path: &Path) -> Option<String> {
        if self.file_template.is_empty() || self.repo_url.is_empty() {
            return None;
        }

        let segments: Vec<String> = relative_path
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .filter(|s| !s.is_empty() && *s != ".")
            .map(|s| urlencoding::encode(s).into_owned())
            .collect();
        if segments.is_empty() {
            return None;
        }

        let file = if self.subdir.is_empty() {
            segments.join("/")
        } else {
            format!("{}/{}", self.subdir, segments.join("/"))
        };

        Some(
            self.file_template
                .replace("{repo}", &self.repo_url)
                .replace("{commit}", &self.commit)
                .replace("{file}", &file),
        )
    }
}
