use async_trait::async_trait;
use depcomply::prelude::*;
use std::collections::HashMap;

/// Mock SourceLocator keyed by component name
pub struct MockSourceLocator {
    pub repos: HashMap<String, String>,
}

#[allow(dead_code)]
impl MockSourceLocator {
    pub fn new() -> Self {
        Self {
            repos: HashMap::new(),
        }
    }

    /// Registers a GitHub-style repository for `name`
    pub fn with_repo(mut self, name: &str, repo_url: &str) -> Self {
        self.repos.insert(name.to_string(), repo_url.to_string());
        self
    }
}

#[async_trait]
impl SourceLocator for MockSourceLocator {
    async fn locate(&self, name: &str, version: &str) -> Result<RemoteSource> {
        let repo_url = self
            .repos
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("no repository known for {}", name))?;
        Ok(RemoteSource::new(
            repo_url.clone(),
            "{repo}/blob/{commit}/{file}".to_string(),
            version.to_string(),
            String::new(),
        ))
    }
}
