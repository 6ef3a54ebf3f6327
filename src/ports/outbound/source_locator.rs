use crate::compliance::domain::RemoteSource;
use crate::shared::Result;
use async_trait::async_trait;

/// SourceLocator port for finding where a component's files are published
///
/// Used only to attach public URLs to findings. A failed lookup is never
/// fatal: callers log a warning and leave the URL empty.
#[async_trait]
pub trait SourceLocator: Send + Sync {
    /// Locates the public repository of component `name` at `version`
    ///
    /// `version` is never empty; callers substitute the configured default
    /// reference first.
    ///
    /// # Errors
    /// Returns an error if the host is unsupported, the lookup times out,
    /// or the response cannot be interpreted
    async fn locate(&self, name: &str, version: &str) -> Result<RemoteSource>;
}
