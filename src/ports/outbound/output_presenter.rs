use crate::shared::Result;

/// OutputPresenter port for presenting the generated manifest
///
/// Abstracts the destination (stdout or a file) of the report command.
pub trait OutputPresenter {
    /// Presents the encoded manifest
    ///
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}
