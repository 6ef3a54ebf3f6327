use std::path::PathBuf;

/// DispatchReport - what a fully successful save phase produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Components whose license and notices were copied
    pub notices: Vec<String>,
    /// Components whose full source tree was copied
    pub sources: Vec<String>,
    /// Aggregated license texts
    pub licenses_file: PathBuf,
}

impl DispatchReport {
    pub fn component_count(&self) -> usize {
        self.notices.len() + self.sources.len()
    }
}
