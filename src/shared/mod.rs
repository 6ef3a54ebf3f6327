/// Shared utilities used across layers
pub mod error;
mod result;
pub mod security;

pub use result::Result;
