/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod classifier;
pub mod console;
pub mod filesystem;
pub mod golang;
pub mod network;
