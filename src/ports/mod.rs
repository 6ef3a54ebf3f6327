/// Ports module defining the interfaces the compliance core drives
///
/// Only outbound (driven) ports exist: the CLI calls the use cases directly.
pub mod outbound;
