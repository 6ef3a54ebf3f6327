/// Data Transfer Objects for application layer
///
/// DTOs carry requests into the use cases and results back out to the CLI,
/// keeping the compliance core isolated from argument parsing and output.
mod dispatch_report;
mod dispatch_request;
mod scan_request;
mod scan_response;

pub use dispatch_report::DispatchReport;
pub use dispatch_request::DispatchRequest;
pub use scan_request::{ScanRequest, DEFAULT_VERSION};
pub use scan_response::{ScanResponse, ScannedComponent};
