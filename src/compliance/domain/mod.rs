pub mod component;
pub mod finding;
pub mod license_family;
pub mod manifest_row;
pub mod remote_source;

pub use component::{Component, ComponentName, Dependency};
pub use finding::Finding;
pub use license_family::LicenseFamily;
pub use manifest_row::ManifestRow;
pub use remote_source::RemoteSource;
