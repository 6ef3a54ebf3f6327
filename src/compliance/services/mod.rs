mod component_filter;
mod manifest_codec;
mod tree_copier;
mod tree_scanner;

pub use component_filter::ComponentFilter;
pub use manifest_codec::{ManifestCodec, FIELD_SEPARATOR, UNKNOWN_URL};
pub use tree_copier::TreeCopier;
pub use tree_scanner::{is_license_file_name, is_notice_file_name, TreeScanner, PRUNED_DIRS};
