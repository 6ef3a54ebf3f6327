/// Go toolchain adapters
mod module_lister;

pub use module_lister::GoModuleLister;
