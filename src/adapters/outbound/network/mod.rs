/// Network adapters for external lookups
mod hosting_locator;

pub use hosting_locator::HostingSourceLocator;
