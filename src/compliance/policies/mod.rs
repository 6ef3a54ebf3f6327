mod compliance_action;
mod license_dictionary;
mod strictness;

pub use compliance_action::ComplianceAction;
pub use license_dictionary::LicenseDictionary;
pub use strictness::StrictnessResolver;
