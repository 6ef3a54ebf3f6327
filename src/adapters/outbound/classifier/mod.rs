/// License text classification
mod text_classifier;

pub use text_classifier::TextLicenseClassifier;
