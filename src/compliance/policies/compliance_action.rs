use crate::compliance::domain::LicenseFamily;
use std::fmt;

/// Obligation derived from a governing license family
///
/// Computed when a manifest row is dispatched; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceAction {
    /// Not allowed: nothing is copied and the component is reported
    Reject,
    /// Ship every license and NOTICE file of the component
    RedistributeNotice,
    /// Ship the complete component source tree
    RedistributeSource,
}

impl ComplianceAction {
    pub fn for_family(family: LicenseFamily) -> Self {
        match family {
            LicenseFamily::Unencumbered | LicenseFamily::Permissive | LicenseFamily::Notice => {
                ComplianceAction::RedistributeNotice
            }
            LicenseFamily::Reciprocal | LicenseFamily::Restricted => {
                ComplianceAction::RedistributeSource
            }
            LicenseFamily::Unknown | LicenseFamily::Forbidden => ComplianceAction::Reject,
        }
    }
}

impl fmt::Display for ComplianceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceAction::Reject => write!(f, "reject"),
            ComplianceAction::RedistributeNotice => write!(f, "redistribute notice"),
            ComplianceAction::RedistributeSource => write!(f, "redistribute source"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_families() {
        for family in [
            LicenseFamily::Unencumbered,
            LicenseFamily::Permissive,
            LicenseFamily::Notice,
        ] {
            assert_eq!(
                ComplianceAction::for_family(family),
                ComplianceAction::RedistributeNotice
            );
        }
    }

    #[test]
    fn test_source_families() {
        assert_eq!(
            ComplianceAction::for_family(LicenseFamily::Reciprocal),
            ComplianceAction::RedistributeSource
        );
        assert_eq!(
            ComplianceAction::for_family(LicenseFamily::Restricted),
            ComplianceAction::RedistributeSource
        );
    }

    #[test]
    fn test_absorbing_families_reject() {
        for family in LicenseFamily::ALL.into_iter().filter(|f| f.is_absorbing()) {
            assert_eq!(ComplianceAction::for_family(family), ComplianceAction::Reject);
        }
    }
}
