use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse license category deciding the compliance obligation
///
/// Variants are declared in increasing strictness, so the derived `Ord` is the
/// strictness order. `Unknown` and `Forbidden` sit above `Restricted`: they are
/// never the least strict member of a set and always cause rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseFamily {
    /// Public-domain style dedications (CC0, Unlicense)
    Unencumbered,
    Permissive,
    /// Attribution required (MIT, BSD, Apache-2.0)
    Notice,
    /// File-level copyleft (MPL, EPL, CDDL)
    Reciprocal,
    /// Strong copyleft (GPL, LGPL)
    Restricted,
    /// License text recognized but not mapped to a family
    Unknown,
    /// Disallowed outright (AGPL, WTFPL, non-commercial)
    Forbidden,
}

impl LicenseFamily {
    /// All families in strictness order
    pub const ALL: [LicenseFamily; 7] = [
        LicenseFamily::Unencumbered,
        LicenseFamily::Permissive,
        LicenseFamily::Notice,
        LicenseFamily::Reciprocal,
        LicenseFamily::Restricted,
        LicenseFamily::Unknown,
        LicenseFamily::Forbidden,
    ];

    /// Returns true if `self` imposes a strictly stronger obligation than `other`
    pub fn is_stricter_than(self, other: LicenseFamily) -> bool {
        self > other
    }

    /// Families that can never be redistributed
    pub fn is_absorbing(self) -> bool {
        matches!(self, LicenseFamily::Unknown | LicenseFamily::Forbidden)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LicenseFamily::Unencumbered => "unencumbered",
            LicenseFamily::Permissive => "permissive",
            LicenseFamily::Notice => "notice",
            LicenseFamily::Reciprocal => "reciprocal",
            LicenseFamily::Restricted => "restricted",
            LicenseFamily::Unknown => "unknown",
            LicenseFamily::Forbidden => "forbidden",
        }
    }
}

impl fmt::Display for LicenseFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LicenseFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        LicenseFamily::ALL
            .into_iter()
            .find(|family| family.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Invalid license type: '{}'. Expected one of: unencumbered, permissive, notice, reciprocal, restricted, unknown, forbidden",
                    s
                )
            })
    }
}
