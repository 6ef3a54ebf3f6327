use crate::compliance::domain::{Finding, LicenseFamily};
use crate::compliance::policies::LicenseDictionary;
use crate::shared::Result;

/// StrictnessResolver policy for picking the governing license of a component
///
/// A component can bundle several license files (a vendored directory under a
/// different license, for example). Compliance must satisfy the most
/// restrictive of them, so the strictest family always governs.
pub struct StrictnessResolver;

impl StrictnessResolver {
    /// Reduces a sequence of families to the strictest one
    ///
    /// The accumulator starts at `Unencumbered` and is replaced only by a
    /// strictly stricter family. `Forbidden` is the top of the order and ends
    /// the reduction as soon as it is seen.
    ///
    /// # Errors
    /// Returns an error if the sequence is empty
    pub fn resolve_families<I>(families: I) -> Result<LicenseFamily>
    where
        I: IntoIterator<Item = LicenseFamily>,
    {
        let mut seen_any = false;
        let mut governing = LicenseFamily::Unencumbered;

        for family in families {
            seen_any = true;
            if family.is_stricter_than(governing) {
                governing = family;
            }
            if governing == LicenseFamily::Forbidden {
                break;
            }
        }

        if !seen_any {
            anyhow::bail!("Cannot resolve a governing license from an empty set of findings");
        }
        Ok(governing)
    }

    /// Governing family of a component's findings
    pub fn resolve(findings: &[Finding]) -> Result<LicenseFamily> {
        Self::resolve_families(findings.iter().map(Finding::family))
    }

    /// The finding that carries the governing family
    ///
    /// Findings are ordered by path, so ties go to the shallowest, first-named file.
    pub fn governing_finding(findings: &[Finding]) -> Result<&Finding> {
        let governing = Self::resolve(findings)?;
        findings
            .iter()
            .find(|f| f.family() == governing)
            .ok_or_else(|| anyhow::anyhow!("No finding carries the governing license family"))
    }

    /// Governing family of a license expression such as `Apache-2.0 / MIT`
    ///
    /// Every alternative is mapped on its own and the strictest one governs.
    ///
    /// # Errors
    /// Returns an error if any alternative is empty
    pub fn resolve_expression(expression: &str, dictionary: &LicenseDictionary) -> Result<LicenseFamily> {
        let mut families = Vec::new();
        for part in expression.split('/') {
            let spdx_id = part.trim();
            if spdx_id.is_empty() {
                anyhow::bail!("Empty SPDX ID in {:?}", expression);
            }
            families.push(dictionary.family_of(spdx_id));
        }
        Self::resolve_families(families)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn finding(id: &str, path: &str, family: LicenseFamily) -> Finding {
        Finding::new(id.to_string(), PathBuf::from(path), family)
    }

    #[test]
    fn test_resolve_single_family() {
        assert_eq!(
            StrictnessResolver::resolve_families([LicenseFamily::Unencumbered]).unwrap(),
            LicenseFamily::Unencumbered
        );
    }

    #[test]
    fn test_resolve_picks_strictest() {
        assert_eq!(
            StrictnessResolver::resolve_families([LicenseFamily::Permissive, LicenseFamily::Restricted])
                .unwrap(),
            LicenseFamily::Restricted
        );
        assert_eq!(
            StrictnessResolver::resolve_families([LicenseFamily::Restricted, LicenseFamily::Notice])
                .unwrap(),
            LicenseFamily::Restricted
        );
    }

    #[test]
    fn test_resolve_equals_maximum_for_every_pair() {
        for a in LicenseFamily::ALL {
            for b in LicenseFamily::ALL {
                let resolved = StrictnessResolver::resolve_families([a, b]).unwrap();
                assert_eq!(resolved, a.max(b), "resolve({:?}, {:?})", a, b);
            }
        }
    }

    #[test]
    fn test_resolve_empty_is_error() {
        assert!(StrictnessResolver::resolve_families(Vec::new()).is_err());
        assert!(StrictnessResolver::resolve(&[]).is_err());
    }

    #[test]
    fn test_unknown_dominates_restricted() {
        let families = [
            LicenseFamily::Notice,
            LicenseFamily::Unknown,
            LicenseFamily::Restricted,
        ];
        assert_eq!(
            StrictnessResolver::resolve_families(families).unwrap(),
            LicenseFamily::Unknown
        );
    }

    #[test]
    fn test_forbidden_short_circuits() {
        let families = [
            LicenseFamily::Forbidden,
            LicenseFamily::Unknown,
            LicenseFamily::Notice,
        ];
        assert_eq!(
            StrictnessResolver::resolve_families(families).unwrap(),
            LicenseFamily::Forbidden
        );
    }

    #[test]
    fn test_governing_finding_is_first_strictest() {
        let findings = vec![
            finding("MIT", "LICENSE", LicenseFamily::Notice),
            finding("GPL-2.0", "third_party/a/COPYING", LicenseFamily::Restricted),
            finding("GPL-3.0", "third_party/b/COPYING", LicenseFamily::Restricted),
        ];
        let governing = StrictnessResolver::governing_finding(&findings).unwrap();
        assert_eq!(governing.license_id(), "GPL-2.0");
    }

    #[test]
    fn test_resolve_expression_alternatives_pick_strictest() {
        let dict = LicenseDictionary::new();
        assert_eq!(
            StrictnessResolver::resolve_expression("Apache-2.0 / MIT", &dict).unwrap(),
            LicenseFamily::Notice
        );
        assert_eq!(
            StrictnessResolver::resolve_expression("MIT / GPL-3.0", &dict).unwrap(),
            LicenseFamily::Restricted
        );
        assert_eq!(
            StrictnessResolver::resolve_expression("MPL-2.0/Unlicense", &dict).unwrap(),
            LicenseFamily::Reciprocal
        );
    }

    #[test]
    fn test_resolve_expression_unknown_alternative_rejects() {
        let dict = LicenseDictionary::new();
        assert_eq!(
            StrictnessResolver::resolve_expression("MIT / Unknown", &dict).unwrap(),
            LicenseFamily::Unknown
        );
    }

    #[test]
    fn test_resolve_expression_empty_alternative() {
        let dict = LicenseDictionary::new();
        let err = StrictnessResolver::resolve_expression("MIT / ", &dict).unwrap_err();
        assert!(err.to_string().contains("Empty SPDX ID"));
    }

    #[test]
    fn test_resolve_expression_uses_overrides() {
        let dict = LicenseDictionary::with_overrides(vec![(
            "GPL-3.0".to_string(),
            LicenseFamily::Notice,
        )]);
        assert_eq!(
            StrictnessResolver::resolve_expression("GPL-3.0", &dict).unwrap(),
            LicenseFamily::Notice
        );
    }
}
