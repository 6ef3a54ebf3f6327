use crate::compliance::domain::LicenseFamily;
use std::collections::HashMap;

const UNENCUMBERED: &[&str] = &["0BSD", "CC0-1.0", "Unlicense"];

const PERMISSIVE: &[&str] = &["BlueOak-1.0.0", "MIT-0", "Unicode-3.0", "Unicode-DFS-2016"];

const NOTICE: &[&str] = &[
    "AFL-1.1",
    "AFL-1.2",
    "AFL-2.0",
    "AFL-2.1",
    "AFL-3.0",
    "Apache-1.0",
    "Apache-1.1",
    "Apache-2.0",
    "Artistic-1.0",
    "Artistic-1.0-Perl",
    "Artistic-1.0-cl8",
    "Artistic-2.0",
    "BSD-1-Clause",
    "BSD-2-Clause",
    "BSD-2-Clause-FreeBSD",
    "BSD-2-Clause-NetBSD",
    "BSD-3-Clause",
    "BSD-3-Clause-Attribution",
    "BSD-3-Clause-Clear",
    "BSD-3-Clause-LBNL",
    "BSD-4-Clause",
    "BSD-4-Clause-UC",
    "BSD-Protection",
    "BSL-1.0",
    "CC-BY-1.0",
    "CC-BY-2.0",
    "CC-BY-2.5",
    "CC-BY-3.0",
    "CC-BY-4.0",
    "FTL",
    "ISC",
    "ImageMagick",
    "Libpng",
    "Lil-1.0",
    "Linux-OpenIB",
    "LPL-1.0",
    "LPL-1.02",
    "MIT",
    "MS-PL",
    "NCSA",
    "OpenSSL",
    "PHP-3.0",
    "PHP-3.01",
    "PostgreSQL",
    "Python-2.0",
    "W3C",
    "X11",
    "Xnet",
    "Zend-2.0",
    "Zlib",
    "zlib-acknowledgement",
    "ZPL-1.1",
    "ZPL-2.0",
    "ZPL-2.1",
];

const RECIPROCAL: &[&str] = &[
    "APSL-1.0",
    "APSL-1.1",
    "APSL-1.2",
    "APSL-2.0",
    "CDDL-1.0",
    "CDDL-1.1",
    "CPL-1.0",
    "EPL-1.0",
    "EPL-2.0",
    "FreeImage",
    "IPL-1.0",
    "MPL-1.0",
    "MPL-1.1",
    "MPL-2.0",
    "Ruby",
];

const RESTRICTED: &[&str] = &[
    "BCL",
    "CC-BY-ND-1.0",
    "CC-BY-ND-2.0",
    "CC-BY-ND-2.5",
    "CC-BY-ND-3.0",
    "CC-BY-ND-4.0",
    "CC-BY-SA-1.0",
    "CC-BY-SA-2.0",
    "CC-BY-SA-2.5",
    "CC-BY-SA-3.0",
    "CC-BY-SA-4.0",
    "GPL-1.0",
    "GPL-2.0",
    "GPL-2.0-with-autoconf-exception",
    "GPL-2.0-with-bison-exception",
    "GPL-2.0-with-classpath-exception",
    "GPL-2.0-with-font-exception",
    "GPL-2.0-with-GCC-exception",
    "GPL-3.0",
    "GPL-3.0-with-autoconf-exception",
    "GPL-3.0-with-GCC-exception",
    "LGPL-2.0",
    "LGPL-2.1",
    "LGPL-3.0",
    "NPL-1.0",
    "NPL-1.1",
    "OSL-1.0",
    "OSL-1.1",
    "OSL-2.0",
    "OSL-2.1",
    "OSL-3.0",
    "QPL-1.0",
    "Sleepycat",
];

const FORBIDDEN: &[&str] = &[
    "AGPL-1.0",
    "AGPL-3.0",
    "CC-BY-NC-1.0",
    "CC-BY-NC-2.0",
    "CC-BY-NC-2.5",
    "CC-BY-NC-3.0",
    "CC-BY-NC-4.0",
    "CC-BY-NC-ND-1.0",
    "CC-BY-NC-ND-2.0",
    "CC-BY-NC-ND-2.5",
    "CC-BY-NC-ND-3.0",
    "CC-BY-NC-ND-4.0",
    "CC-BY-NC-SA-1.0",
    "CC-BY-NC-SA-2.0",
    "CC-BY-NC-SA-2.5",
    "CC-BY-NC-SA-3.0",
    "CC-BY-NC-SA-4.0",
    "Commons-Clause",
    "Facebook-2-Clause",
    "Facebook-3-Clause",
    "Facebook-Examples",
    "WTFPL",
];

const FAMILY_TABLE: [(LicenseFamily, &[&str]); 6] = [
    (LicenseFamily::Unencumbered, UNENCUMBERED),
    (LicenseFamily::Permissive, PERMISSIVE),
    (LicenseFamily::Notice, NOTICE),
    (LicenseFamily::Reciprocal, RECIPROCAL),
    (LicenseFamily::Restricted, RESTRICTED),
    (LicenseFamily::Forbidden, FORBIDDEN),
];

/// Maps SPDX identifiers to license families
///
/// The built-in table covers common SPDX identifiers; user overrides from the
/// configuration file take precedence. Identifiers missing from both map to
/// `LicenseFamily::Unknown`.
#[derive(Debug, Clone, Default)]
pub struct LicenseDictionary {
    overrides: HashMap<String, LicenseFamily>,
}

impl LicenseDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, LicenseFamily)>,
    {
        Self {
            overrides: overrides
                .into_iter()
                .map(|(id, family)| (id.trim().to_string(), family))
                .collect(),
        }
    }

    /// User override for an identifier, if any
    pub fn override_for(&self, spdx_id: &str) -> Option<LicenseFamily> {
        self.overrides.get(spdx_id.trim()).copied()
    }

    /// Family of an identifier: override first, then the built-in table
    pub fn family_of(&self, spdx_id: &str) -> LicenseFamily {
        self.override_for(spdx_id)
            .unwrap_or_else(|| builtin_family(spdx_id))
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

/// Looks up the built-in family, ignoring `-only`, `-or-later` and `+` suffixes
fn builtin_family(spdx_id: &str) -> LicenseFamily {
    let id = normalize_spdx_id(spdx_id);
    FAMILY_TABLE
        .iter()
        .find(|(_, ids)| ids.iter().any(|known| known.eq_ignore_ascii_case(id)))
        .map(|(family, _)| *family)
        .unwrap_or(LicenseFamily::Unknown)
}

fn normalize_spdx_id(spdx_id: &str) -> &str {
    let id = spdx_id.trim();
    id.strip_suffix("-only")
        .or_else(|| id.strip_suffix("-or-later"))
        .or_else(|| id.strip_suffix('+'))
        .unwrap_or(id)
}
