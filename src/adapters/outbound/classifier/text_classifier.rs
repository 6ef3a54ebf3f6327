use crate::compliance::policies::LicenseDictionary;
use crate::ports::outbound::{LicenseClassifier, LicenseMatch};
use crate::shared::security::{validate_file_size, MAX_LICENSE_FILE_SIZE};
use crate::shared::Result;
use anyhow::Context;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static SPDX_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"SPDX-License-Identifier:\s*\(?\s*([A-Za-z0-9][A-Za-z0-9.+\-]*)")
        .expect("SPDX tag pattern is valid")
});

/// Phrase rule: every `all_of` phrase present and no `none_of` phrase present
struct TextRule {
    license_id: &'static str,
    all_of: &'static [&'static str],
    none_of: &'static [&'static str],
}

const MIT_GRANT: &str = "permission is hereby granted, free of charge, to any person obtaining a copy";
const MIT_NOTICE: &str = "the above copyright notice and this permission notice shall be included";
const ISC_GRANT: &str =
    "permission to use, copy, modify, and/or distribute this software for any purpose with or without fee";
const ISC_NOTICE: &str = "provided that the above copyright notice and this permission notice appear";
const BSD_GRANT: &str =
    "redistribution and use in source and binary forms, with or without modification, are permitted";
const BSD_ADVERTISING: &str = "all advertising materials mentioning features";
const BSD_ENDORSE: &str = "may be used to endorse or promote products";

/// Checked in order; more specific texts come before the texts they contain
const TEXT_RULES: &[TextRule] = &[
    TextRule {
        license_id: "AGPL-3.0",
        all_of: &["gnu affero general public license", "version 3"],
        none_of: &[],
    },
    TextRule {
        license_id: "LGPL-3.0",
        all_of: &["gnu lesser general public license", "version 3"],
        none_of: &[],
    },
    TextRule {
        license_id: "LGPL-2.1",
        all_of: &["gnu lesser general public license", "version 2.1"],
        none_of: &[],
    },
    TextRule {
        license_id: "LGPL-2.0",
        all_of: &["gnu library general public license"],
        none_of: &[],
    },
    TextRule {
        license_id: "GPL-3.0",
        all_of: &["gnu general public license", "version 3"],
        none_of: &[],
    },
    TextRule {
        license_id: "GPL-2.0",
        all_of: &["gnu general public license", "version 2"],
        none_of: &[],
    },
    TextRule {
        license_id: "MPL-2.0",
        all_of: &["mozilla public license", "2.0"],
        none_of: &[],
    },
    TextRule {
        license_id: "EPL-2.0",
        all_of: &["eclipse public license - v 2.0"],
        none_of: &[],
    },
    TextRule {
        license_id: "EPL-1.0",
        all_of: &["eclipse public license - v 1.0"],
        none_of: &[],
    },
    TextRule {
        license_id: "CDDL-1.0",
        all_of: &["common development and distribution license"],
        none_of: &[],
    },
    TextRule {
        license_id: "Apache-2.0",
        all_of: &["apache license", "version 2.0"],
        none_of: &[],
    },
    TextRule {
        license_id: "Unlicense",
        all_of: &["this is free and unencumbered software released into the public domain"],
        none_of: &[],
    },
    TextRule {
        license_id: "CC0-1.0",
        all_of: &["cc0 1.0 universal"],
        none_of: &[],
    },
    TextRule {
        license_id: "WTFPL",
        all_of: &["do what the fuck you want to public license"],
        none_of: &[],
    },
    TextRule {
        license_id: "BSL-1.0",
        all_of: &["boost software license"],
        none_of: &[],
    },
    TextRule {
        license_id: "ISC",
        all_of: &[ISC_GRANT, ISC_NOTICE],
        none_of: &[],
    },
    TextRule {
        license_id: "0BSD",
        all_of: &[ISC_GRANT],
        none_of: &[ISC_NOTICE],
    },
    TextRule {
        license_id: "MIT",
        all_of: &[MIT_GRANT, MIT_NOTICE],
        none_of: &[],
    },
    TextRule {
        license_id: "MIT-0",
        all_of: &[MIT_GRANT],
        none_of: &[MIT_NOTICE],
    },
    TextRule {
        license_id: "BSD-4-Clause",
        all_of: &[BSD_GRANT, BSD_ADVERTISING],
        none_of: &[],
    },
    TextRule {
        license_id: "BSD-3-Clause",
        all_of: &[BSD_GRANT, BSD_ENDORSE],
        none_of: &[],
    },
    TextRule {
        license_id: "BSD-2-Clause",
        all_of: &[BSD_GRANT],
        none_of: &[],
    },
    TextRule {
        license_id: "Zlib",
        all_of: &[
            "provided 'as-is', without any express or implied warranty",
            "altered source versions must be plainly marked",
        ],
        none_of: &[],
    },
];

/// Lowercases and collapses every whitespace run to one space
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// TextLicenseClassifier adapter identifying licenses from file contents
///
/// An explicit `SPDX-License-Identifier:` tag wins; otherwise the normalized
/// text is matched against canonical phrases of common licenses. The family
/// comes from the license dictionary, so configuration overrides apply.
pub struct TextLicenseClassifier {
    dictionary: LicenseDictionary,
}

impl TextLicenseClassifier {
    pub fn new(dictionary: LicenseDictionary) -> Self {
        Self { dictionary }
    }

    /// Identifies the license in already-loaded text
    pub fn identify_text(&self, text: &str) -> Option<LicenseMatch> {
        let license_id = identify_license_id(text)?;
        let family = self.dictionary.family_of(&license_id);
        Some(LicenseMatch::new(license_id, family))
    }
}

impl Default for TextLicenseClassifier {
    fn default() -> Self {
        Self::new(LicenseDictionary::new())
    }
}

fn identify_license_id(text: &str) -> Option<String> {
    if let Some(captures) = SPDX_TAG.captures(text) {
        return Some(captures[1].to_string());
    }

    let normalized = normalize(text);
    TEXT_RULES
        .iter()
        .find(|rule| {
            rule.all_of.iter().all(|p| normalized.contains(p))
                && !rule.none_of.iter().any(|p| normalized.contains(p))
        })
        .map(|rule| rule.license_id.to_string())
}

impl LicenseClassifier for TextLicenseClassifier {
    fn identify(&self, path: &Path) -> Result<LicenseMatch> {
        let size = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata of {}", path.display()))?
            .len();
        validate_file_size(size, path, MAX_LICENSE_FILE_SIZE)?;

        let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let text = String::from_utf8_lossy(&bytes);

        self.identify_text(&text)
            .ok_or_else(|| anyhow::anyhow!("No known license text in {}", path.display()))
    }
}
