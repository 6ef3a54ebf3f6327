use crate::compliance::domain::Dependency;
use crate::shared::Result;
use std::cell::RefCell;

/// Upper bound on `--exclude` patterns
const MAX_EXCLUDE_PATTERNS: usize = 64;

const MAX_PATTERN_LENGTH: usize = 255;

/// ComponentFilter - drops dependencies whose name matches an exclusion pattern
///
/// `*` matches zero or more characters, anything else matches literally.
/// Matching is case-sensitive. Module paths contain slashes, so
/// `github.com/acme/*` excludes every module published by `acme`.
#[derive(Debug)]
pub struct ComponentFilter {
    patterns: Vec<ExcludePattern>,
}

impl ComponentFilter {
    /// # Errors
    /// - More than `MAX_EXCLUDE_PATTERNS` patterns
    /// - A pattern that is empty, too long, only wildcards, or uses
    ///   characters a module path cannot contain
    pub fn new(patterns: Vec<String>) -> Result<Self> {
        if patterns.len() > MAX_EXCLUDE_PATTERNS {
            anyhow::bail!(
                "Too many exclusion patterns: {} (maximum: {})",
                patterns.len(),
                MAX_EXCLUDE_PATTERNS
            );
        }

        let patterns = patterns
            .into_iter()
            .map(ExcludePattern::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Keeps the dependencies that match no pattern, preserving order
    pub fn filter_dependencies(&self, dependencies: Vec<Dependency>) -> Vec<Dependency> {
        dependencies
            .into_iter()
            .filter(|dep| !self.matches(dep.name()))
            .collect()
    }

    pub fn matches(&self, component: &str) -> bool {
        // No short-circuit: every pattern records whether it matched.
        self.patterns
            .iter()
            .fold(false, |hit, p| p.matches(component) || hit)
    }

    /// Patterns that matched nothing so far
    pub fn get_unmatched_patterns(&self) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|p| !*p.matched.borrow())
            .map(|p| p.original.clone())
            .collect()
    }
}

#[derive(Debug)]
struct ExcludePattern {
    original: String,
    matcher: PatternMatcher,
    matched: RefCell<bool>,
}

impl ExcludePattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;
        let matcher = PatternMatcher::compile(&pattern);

        Ok(Self {
            original: pattern,
            matcher,
            matched: RefCell::new(false),
        })
    }

    fn matches(&self, component: &str) -> bool {
        let is_match = self.matcher.matches(component);
        if is_match {
            *self.matched.borrow_mut() = true;
        }
        is_match
    }
}

#[derive(Debug)]
enum PatternMatcher {
    /// `github.com/acme/widget`
    Exact(String),
    /// `*/internal`
    EndsWith(String),
    /// `github.com/acme/*`
    StartsWith(String),
    /// `*yaml*`
    Contains(String),
    /// `golang.org/*/x*`: anchored first part, anchored last part, ordered middle
    Segments(Vec<String>),
}

impl PatternMatcher {
    fn compile(pattern: &str) -> Self {
        let starts_wild = pattern.starts_with('*');
        let ends_wild = pattern.ends_with('*');
        let parts: Vec<String> = pattern
            .split('*')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        match (pattern.matches('*').count(), starts_wild, ends_wild) {
            (0, _, _) => PatternMatcher::Exact(pattern.to_string()),
            (1, true, false) => PatternMatcher::EndsWith(parts[0].clone()),
            (1, false, true) => PatternMatcher::StartsWith(parts[0].clone()),
            (2, true, true) if parts.len() == 1 => PatternMatcher::Contains(parts[0].clone()),
            _ => {
                let mut segments = Vec::with_capacity(parts.len() + 2);
                segments.push(if starts_wild { String::new() } else { parts[0].clone() });
                let middle_start = usize::from(!starts_wild);
                let middle_end = parts.len() - usize::from(!ends_wild);
                segments.extend(parts[middle_start.min(middle_end)..middle_end].iter().cloned());
                segments.push(if ends_wild {
                    String::new()
                } else {
                    parts[parts.len() - 1].clone()
                });
                PatternMatcher::Segments(segments)
            }
        }
    }

    fn matches(&self, component: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => component == s,
            PatternMatcher::EndsWith(suffix) => component.ends_with(suffix.as_str()),
            PatternMatcher::StartsWith(prefix) => component.starts_with(prefix.as_str()),
            PatternMatcher::Contains(middle) => component.contains(middle.as_str()),
            PatternMatcher::Segments(segments) => {
                let (first, rest) = match segments.split_first() {
                    Some(split) => split,
                    None => return false,
                };
                let (last, middle) = match rest.split_last() {
                    Some(split) => split,
                    None => return false,
                };
                if component.len() < first.len() + last.len()
                    || !component.starts_with(first.as_str())
                    || !component.ends_with(last.as_str())
                {
                    return false;
                }
                let mut remaining = &component[first.len()..component.len() - last.len()];
                for part in middle {
                    match remaining.find(part.as_str()) {
                        Some(pos) => remaining = &remaining[pos + part.len()..],
                        None => return false,
                    }
                }
                true
            }
        }
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("Exclusion pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Exclusion pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if let Some(ch) = pattern.chars().find(|c| !is_valid_pattern_char(*c)) {
        anyhow::bail!(
            "Exclusion pattern contains invalid character '{}' in pattern '{}'. \
             Only alphanumeric, hyphens, underscores, dots, slashes, tildes, plus and at signs, and asterisks (*) are allowed.",
            ch,
            pattern
        );
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!(
            "Exclusion pattern cannot contain only wildcards: '{}'",
            pattern
        );
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '~' | '+' | '@' | '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(name: &str) -> Dependency {
        Dependency::new(name.to_string(), "v1.0.0".to_string(), None).unwrap()
    }

    #[test]
    fn test_exact_match() {
        let filter = ComponentFilter::new(vec!["github.com/acme/widget".to_string()]).unwrap();
        assert!(filter.matches("github.com/acme/widget"));
        assert!(!filter.matches("github.com/acme/widget/v2"));
    }

    #[test]
    fn test_prefix_pattern_excludes_organisation() {
        let filter = ComponentFilter::new(vec!["github.com/acme/*".to_string()]).unwrap();
        assert!(filter.matches("github.com/acme/widget"));
        assert!(filter.matches("github.com/acme/gadget/v3"));
        assert!(!filter.matches("github.com/other/widget"));
    }

    #[test]
    fn test_suffix_pattern() {
        let filter = ComponentFilter::new(vec!["*/internal".to_string()]).unwrap();
        assert!(filter.matches("example.com/x/internal"));
        assert!(!filter.matches("example.com/internal/x"));
    }

    #[test]
    fn test_contains_pattern() {
        let filter = ComponentFilter::new(vec!["*yaml*".to_string()]).unwrap();
        assert!(filter.matches("gopkg.in/yaml.v3"));
        assert!(filter.matches("sigs.k8s.io/yaml"));
        assert!(!filter.matches("github.com/pelletier/go-toml"));
    }

    #[test]
    fn test_inner_wildcard_is_anchored() {
        let filter = ComponentFilter::new(vec!["golang.org/*/text".to_string()]).unwrap();
        assert!(filter.matches("golang.org/x/text"));
        assert!(!filter.matches("golang.org/x/text/v2"));
        assert!(!filter.matches("example.com/golang.org/x/text"));
    }

    #[test]
    fn test_multiple_wildcards_in_order() {
        let filter = ComponentFilter::new(vec!["github.com/*/go-*".to_string()]).unwrap();
        assert!(filter.matches("github.com/pelletier/go-toml"));
        assert!(!filter.matches("github.com/pelletier/toml"));
    }

    #[test]
    fn test_case_sensitive() {
        let filter = ComponentFilter::new(vec!["github.com/BurntSushi/toml".to_string()]).unwrap();
        assert!(filter.matches("github.com/BurntSushi/toml"));
        assert!(!filter.matches("github.com/burntsushi/toml"));
    }

    #[test]
    fn test_filter_dependencies_preserves_order() {
        let filter = ComponentFilter::new(vec!["*/lib-b".to_string()]).unwrap();
        let filtered = filter.filter_dependencies(vec![
            dep("example.com/lib-a"),
            dep("example.com/lib-b"),
            dep("example.com/lib-c"),
        ]);
        let names: Vec<&str> = filtered.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["example.com/lib-a", "example.com/lib-c"]);
    }

    #[test]
    fn test_unmatched_patterns_reported() {
        let filter = ComponentFilter::new(vec![
            "example.com/*".to_string(),
            "*-missing".to_string(),
        ])
        .unwrap();
        let _ = filter.filter_dependencies(vec![dep("example.com/lib-a")]);
        assert_eq!(filter.get_unmatched_patterns(), vec!["*-missing".to_string()]);
    }

    #[test]
    fn test_overlapping_patterns_both_marked_matched() {
        let filter = ComponentFilter::new(vec![
            "example.com/*".to_string(),
            "*/lib-a".to_string(),
        ])
        .unwrap();
        let _ = filter.filter_dependencies(vec![dep("example.com/lib-a")]);
        assert!(filter.get_unmatched_patterns().is_empty());
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = ComponentFilter::new(vec![]).unwrap();
        assert!(filter.is_empty());
        assert_eq!(filter.filter_dependencies(vec![dep("a.b/c")]).len(), 1);
    }

    #[test]
    fn test_validation_errors() {
        let too_long = ComponentFilter::new(vec!["a".repeat(256)]).unwrap_err();
        assert!(too_long.to_string().contains("too long"));
        assert!(ComponentFilter::new(vec!["a".repeat(255)]).is_ok());

        let invalid = ComponentFilter::new(vec!["pkg name".to_string()]).unwrap_err();
        assert!(invalid.to_string().contains("invalid character"));

        let empty = ComponentFilter::new(vec![String::new()]).unwrap_err();
        assert!(empty.to_string().contains("cannot be empty"));

        let wild = ComponentFilter::new(vec!["**".to_string()]).unwrap_err();
        assert!(wild.to_string().contains("only wildcards"));
    }

    #[test]
    fn test_pattern_count_boundary() {
        let ok: Vec<String> = (0..64).map(|i| format!("p{}", i)).collect();
        assert!(ComponentFilter::new(ok).is_ok());
        let too_many: Vec<String> = (0..65).map(|i| format!("p{}", i)).collect();
        assert!(ComponentFilter::new(too_many)
            .unwrap_err()
            .to_string()
            .contains("Too many"));
    }
}
