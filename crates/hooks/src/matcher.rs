//! Matcher patterns: `*`, an exact name, `prefix*`, or `*suffix`.
//!
//! Composition only validates syntax; the downstream agent evaluates the
//! pattern against tool/trigger names at runtime. [`Matcher::matches`] exists
//! for diagnostics (`loadout hooks info`) and tests.

/// A parsed matcher pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// `*`, applies to everything.
    All,
    /// A literal name.
    Exact(String),
    /// `prefix*`.
    Prefix(String),
    /// `*suffix`.
    Suffix(String),
}

impl Matcher {
    /// Parse a pattern, returning `None` for anything outside the four
    /// supported forms (interior wildcards, multiple stars, empty).
    #[must_use]
    pub fn parse(pattern: &str) -> Option<Self> {
        if pattern.is_empty() {
            return None;
        }
        if pattern == "*" {
            return Some(Self::All);
        }

        let stars = pattern.matches('*').count();
        match stars {
            0 => Some(Self::Exact(pattern.to_string())),
            1 if pattern.ends_with('*') => {
                Some(Self::Prefix(pattern[..pattern.len() - 1].to_string()))
            },
            1 if pattern.starts_with('*') => Some(Self::Suffix(pattern[1..].to_string())),
            _ => None,
        }
    }

    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(exact) => name == exact,
            Self::Prefix(prefix) => name.starts_with(prefix),
            Self::Suffix(suffix) => name.ends_with(suffix),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_forms_parse() {
        assert_eq!(Matcher::parse("*"), Some(Matcher::All));
        assert_eq!(Matcher::parse("Bash"), Some(Matcher::Exact("Bash".into())));
        assert_eq!(Matcher::parse("mcp__*"), Some(Matcher::Prefix("mcp__".into())));
        assert_eq!(Matcher::parse("*_test"), Some(Matcher::Suffix("_test".into())));
    }

    #[test]
    fn invalid_forms_rejected() {
        assert_eq!(Matcher::parse(""), None);
        assert_eq!(Matcher::parse("a*b"), None);
        assert_eq!(Matcher::parse("**"), None);
        assert_eq!(Matcher::parse("*mid*"), None);
    }

    #[test]
    fn matching_semantics() {
        assert!(Matcher::parse("*").unwrap().matches("anything"));
        assert!(Matcher::parse("Bash").unwrap().matches("Bash"));
        assert!(!Matcher::parse("Bash").unwrap().matches("BashOutput"));
        assert!(Matcher::parse("mcp__*").unwrap().matches("mcp__github"));
        assert!(Matcher::parse("*_test").unwrap().matches("run_test"));
        assert!(!Matcher::parse("*_test").unwrap().matches("test_run"));
    }
}
