//! User-supplied wildcard patterns.

use globset::{Glob, GlobMatcher};

use logsweep_core::{GroupKey, RunError};

/// One compiled pattern, anchored at both ends of the file name.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The pattern as the user supplied it.
    pub source: String,
    /// Group key (pattern with wildcards stripped), also the archive name.
    pub key: GroupKey,
    matcher: GlobMatcher,
}

impl CompiledPattern {
    /// Whether a file name matches this pattern in full.
    pub fn is_match(&self, name: &str) -> bool {
        self.matcher.is_match(name)
    }
}

/// An ordered set of compiled patterns.
///
/// Order is the order patterns were supplied; the planner resolves overlaps
/// by assigning each file to the first pattern that matches it.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    /// Compile the supplied patterns, rejecting malformed ones before any
    /// filesystem access.
    ///
    /// A pattern must leave a non-empty base name once wildcards are
    /// stripped (the base name becomes the archive name), and no two
    /// patterns may share a base name (their archives would collide).
    pub fn compile(sources: &[String]) -> Result<Self, RunError> {
        let mut patterns = Vec::with_capacity(sources.len());

        for source in sources {
            let glob = Glob::new(source)
                .map_err(|e| RunError::pattern(source.clone(), e.to_string()))?;
            let key = GroupKey::from_pattern(source);
            if key.as_str().is_empty() {
                return Err(RunError::pattern(
                    source.clone(),
                    "pattern has no literal characters to name the archive",
                ));
            }
            if patterns
                .iter()
                .any(|p: &CompiledPattern| p.key == key)
            {
                return Err(RunError::pattern(
                    source.clone(),
                    format!("archive name {:?} collides with an earlier pattern", key.as_str()),
                ));
            }
            patterns.push(CompiledPattern {
                source: source.clone(),
                key,
                matcher: glob.compile_matcher(),
            });
        }

        Ok(Self { patterns })
    }

    /// The compiled patterns, in supplied order.
    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Whether any pattern matches the file name.
    pub fn matches_any(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(name))
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(sources: &[&str]) -> PatternSet {
        let sources: Vec<String> = sources.iter().map(|s| s.to_string()).collect();
        PatternSet::compile(&sources).unwrap()
    }

    #[test]
    fn test_anchored_full_name_match() {
        let set = set(&["2024_08*"]);
        let p = &set.patterns()[0];
        assert!(p.is_match("2024_08_01_server.log"));
        assert!(p.is_match("2024_08_x"));
        assert!(!p.is_match("x2024_08_01.log"));
        assert!(!p.is_match("2024_07_31.log"));
    }

    #[test]
    fn test_literal_pattern_matches_exactly() {
        let set = set(&["audit.log"]);
        let p = &set.patterns()[0];
        assert!(p.is_match("audit.log"));
        assert!(!p.is_match("audit.log.1"));
    }

    #[test]
    fn test_order_is_preserved() {
        let set = set(&["2024_08*", "2024_08_01*"]);
        assert_eq!(set.patterns()[0].source, "2024_08*");
        assert_eq!(set.patterns()[1].source, "2024_08_01*");
    }

    #[test]
    fn test_malformed_pattern_rejected() {
        let err = PatternSet::compile(&["[oops".to_string()]).unwrap_err();
        assert!(matches!(err, RunError::Pattern { .. }));
    }

    #[test]
    fn test_wildcard_only_pattern_rejected() {
        let err = PatternSet::compile(&["*".to_string()]).unwrap_err();
        assert!(matches!(err, RunError::Pattern { .. }));
    }

    #[test]
    fn test_colliding_archive_names_rejected() {
        let err =
            PatternSet::compile(&["foo*".to_string(), "foo?".to_string()]).unwrap_err();
        assert!(matches!(err, RunError::Pattern { .. }));
    }
}
