// src/watch/patterns.rs

use std::fmt;

use regex::Regex;

use crate::errors::{KigoError, Result};

/// A single compiled include/exclude pattern.
///
/// Pattern syntax is deliberately tiny:
///
/// - `*` matches any sequence of characters (including `/` and nothing).
/// - `.` matches a literal dot.
/// - every other character matches itself.
///
/// A pattern must match the whole path (relative to the watch root, with
/// forward slashes), so `*.go` matches `pkg/sub/file.go` but not `main.gox`.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl Pattern {
    /// The pattern as written in the config.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The regular expression the pattern was translated into.
    pub fn regex_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, rel_path: &str) -> bool {
        self.regex.is_match(rel_path)
    }
}

/// Translate a pattern into an anchored regular expression.
///
/// Every character is escaped except `*`, which becomes `.*`.
/// `regex::escape` already turns `.` into `\.`.
pub fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2 + 6);
    out.push_str("^(?:");
    let mut buf = [0u8; 4];
    for ch in pattern.chars() {
        if ch == '*' {
            out.push_str(".*");
        } else {
            out.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
        }
    }
    out.push_str(")$");
    out
}

/// Compile one pattern. Failure is a configuration error.
pub fn compile(pattern: &str) -> Result<Pattern> {
    let regex = Regex::new(&translate(pattern)).map_err(|source| KigoError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(Pattern {
        source: pattern.to_string(),
        regex,
    })
}

/// Returns true if at least one pattern matches `rel_path`.
///
/// An empty slice never matches.
pub fn any_matches(patterns: &[Pattern], rel_path: &str) -> bool {
    patterns.iter().any(|p| p.is_match(rel_path))
}

/// An ordered, compiled list of patterns (one include or exclude list).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| compile(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Source strings, in config order.
    pub fn sources(&self) -> Vec<String> {
        self.patterns.iter().map(|p| p.source.clone()).collect()
    }

    pub fn matches(&self, rel_path: &str) -> bool {
        any_matches(&self.patterns, rel_path)
    }
}

/// Membership test for the watched set: included and not excluded.
pub fn is_watched(include: &PatternSet, exclude: &PatternSet, rel_path: &str) -> bool {
    if exclude.matches(rel_path) {
        return false;
    }
    include.matches(rel_path)
}
