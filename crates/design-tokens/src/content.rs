//! Content scope: the source files scanned for utility usage

use crate::error::{Result, TokenError};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Serialize, Serializer};

/// A validated, compiled set of relative glob patterns
#[derive(Debug, Clone)]
pub struct ContentScope {
    patterns: Vec<String>,
    matcher: GlobSet,
}

impl ContentScope {
    /// Patterns as written, in order
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether a project-relative path falls inside the scope
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(strip_dot(path))
    }
}

impl PartialEq for ContentScope {
    fn eq(&self, other: &Self) -> bool {
        self.patterns == other.patterns
    }
}

impl Serialize for ContentScope {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.patterns.serialize(serializer)
    }
}

fn strip_dot(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path)
}

fn is_absolute(pattern: &str) -> bool {
    let bytes = pattern.as_bytes();
    pattern.starts_with('/')
        || pattern.starts_with('\\')
        || (bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':')
}

/// Validate and compile content patterns
///
/// Patterns must be relative to the project root. A leading `./` is allowed
/// and ignored when matching. `*` stays within one path segment; only `**`
/// crosses directories.
pub fn resolve_content_scope(patterns: &[String]) -> Result<ContentScope> {
    if patterns.is_empty() {
        return Err(TokenError::EmptyContentScope);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let invalid = |reason: String| TokenError::InvalidContentPattern {
            pattern: pattern.clone(),
            reason,
        };

        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            return Err(invalid("pattern is empty".to_string()));
        }
        if is_absolute(trimmed) {
            return Err(invalid("pattern must be relative to the project root".to_string()));
        }

        let glob = GlobBuilder::new(strip_dot(trimmed))
            .literal_separator(true)
            .build()
            .map_err(|e| invalid(e.to_string()))?;
        builder.add(glob);
    }

    let matcher = builder.build().map_err(|e| TokenError::InvalidContentPattern {
        pattern: patterns.join(", "),
        reason: e.to_string(),
    })?;

    Ok(ContentScope {
        patterns: patterns.to_vec(),
        matcher,
    })
}
