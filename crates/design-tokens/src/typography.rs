//! Font family stacks

use crate::error::{Result, TokenError};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::debug;

/// CSS generic families a stack may end with
pub const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "math",
    "emoji",
];

/// An ordered font stack ending in a generic family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontStack {
    /// Preferred font family
    pub primary: String,
    /// Fallbacks in order; the last one is a generic family
    pub fallbacks: Vec<String>,
}

impl FontStack {
    /// Build a stack from its ordered family names
    ///
    /// `family` names the stack in error messages (e.g. `heading`).
    pub fn from_families(family: &str, names: &[String]) -> Result<Self> {
        let Some((last, _)) = names.split_last() else {
            return Err(TokenError::MissingFontFallback {
                family: family.to_string(),
            });
        };

        if let Some(index) = names.iter().position(|n| n.trim().is_empty()) {
            return Err(TokenError::InvalidFontStack {
                family: family.to_string(),
                reason: format!("entry {index} is empty"),
            });
        }

        if !is_generic_family(last) {
            return Err(TokenError::MissingFontFallback {
                family: family.to_string(),
            });
        }

        let mut names = names.iter().map(|n| {
            let n = n.trim();
            if is_generic_family(n) {
                n.to_ascii_lowercase()
            } else {
                n.to_string()
            }
        });
        let primary = names.next().unwrap_or_default();
        Ok(Self {
            primary,
            fallbacks: names.collect(),
        })
    }

    /// All families in order
    pub fn families(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.fallbacks.iter().map(String::as_str))
    }

    /// The generic family the stack ends with
    pub fn generic(&self) -> &str {
        self.fallbacks.last().unwrap_or(&self.primary)
    }

    /// Get the CSS font-family string
    ///
    /// Names that are not plain identifiers are quoted, with `"` and `\`
    /// escaped; generic families never are.
    pub fn to_css(&self) -> String {
        self.families()
            .map(|f| {
                if is_generic_family(f) || is_plain_identifier(f) {
                    f.to_string()
                } else {
                    format!("\"{}\"", f.replace('\\', "\\\\").replace('"', "\\\""))
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Serialize for FontStack {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.families())
    }
}

/// Generic family keywords match case-insensitively
fn is_generic_family(name: &str) -> bool {
    let name = name.trim();
    GENERIC_FAMILIES.iter().any(|g| g.eq_ignore_ascii_case(name))
}

fn is_plain_identifier(name: &str) -> bool {
    name.chars().next().is_some_and(|c| !c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Resolve every font family in a seed
pub fn resolve_font_families(
    seed: &BTreeMap<String, Vec<String>>,
) -> Result<BTreeMap<String, FontStack>> {
    let families = seed
        .iter()
        .map(|(family, names)| FontStack::from_families(family, names).map(|s| (family.clone(), s)))
        .collect::<Result<BTreeMap<_, _>>>()?;

    debug!(families = families.len(), "Resolved font families");
    Ok(families)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_stack_from_families() {
        let stack = FontStack::from_families("sans", &names(&["Assistant", "system-ui", "sans-serif"])).unwrap();
        assert_eq!(stack.primary, "Assistant");
        assert_eq!(stack.fallbacks, names(&["system-ui", "sans-serif"]));
        assert_eq!(stack.generic(), "sans-serif");
    }

    #[test]
    fn test_generic_only_stack() {
        let stack = FontStack::from_families("mono", &names(&["monospace"])).unwrap();
        assert_eq!(stack.generic(), "monospace");
        assert_eq!(stack.to_css(), "monospace");
    }

    #[test]
    fn test_missing_generic_fallback() {
        let err = FontStack::from_families("heading", &names(&["Frank Ruhl Libre", "Georgia"])).unwrap_err();
        assert!(matches!(err, TokenError::MissingFontFallback { ref family } if family == "heading"));
    }

    #[test]
    fn test_empty_stack() {
        let err = FontStack::from_families("sans", &[]).unwrap_err();
        assert!(matches!(err, TokenError::MissingFontFallback { .. }));
    }

    #[test]
    fn test_blank_entry() {
        let err = FontStack::from_families("sans", &names(&["Assistant", " ", "sans-serif"])).unwrap_err();
        assert!(matches!(err, TokenError::InvalidFontStack { .. }));
    }

    #[test]
    fn test_to_css_quotes_names_with_spaces() {
        let stack = FontStack::from_families("serif", &names(&["Frank Ruhl Libre", "Georgia", "serif"])).unwrap();
        assert_eq!(stack.to_css(), "\"Frank Ruhl Libre\", Georgia, serif");
    }

    #[test]
    fn test_generic_family_case_insensitive() {
        let stack = FontStack::from_families("sans", &names(&["Assistant", "Sans-Serif"])).unwrap();
        assert_eq!(stack.generic(), "sans-serif");
        assert_eq!(stack.to_css(), "Assistant, sans-serif");
    }

    #[test]
    fn test_to_css_escapes_quotes_and_commas() {
        let stack = FontStack::from_families(
            "display",
            &names(&["My \"Bold\" Face", "Acme,Inc", "3Dumb", "serif"]),
        )
        .unwrap();
        assert_eq!(
            stack.to_css(),
            "\"My \\\"Bold\\\" Face\", \"Acme,Inc\", \"3Dumb\", serif"
        );
    }

    #[test]
    fn test_resolve_font_families_serializes_as_lists() {
        let mut seed = BTreeMap::new();
        seed.insert("sans".to_string(), names(&["Assistant", "sans-serif"]));
        let families = resolve_font_families(&seed).unwrap();
        assert_eq!(
            serde_json::to_string(&families).unwrap(),
            r#"{"sans":["Assistant","sans-serif"]}"#
        );
    }
}
