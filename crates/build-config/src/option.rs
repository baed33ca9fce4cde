//! Option schema: raw option values and the recognized key set

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Option Values
// =============================================================================

/// A raw option value as written by the author
///
/// Deserializes from untyped JSON; `null` is not a valid option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean flag
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// String value
    Text(String),
    /// Ordered sequence
    List(Vec<OptionValue>),
    /// Nested record
    Record(BTreeMap<String, OptionValue>),
}

impl OptionValue {
    /// Name of the value's kind, used in shape errors
    pub fn kind(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "boolean",
            OptionValue::Number(_) => "number",
            OptionValue::Text(_) => "string",
            OptionValue::List(_) => "list",
            OptionValue::Record(_) => "record",
        }
    }

    /// Borrow as a string, if this is a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Copy out the boolean, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Number(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(values: Vec<T>) -> Self {
        OptionValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<OptionValue>> From<BTreeMap<String, T>> for OptionValue {
    fn from(values: BTreeMap<String, T>) -> Self {
        OptionValue::Record(values.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

// =============================================================================
// Recognized Keys
// =============================================================================

/// Declared shape of a recognized option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// A boolean
    Bool,
    /// A single string
    Text,
    /// An ordered sequence of strings
    TextList,
    /// A record whose values are booleans
    BoolRecord,
}

impl ValueShape {
    /// Human-readable description for error messages
    pub fn describe(&self) -> &'static str {
        match self {
            ValueShape::Bool => "boolean",
            ValueShape::Text => "string",
            ValueShape::TextList => "list of strings",
            ValueShape::BoolRecord => "record of booleans",
        }
    }
}

/// Options the resolver has a defined effect for
///
/// Declaration order is the validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    /// Locales served by the router
    Locales,
    /// Locale used when none is negotiated
    DefaultLocale,
    /// Hosts the image pipeline may fetch from
    ImageDomains,
    /// Encodings the image pipeline emits, in preference order
    ImageFormats,
    /// Remote image URLs referenced by the site
    RemoteImages,
    /// Experimental framework flags
    Experimental,
    /// Extra development-mode checks in the renderer
    ReactStrictMode,
    /// Minify output with the bundled minifier
    SwcMinify,
}

/// Nested option groups and the flat keys their members map to
const NESTED_GROUPS: &[(&str, &[(&str, OptionKey)])] = &[
    (
        "images",
        &[
            ("domains", OptionKey::ImageDomains),
            ("formats", OptionKey::ImageFormats),
        ],
    ),
    (
        "i18n",
        &[
            ("locales", OptionKey::Locales),
            ("defaultLocale", OptionKey::DefaultLocale),
        ],
    ),
];

impl OptionKey {
    /// All recognized keys in validation order
    pub const ALL: [OptionKey; 8] = [
        OptionKey::Locales,
        OptionKey::DefaultLocale,
        OptionKey::ImageDomains,
        OptionKey::ImageFormats,
        OptionKey::RemoteImages,
        OptionKey::Experimental,
        OptionKey::ReactStrictMode,
        OptionKey::SwcMinify,
    ];

    /// Flat key as written in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::Locales => "locales",
            OptionKey::DefaultLocale => "defaultLocale",
            OptionKey::ImageDomains => "imageDomains",
            OptionKey::ImageFormats => "imageFormats",
            OptionKey::RemoteImages => "remoteImages",
            OptionKey::Experimental => "experimental",
            OptionKey::ReactStrictMode => "reactStrictMode",
            OptionKey::SwcMinify => "swcMinify",
        }
    }

    /// Parse a flat key
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// Declared value shape
    pub fn shape(&self) -> ValueShape {
        match self {
            OptionKey::Locales
            | OptionKey::ImageDomains
            | OptionKey::ImageFormats
            | OptionKey::RemoteImages => ValueShape::TextList,
            OptionKey::DefaultLocale => ValueShape::Text,
            OptionKey::Experimental => ValueShape::BoolRecord,
            OptionKey::ReactStrictMode | OptionKey::SwcMinify => ValueShape::Bool,
        }
    }

    /// Whether `key` names a nested group such as `images` or `i18n`
    pub fn is_group(key: &str) -> bool {
        NESTED_GROUPS.iter().any(|(group, _)| *group == key)
    }

    /// Resolve a member of a nested group to its flat key
    ///
    /// ```rust
    /// use build_config::OptionKey;
    ///
    /// assert_eq!(OptionKey::nested("images", "domains"), Some(OptionKey::ImageDomains));
    /// assert_eq!(OptionKey::nested("images", "loader"), None);
    /// ```
    pub fn nested(group: &str, member: &str) -> Option<Self> {
        NESTED_GROUPS
            .iter()
            .find(|(name, _)| *name == group)
            .and_then(|(_, members)| members.iter().find(|(m, _)| *m == member))
            .map(|(_, key)| *key)
    }
}

impl std::fmt::Display for OptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
