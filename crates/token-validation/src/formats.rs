//! String format types for configuration and token values

use serde::{Deserialize, Serialize};

/// String formats recognized by the validators
///
/// Each format carries a validation rule applied by
/// [`validate_format`](crate::validate_format).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueFormat {
    /// DNS hostname
    ///
    /// Examples: `res.cloudinary.com`, `localhost`
    Hostname,

    /// Absolute `http` or `https` URL with a valid host
    ///
    /// Example: `https://images.unsplash.com/photo-1.jpg`
    HttpUrl,

    /// BCP 47 language identifier
    ///
    /// Examples: `he`, `en`, `en-US`
    Locale,

    /// CSS color literal
    ///
    /// `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(...)` or `rgba(...)`
    CssColor,

    /// CSS time value
    ///
    /// Examples: `4s`, `0.5s`, `150ms`
    CssTime,
}

impl ValueFormat {
    /// Get the string representation of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueFormat::Hostname => "hostname",
            ValueFormat::HttpUrl => "http-url",
            ValueFormat::Locale => "locale",
            ValueFormat::CssColor => "css-color",
            ValueFormat::CssTime => "css-time",
        }
    }

    /// Parse a format from its string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "hostname" => Some(ValueFormat::Hostname),
            "http-url" => Some(ValueFormat::HttpUrl),
            "locale" => Some(ValueFormat::Locale),
            "css-color" => Some(ValueFormat::CssColor),
            "css-time" => Some(ValueFormat::CssTime),
            _ => None,
        }
    }
}

impl std::fmt::Display for ValueFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
