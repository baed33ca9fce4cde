//! Value validation for configuration and token strings
//!
//! # Example
//!
//! ```rust
//! use token_validation::{validate_format, ValueFormat};
//!
//! assert!(validate_format("res.cloudinary.com", ValueFormat::Hostname).is_ok());
//! assert!(validate_format("not a host", ValueFormat::Hostname).is_err());
//! assert!(validate_format("#ec4899", ValueFormat::CssColor).is_ok());
//! ```

use crate::formats::ValueFormat;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// Maximum length of a full hostname
const MAX_HOSTNAME_LEN: usize = 253;

/// Maximum length of one hostname label
const MAX_LABEL_LEN: usize = 63;

/// Errors that can occur during validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Value does not match the expected format
    #[error("Invalid {format} format: {value}")]
    InvalidFormat {
        /// The format that was expected
        format: ValueFormat,
        /// The value that failed validation
        value: String,
    },
}

/// Result type for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Validate a string value against a format
pub fn validate_format(value: &str, format: ValueFormat) -> Result<()> {
    let valid = match format {
        ValueFormat::Hostname => is_hostname(value),
        ValueFormat::HttpUrl => url_host(value).is_some(),
        ValueFormat::Locale => canonical_locale(value).is_some(),
        ValueFormat::CssColor => normalize_color(value).is_some(),
        ValueFormat::CssTime => parse_css_time(value).is_some(),
    };

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            format,
            value: value.to_string(),
        })
    }
}

/// Check hostname syntax (labels of alphanumerics and inner hyphens)
fn is_hostname(value: &str) -> bool {
    if value.is_empty() || value.len() > MAX_HOSTNAME_LEN {
        return false;
    }

    value.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}

/// Validate a BCP 47 locale and return its canonical form
///
/// ```rust
/// use token_validation::canonical_locale;
///
/// assert_eq!(canonical_locale("en_us").as_deref(), Some("en-US"));
/// assert_eq!(canonical_locale("he").as_deref(), Some("he"));
/// assert_eq!(canonical_locale("hebrew language"), None);
/// ```
pub fn canonical_locale(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    value
        .parse::<LanguageIdentifier>()
        .ok()
        .map(|id| id.to_string())
}

/// Validate a hostname and return its lowercase form
///
/// ```rust
/// use token_validation::normalize_hostname;
///
/// assert_eq!(normalize_hostname("Images.Unsplash.com").as_deref(), Some("images.unsplash.com"));
/// assert_eq!(normalize_hostname("-bad.com"), None);
/// ```
pub fn normalize_hostname(value: &str) -> Option<String> {
    is_hostname(value).then(|| value.to_ascii_lowercase())
}

/// Extract the host of an absolute `http`/`https` URL
///
/// Returns `None` when the scheme is missing, the authority carries
/// credentials, or the host is not a valid hostname.
pub fn url_host(value: &str) -> Option<&str> {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))?;

    let authority = rest
        .split(|c: char| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or_default();

    if authority.contains('@') {
        return None;
    }

    let host = match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => host,
        Some(_) => return None,
        None => authority,
    };

    is_hostname(host).then_some(host)
}

/// Validate a CSS color literal and return its lowercase form
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(...)` and `rgba(...)`.
pub fn normalize_color(value: &str) -> Option<String> {
    let value = value.trim().to_ascii_lowercase();

    if let Some(hex) = value.strip_prefix('#') {
        let valid = matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
        return valid.then_some(value);
    }

    let inner = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))?
        .strip_suffix(')')?;

    let components: Vec<&str> = inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    if !matches!(components.len(), 3 | 4) {
        return None;
    }

    let channels_valid = components[..3]
        .iter()
        .all(|c| parse_channel(c, 255.0).is_some());
    let alpha_valid = components
        .get(3)
        .map_or(true, |a| parse_channel(a, 1.0).is_some());

    (channels_valid && alpha_valid).then_some(value)
}

/// Parse a color channel as a number in `0..=max` or a percentage
fn parse_channel(value: &str, max: f64) -> Option<f64> {
    let (number, limit) = match value.strip_suffix('%') {
        Some(percent) => (percent, 100.0),
        None => (value, max),
    };
    let parsed: f64 = number.parse().ok()?;
    (parsed.is_finite() && (0.0..=limit).contains(&parsed)).then_some(parsed)
}

/// Parse a CSS time value into milliseconds
///
/// ```rust
/// use token_validation::parse_css_time;
///
/// assert_eq!(parse_css_time("4s"), Some(4000));
/// assert_eq!(parse_css_time("150ms"), Some(150));
/// assert_eq!(parse_css_time("fast"), None);
/// ```
pub fn parse_css_time(value: &str) -> Option<u64> {
    let (number, scale) = match value.strip_suffix("ms") {
        Some(ms) => (ms, 1.0),
        None => (value.strip_suffix('s')?, 1000.0),
    };

    if number.is_empty() || !number.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let parsed: f64 = number.parse().ok()?;
    if !parsed.is_finite() || parsed < 0.0 {
        return None;
    }

    Some((parsed * scale).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // Hostname Tests
    // ==========================================================================

    #[test]
    fn test_valid_hostnames() {
        assert!(validate_format("res.cloudinary.com", ValueFormat::Hostname).is_ok());
        assert!(validate_format("images.unsplash.com", ValueFormat::Hostname).is_ok());
        assert!(validate_format("localhost", ValueFormat::Hostname).is_ok());
        assert!(validate_format("cdn-1.example.org", ValueFormat::Hostname).is_ok());
    }

    #[test]
    fn test_invalid_hostnames() {
        for value in ["", ".example.com", "example.com.", "ex ample.com", "-cdn.com", "cdn-.com", "a..b"] {
            assert!(
                validate_format(value, ValueFormat::Hostname).is_err(),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_hostname_label_length() {
        let long_label = "a".repeat(64);
        assert!(validate_format(&format!("{long_label}.com"), ValueFormat::Hostname).is_err());
        let ok_label = "a".repeat(63);
        assert!(validate_format(&format!("{ok_label}.com"), ValueFormat::Hostname).is_ok());
    }

    #[test]
    fn test_normalize_hostname_lowercases() {
        assert_eq!(
            normalize_hostname("Res.Cloudinary.COM").as_deref(),
            Some("res.cloudinary.com")
        );
    }

    // ==========================================================================
    // URL Tests
    // ==========================================================================

    #[test]
    fn test_url_host() {
        assert_eq!(
            url_host("https://res.cloudinary.com/demo/image/upload/sample.jpg"),
            Some("res.cloudinary.com")
        );
        assert_eq!(url_host("http://localhost:3000/a.png"), Some("localhost"));
        assert_eq!(url_host("https://images.unsplash.com?w=200"), Some("images.unsplash.com"));
    }

    #[test]
    fn test_url_host_rejects() {
        assert_eq!(url_host("ftp://example.com/a.png"), None);
        assert_eq!(url_host("/images/local.png"), None);
        assert_eq!(url_host("https://user@example.com/"), None);
        assert_eq!(url_host("https://example.com:abc/"), None);
        assert_eq!(url_host("https:///path"), None);
    }

    // ==========================================================================
    // Locale Tests
    // ==========================================================================

    #[test]
    fn test_canonical_locale() {
        assert_eq!(canonical_locale("EN-us").as_deref(), Some("en-US"));
        assert_eq!(canonical_locale("").as_deref(), None);
    }

    #[test]
    fn test_locales() {
        assert!(validate_format("he", ValueFormat::Locale).is_ok());
        assert!(validate_format("en-US", ValueFormat::Locale).is_ok());
        assert!(validate_format("not a locale", ValueFormat::Locale).is_err());
        assert!(validate_format("", ValueFormat::Locale).is_err());
    }

    // ==========================================================================
    // Color Tests
    // ==========================================================================

    #[test]
    fn test_normalize_hex_colors() {
        assert_eq!(normalize_color("#EC4899").as_deref(), Some("#ec4899"));
        assert_eq!(normalize_color("#fff").as_deref(), Some("#fff"));
        assert_eq!(normalize_color("#FFFFFF80").as_deref(), Some("#ffffff80"));
        assert_eq!(normalize_color("#ec489"), None);
        assert_eq!(normalize_color("#gggggg"), None);
        assert_eq!(normalize_color("ec4899"), None);
    }

    #[test]
    fn test_normalize_rgb_colors() {
        assert_eq!(
            normalize_color("rgb(236, 72, 153)").as_deref(),
            Some("rgb(236, 72, 153)")
        );
        assert!(normalize_color("rgba(0, 0, 0, 0.5)").is_some());
        assert!(normalize_color("rgb(236 72 153 / 50%)").is_some());
        assert!(normalize_color("rgb(256, 0, 0)").is_none());
        assert!(normalize_color("rgb(1, 2)").is_none());
        assert!(normalize_color("rgba(0, 0, 0, 2)").is_none());
    }

    // ==========================================================================
    // Time Tests
    // ==========================================================================

    #[test]
    fn test_parse_css_time() {
        assert_eq!(parse_css_time("8s"), Some(8000));
        assert_eq!(parse_css_time("0.5s"), Some(500));
        assert_eq!(parse_css_time("150ms"), Some(150));
        assert_eq!(parse_css_time("0s"), Some(0));
    }

    #[test]
    fn test_parse_css_time_rejects() {
        assert_eq!(parse_css_time("s"), None);
        assert_eq!(parse_css_time("-1s"), None);
        assert_eq!(parse_css_time("infs"), None);
        assert_eq!(parse_css_time("4"), None);
        assert_eq!(parse_css_time("ease"), None);
    }

    #[test]
    fn test_invalid_format_error_message() {
        let err = validate_format("nope", ValueFormat::CssTime).unwrap_err();
        assert_eq!(err.to_string(), "Invalid css-time format: nope");
    }
}
