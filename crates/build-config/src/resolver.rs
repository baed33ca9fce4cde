//! Configuration resolver
//!
//! Merges a partial option set with documented defaults into a
//! [`ResolvedConfig`] and validates cross-field constraints.
//!
//! Defaults:
//!
//! | option | default |
//! |---|---|
//! | `locales` | `["en"]`, or `[defaultLocale]` when only the default is given |
//! | `defaultLocale` | first entry of `locales` |
//! | `imageDomains` | empty |
//! | `imageFormats` | `["image/webp"]` |
//! | `remoteImages` | empty |
//! | `experimental` | empty |
//! | `reactStrictMode` | `false` |
//! | `swcMinify` | `true` |

use crate::image::ImageFormat;
use crate::option::{OptionKey, OptionValue, ValueShape};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use token_validation::{
    canonical_locale, find_duplicate, normalize_hostname, url_host, validate_format,
    ValidationError, ValueFormat,
};
use tracing::{debug, info, warn};

/// Locale used when the author configures none
pub const DEFAULT_LOCALE: &str = "en";

/// Configuration resolution errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value's type or shape does not match the option's schema
    #[error("Invalid value for option '{key}': expected {expected}, found {found}")]
    InvalidOptionShape {
        /// Offending option key
        key: String,
        /// Expected shape
        expected: String,
        /// What was supplied
        found: String,
    },

    /// A cross-field invariant is broken
    #[error("Constraint violated for option '{key}': {reason}")]
    ConstraintViolation {
        /// Offending option key
        key: String,
        /// Description of the violation
        reason: String,
    },

    /// Option not recognized (strict mode only)
    #[error("Unknown option: {key}")]
    UnknownOption {
        /// The unrecognized key
        key: String,
    },

    /// Configuration document is not valid JSON
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Key of the option that caused the error, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidOptionShape { key, .. }
            | ConfigError::ConstraintViolation { key, .. }
            | ConfigError::UnknownOption { key } => Some(key),
            ConfigError::Parse(_) => None,
        }
    }
}

/// Result type for configuration resolution
pub type Result<T> = std::result::Result<T, ConfigError>;

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Fully validated configuration consumed by the build tooling
///
/// Deserializing a resolved artifact re-runs the field and cross-field checks
/// of [`ConfigResolver::resolve`]. Values built as struct literals are not
/// checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ConfigRecord")]
pub struct ResolvedConfig {
    /// Locales served, in author order
    pub locales: Vec<String>,
    /// Default locale (always a member of `locales`)
    pub default_locale: String,
    /// Hosts the image pipeline may fetch from
    pub image_domains: BTreeSet<String>,
    /// Output encodings in preference order
    pub image_formats: Vec<ImageFormat>,
    /// Remote image URLs referenced by the site
    pub remote_images: Vec<String>,
    /// Whether unknown options were rejected during resolution
    pub strict_mode: bool,
    /// Experimental framework flags
    pub experimental_flags: BTreeMap<String, bool>,
    /// Extra development-mode checks in the renderer
    pub react_strict_mode: bool,
    /// Minify output
    pub minify: bool,
}

/// Serialized form of a [`ResolvedConfig`], checked on the way in
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigRecord {
    locales: Vec<String>,
    default_locale: String,
    image_domains: BTreeSet<String>,
    image_formats: Vec<ImageFormat>,
    remote_images: Vec<String>,
    strict_mode: bool,
    experimental_flags: BTreeMap<String, bool>,
    react_strict_mode: bool,
    minify: bool,
}

impl TryFrom<ConfigRecord> for ResolvedConfig {
    type Error = ConfigError;

    fn try_from(record: ConfigRecord) -> Result<Self> {
        let locales = validate_locales(OptionKey::Locales.as_str(), &as_strs(&record.locales))?;
        let default_key = OptionKey::DefaultLocale.as_str();
        let default_locale = canonical_locale(&record.default_locale).ok_or_else(|| {
            shape_error(default_key, "BCP 47 locale", format!("'{}'", record.default_locale))
        })?;
        let (locales, default_locale) =
            merge_locales(default_key, Some(locales), Some(default_locale))?;

        let domains: Vec<&str> = record.image_domains.iter().map(String::as_str).collect();
        let image_domains = validate_domains(OptionKey::ImageDomains.as_str(), &domains)?;

        let formats: Vec<&str> = record.image_formats.iter().map(|f| f.as_str()).collect();
        let image_formats = validate_formats(OptionKey::ImageFormats.as_str(), &formats)?;

        let remote_images = validate_remote_images(
            OptionKey::RemoteImages.as_str(),
            &as_strs(&record.remote_images),
        )?;
        check_remote_hosts(&remote_images, &image_domains)?;

        Ok(Self {
            locales,
            default_locale,
            image_domains,
            image_formats,
            remote_images,
            strict_mode: record.strict_mode,
            experimental_flags: record.experimental_flags,
            react_strict_mode: record.react_strict_mode,
            minify: record.minify,
        })
    }
}

fn as_strs(list: &[String]) -> Vec<&str> {
    list.iter().map(String::as_str).collect()
}

impl ResolvedConfig {
    /// Check whether `locale` is the default locale
    pub fn is_default_locale(&self, locale: &str) -> bool {
        canonical_locale(locale).is_some_and(|l| l == self.default_locale)
    }

    /// Check whether the image pipeline may fetch from `host`
    pub fn allows_image_host(&self, host: &str) -> bool {
        normalize_hostname(host).is_some_and(|h| self.image_domains.contains(&h))
    }

    /// Read an experimental flag (unset flags are off)
    pub fn experimental(&self, flag: &str) -> bool {
        self.experimental_flags.get(flag).copied().unwrap_or(false)
    }

    /// Parse and resolve a JSON configuration document in lenient mode
    pub fn from_json_str(json: &str) -> Result<Self> {
        ConfigResolver::default().resolve_json(json)
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolver for build options
///
/// Lenient by default: unknown options are dropped with a warning. In strict
/// mode they fail with [`ConfigError::UnknownOption`].
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    strict: bool,
}

/// One recognized option located in the input, with the key it was written as
struct Located<'a> {
    source_key: String,
    value: &'a OptionValue,
}

impl ConfigResolver {
    /// Create a lenient resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a strict resolver
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Create a lenient resolver (same as [`ConfigResolver::new`])
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    /// Enable or disable strict mode
    pub fn strict_mode(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Whether unknown options are rejected
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Parse a JSON object of options and resolve it
    pub fn resolve_json(&self, json: &str) -> Result<ResolvedConfig> {
        let partial: BTreeMap<String, OptionValue> = serde_json::from_str(json)?;
        self.resolve(&partial)
    }

    /// Resolve a partial option set into a complete configuration
    pub fn resolve(&self, partial: &BTreeMap<String, OptionValue>) -> Result<ResolvedConfig> {
        let fields = self.locate(partial)?;

        let text_list = |key: OptionKey| {
            fields
                .get(&key)
                .map(|f| expect_text_list(&f.source_key, f.value).map(|l| (f.source_key.clone(), l)))
                .transpose()
        };

        let locales = text_list(OptionKey::Locales)?
            .map(|(key, list)| validate_locales(&key, &list))
            .transpose()?;

        let default_locale = fields
            .get(&OptionKey::DefaultLocale)
            .map(|f| -> Result<String> {
                let value = expect_text(&f.source_key, f.value)?;
                canonical_locale(value)
                    .ok_or_else(|| shape_error(&f.source_key, "BCP 47 locale", format!("'{value}'")))
            })
            .transpose()?;

        let image_domains = text_list(OptionKey::ImageDomains)?
            .map(|(key, list)| validate_domains(&key, &list))
            .transpose()?
            .unwrap_or_default();

        let image_formats = text_list(OptionKey::ImageFormats)?
            .map(|(key, list)| validate_formats(&key, &list))
            .transpose()?
            .unwrap_or_else(|| vec![ImageFormat::Webp]);

        let remote_images = text_list(OptionKey::RemoteImages)?
            .map(|(key, list)| validate_remote_images(&key, &list))
            .transpose()?
            .unwrap_or_default();

        let experimental_flags = fields
            .get(&OptionKey::Experimental)
            .map(|f| expect_bool_record(&f.source_key, f.value))
            .transpose()?
            .unwrap_or_default();

        let flag = |key: OptionKey, default: bool| -> Result<bool> {
            fields
                .get(&key)
                .map(|f| expect_bool(&f.source_key, f.value))
                .transpose()
                .map(|v| v.unwrap_or(default))
        };
        let react_strict_mode = flag(OptionKey::ReactStrictMode, false)?;
        let minify = flag(OptionKey::SwcMinify, true)?;

        // Cross-field checks run only after every field validated on its own.
        let default_key = fields
            .get(&OptionKey::DefaultLocale)
            .map_or(OptionKey::DefaultLocale.as_str().to_string(), |f| f.source_key.clone());
        let (locales, default_locale) = merge_locales(&default_key, locales, default_locale)?;
        check_remote_hosts(&remote_images, &image_domains)?;

        let config = ResolvedConfig {
            locales,
            default_locale,
            image_domains,
            image_formats,
            remote_images,
            strict_mode: self.strict,
            experimental_flags,
            react_strict_mode,
            minify,
        };

        info!(
            locales = config.locales.len(),
            default_locale = %config.default_locale,
            image_domains = config.image_domains.len(),
            strict = config.strict_mode,
            "Resolved build configuration"
        );

        Ok(config)
    }

    /// Map every recognized option, flat or nested, to its key
    fn locate<'a>(
        &self,
        partial: &'a BTreeMap<String, OptionValue>,
    ) -> Result<BTreeMap<OptionKey, Located<'a>>> {
        let mut fields = BTreeMap::new();

        for (key, value) in partial {
            if let Some(option) = OptionKey::parse(key) {
                insert_field(&mut fields, option, key.clone(), value)?;
            } else if OptionKey::is_group(key) {
                let OptionValue::Record(members) = value else {
                    return Err(shape_error(key, "record", value.kind()));
                };
                for (member, member_value) in members {
                    let dotted = format!("{key}.{member}");
                    match OptionKey::nested(key, member) {
                        Some(option) => insert_field(&mut fields, option, dotted, member_value)?,
                        None => self.unknown(dotted)?,
                    }
                }
            } else {
                self.unknown(key.clone())?;
            }
        }

        debug!(recognized = fields.len(), "Located build options");
        Ok(fields)
    }

    /// Reject or drop an unknown option according to the mode
    fn unknown(&self, key: String) -> Result<()> {
        if self.strict {
            return Err(ConfigError::UnknownOption { key });
        }
        warn!(key = %key, "Ignoring unknown build option");
        Ok(())
    }
}

fn insert_field<'a>(
    fields: &mut BTreeMap<OptionKey, Located<'a>>,
    option: OptionKey,
    source_key: String,
    value: &'a OptionValue,
) -> Result<()> {
    if let Some(existing) = fields.get(&option) {
        return Err(ConfigError::ConstraintViolation {
            key: source_key,
            reason: format!("already set as '{}'", existing.source_key),
        });
    }
    fields.insert(option, Located { source_key, value });
    Ok(())
}

// =============================================================================
// Shape Checks
// =============================================================================

fn shape_error(key: &str, expected: impl Into<String>, found: impl Into<String>) -> ConfigError {
    ConfigError::InvalidOptionShape {
        key: key.to_string(),
        expected: expected.into(),
        found: found.into(),
    }
}

fn expect_bool(key: &str, value: &OptionValue) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| shape_error(key, ValueShape::Bool.describe(), value.kind()))
}

fn expect_text<'a>(key: &str, value: &'a OptionValue) -> Result<&'a str> {
    value
        .as_text()
        .ok_or_else(|| shape_error(key, ValueShape::Text.describe(), value.kind()))
}

fn expect_text_list<'a>(key: &str, value: &'a OptionValue) -> Result<Vec<&'a str>> {
    let OptionValue::List(items) = value else {
        return Err(shape_error(key, ValueShape::TextList.describe(), value.kind()));
    };
    items
        .iter()
        .map(|item| {
            item.as_text().ok_or_else(|| {
                shape_error(
                    key,
                    ValueShape::TextList.describe(),
                    format!("list containing {}", item.kind()),
                )
            })
        })
        .collect()
}

fn expect_bool_record(key: &str, value: &OptionValue) -> Result<BTreeMap<String, bool>> {
    let OptionValue::Record(members) = value else {
        return Err(shape_error(key, ValueShape::BoolRecord.describe(), value.kind()));
    };
    members
        .iter()
        .map(|(name, member)| {
            member
                .as_bool()
                .map(|b| (name.clone(), b))
                .ok_or_else(|| shape_error(&format!("{key}.{name}"), "boolean", member.kind()))
        })
        .collect()
}

// =============================================================================
// Field Validation
// =============================================================================

fn validate_locales(key: &str, list: &[&str]) -> Result<Vec<String>> {
    if list.is_empty() {
        return Err(shape_error(key, "non-empty list of locales", "empty list"));
    }

    let locales = list
        .iter()
        .map(|value| {
            canonical_locale(value)
                .ok_or_else(|| shape_error(key, "BCP 47 locale", format!("'{value}'")))
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(dup) = find_duplicate(&locales) {
        return Err(shape_error(key, "list of distinct locales", format!("duplicate '{dup}'")));
    }

    debug!(key, count = locales.len(), "Validated locales");
    Ok(locales)
}

/// Map a format validation failure onto the option it was found in
fn format_error(key: &str, err: ValidationError) -> ConfigError {
    match err {
        ValidationError::InvalidFormat { format, value } => {
            shape_error(key, format.as_str(), format!("'{value}'"))
        }
    }
}

fn validate_domains(key: &str, list: &[&str]) -> Result<BTreeSet<String>> {
    list.iter()
        .map(|value| {
            validate_format(value, ValueFormat::Hostname)
                .map(|()| value.to_ascii_lowercase())
                .map_err(|e| format_error(key, e))
        })
        .collect()
}

fn validate_formats(key: &str, list: &[&str]) -> Result<Vec<ImageFormat>> {
    if list.is_empty() {
        return Err(shape_error(key, "non-empty list of image formats", "empty list"));
    }

    let formats = list
        .iter()
        .map(|value| {
            ImageFormat::parse(value).ok_or_else(|| {
                shape_error(
                    key,
                    format!("one of {}", ImageFormat::supported_list()),
                    format!("'{value}'"),
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(dup) = find_duplicate(&formats) {
        return Err(shape_error(key, "list of distinct image formats", format!("duplicate '{dup}'")));
    }

    Ok(formats)
}

fn validate_remote_images(key: &str, list: &[&str]) -> Result<Vec<String>> {
    list.iter()
        .map(|value| {
            validate_format(value, ValueFormat::HttpUrl)
                .map(|()| value.to_string())
                .map_err(|e| format_error(key, e))
        })
        .collect()
}

// =============================================================================
// Cross-Field Constraints
// =============================================================================

fn merge_locales(
    default_key: &str,
    locales: Option<Vec<String>>,
    default_locale: Option<String>,
) -> Result<(Vec<String>, String)> {
    match (locales, default_locale) {
        (Some(locales), Some(default)) => {
            if !locales.contains(&default) {
                return Err(ConfigError::ConstraintViolation {
                    key: default_key.to_string(),
                    reason: format!(
                        "default locale '{}' is not one of [{}]",
                        default,
                        locales.join(", ")
                    ),
                });
            }
            Ok((locales, default))
        }
        (Some(locales), None) => {
            let default = locales[0].clone();
            Ok((locales, default))
        }
        (None, Some(default)) => Ok((vec![default.clone()], default)),
        (None, None) => Ok((vec![DEFAULT_LOCALE.to_string()], DEFAULT_LOCALE.to_string())),
    }
}

fn check_remote_hosts(remote_images: &[String], image_domains: &BTreeSet<String>) -> Result<()> {
    for url in remote_images {
        let Some(host) = url_host(url) else {
            continue;
        };
        let host = host.to_ascii_lowercase();
        if image_domains.contains(&host) {
            continue;
        }

        let reason = if image_domains.is_empty() {
            format!("remote image '{url}' is referenced but imageDomains is empty")
        } else {
            format!("host '{host}' of remote image '{url}' is not listed in imageDomains")
        };
        return Err(ConfigError::ConstraintViolation {
            key: OptionKey::RemoteImages.as_str().to_string(),
            reason,
        });
    }
    Ok(())
}
