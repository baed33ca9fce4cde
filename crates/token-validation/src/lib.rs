//! Shared validation helpers for site configuration and design tokens
//!
//! This crate provides the string formats and sequence checks used by both
//! the build configuration resolver and the design-token expander.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod formats;
pub mod sequence;
pub mod validation;

pub use formats::ValueFormat;
pub use sequence::{find_duplicate, find_duplicate_by};
pub use validation::{
    canonical_locale, normalize_color, normalize_hostname, parse_css_time, url_host, validate_format,
    ValidationError,
};
