//! Build-time configuration resolver
//!
//! This crate turns the author's partial option set into the canonical
//! configuration record consumed by the image pipeline, the locale router
//! and the minifier.
//!
//! # Example
//!
//! ```rust
//! use build_config::{ConfigResolver, OptionValue};
//! use std::collections::BTreeMap;
//!
//! let mut options = BTreeMap::new();
//! options.insert("locales".to_string(), OptionValue::from(vec!["he", "en"]));
//! options.insert("defaultLocale".to_string(), OptionValue::from("he"));
//!
//! let config = ConfigResolver::default().resolve(&options).unwrap();
//! assert_eq!(config.default_locale, "he");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod image;
pub mod option;
pub mod resolver;

pub use image::ImageFormat;
pub use option::{OptionKey, OptionValue, ValueShape};
pub use resolver::{ConfigError, ConfigResolver, ResolvedConfig, Result};
