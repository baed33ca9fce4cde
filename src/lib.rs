//! Site Tokens
//!
//! Resolves the two build-time documents of the magazine front end: the
//! framework build options and the design-token theme consumed by the
//! utility-class generator.
//!
//! ```rust
//! use site_tokens::{presets, BuildArtifacts};
//!
//! let artifacts = BuildArtifacts::magazine().unwrap();
//! assert_eq!(artifacts.config.default_locale, "he");
//! assert_eq!(
//!     artifacts.theme.gradients["gradient-primary"],
//!     "linear-gradient(135deg, #ec4899, #f43f5e)"
//! );
//! # let _ = presets::magazine_theme();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod presets;

pub use build_config::{ConfigError, ConfigResolver, OptionValue, ResolvedConfig};
pub use design_tokens::{ExpanderConfig, ResolvedTheme, ThemeSeed, TokenError, TokenExpander};

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while producing build artifacts
#[derive(Debug, Error)]
pub enum Error {
    /// Build options failed to resolve
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Theme seed failed to expand
    #[error("Theme error: {0}")]
    Tokens(#[from] TokenError),

    /// Seed file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the seed file
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Artifact could not be rendered
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for artifact operations
pub type Result<T> = std::result::Result<T, Error>;

/// Resolved build configuration and theme, ready for the build tooling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildArtifacts {
    /// Resolved build options
    pub config: ResolvedConfig,
    /// Resolved design-token theme
    pub theme: ResolvedTheme,
}

impl BuildArtifacts {
    /// Resolve an option set and a theme seed with the given resolver and expander
    pub fn resolve(
        resolver: &ConfigResolver,
        expander: &TokenExpander,
        options: &BTreeMap<String, OptionValue>,
        seed: &ThemeSeed,
    ) -> Result<Self> {
        let config = resolver.resolve(options)?;
        let theme = expander.expand(seed)?;
        info!(
            locales = config.locales.len(),
            colors = theme.colors.len(),
            "Resolved build artifacts"
        );
        Ok(Self { config, theme })
    }

    /// Resolve both documents from JSON with the default resolver and expander
    pub fn from_json_strs(config_json: &str, theme_json: &str) -> Result<Self> {
        let config = ConfigResolver::default().resolve_json(config_json)?;
        let theme = TokenExpander::default().expand_json(theme_json)?;
        Ok(Self { config, theme })
    }

    /// Read and resolve both documents from JSON files
    pub fn from_files(config_path: impl AsRef<Path>, theme_path: impl AsRef<Path>) -> Result<Self> {
        let config_json = read_seed(config_path.as_ref())?;
        let theme_json = read_seed(theme_path.as_ref())?;
        Self::from_json_strs(&config_json, &theme_json)
    }

    /// Resolve the built-in magazine presets
    pub fn magazine() -> Result<Self> {
        Self::resolve(
            &ConfigResolver::strict(),
            &TokenExpander::default(),
            &presets::magazine_config(),
            &presets::magazine_theme(),
        )
    }

    /// Render the artifacts as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn read_seed(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "Reading seed file");
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magazine_artifacts() {
        let artifacts = BuildArtifacts::magazine().unwrap();
        assert_eq!(artifacts.config.locales, vec!["he".to_string(), "en".to_string()]);
        assert!(artifacts.config.react_strict_mode);
        assert!(artifacts.config.experimental("optimizeCss"));
        assert_eq!(artifacts.theme.plugins.len(), 2);
    }

    #[test]
    fn test_config_error_converts() {
        let err = BuildArtifacts::from_json_strs(
            r#"{"locales": ["en", "he"], "defaultLocale": "fr"}"#,
            "{}",
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ConstraintViolation { .. })));
    }

    #[test]
    fn test_token_error_converts() {
        let err = BuildArtifacts::from_json_strs("{}", r#"{"content": []}"#).unwrap_err();
        assert!(matches!(err, Error::Tokens(TokenError::EmptyContentScope)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = BuildArtifacts::from_files("/nonexistent/next.json", "/nonexistent/theme.json")
            .unwrap_err();
        assert!(matches!(err, Error::Io { ref path, .. } if path.ends_with("next.json")));
    }
}
