//! Theme seed, expander configuration and the resolved theme

use crate::animation::{resolve_animations_with, AnimationSpec, AnimationToken, KeyframesSpec};
use crate::color::{expand_colors, ColorSeed, ColorToken};
use crate::content::{resolve_content_scope, ContentScope};
use crate::error::Result;
use crate::gradient::{resolve_gradients, GradientSpec};
use crate::typography::{resolve_font_families, FontStack};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{info, warn};

// =============================================================================
// Seed
// =============================================================================

/// How the generator switches to dark variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    /// Follow `prefers-color-scheme`
    #[default]
    Media,
    /// Toggle with a `dark` class on the root element
    Class,
}

/// The author-written theme seed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ThemeSeed {
    /// Content globs scanned for utility usage
    pub content: Vec<String>,
    /// Dark variant strategy
    pub dark_mode: DarkMode,
    /// Shade ramps by token name
    pub colors: ColorSeed,
    /// Font stacks by family name
    pub font_family: BTreeMap<String, Vec<String>>,
    /// Gradient definitions
    pub gradients: Vec<GradientSpec>,
    /// Animation definitions
    pub animations: Vec<AnimationSpec>,
    /// Keyframe sets
    pub keyframes: Vec<KeyframesSpec>,
    /// Generator plugins, in load order
    pub plugins: Vec<String>,
}

impl ThemeSeed {
    /// Parse a seed from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// =============================================================================
// Resolved Theme
// =============================================================================

/// A complete, validated theme
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTheme {
    /// Color tokens by name
    pub colors: BTreeMap<String, ColorToken>,
    /// Rendered gradient values by name
    pub gradients: BTreeMap<String, String>,
    /// Animations bound to their keyframes
    pub animations: BTreeMap<String, AnimationToken>,
    /// Font stacks by family name
    pub font_families: BTreeMap<String, FontStack>,
    /// Content scanning scope
    pub content_scope: ContentScope,
    /// Dark variant strategy
    pub dark_mode: DarkMode,
    /// Generator plugins, in load order
    pub plugins: Vec<String>,
}

impl ResolvedTheme {
    /// Look up a shade of a color token
    pub fn color(&self, token: &str, weight: u16) -> Option<&str> {
        self.colors.get(token).and_then(|t| t.get(weight))
    }

    /// Render the theme as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// =============================================================================
// Expander
// =============================================================================

/// Expander configuration
#[derive(Debug, Clone)]
pub struct ExpanderConfig {
    /// Make the built-in keyframe library available to animations
    pub builtin_keyframes: bool,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            builtin_keyframes: true,
        }
    }
}

impl ExpanderConfig {
    /// Enable or disable the built-in keyframe library
    pub fn builtin_keyframes(mut self, enabled: bool) -> Self {
        self.builtin_keyframes = enabled;
        self
    }
}

/// Expands a [`ThemeSeed`] into a [`ResolvedTheme`]
#[derive(Debug, Clone, Default)]
pub struct TokenExpander {
    config: ExpanderConfig,
}

impl TokenExpander {
    /// Create an expander with configuration
    pub fn new(config: ExpanderConfig) -> Self {
        Self { config }
    }

    /// Expander configuration
    pub fn config(&self) -> &ExpanderConfig {
        &self.config
    }

    /// Parse a JSON seed and expand it
    pub fn expand_json(&self, json: &str) -> Result<ResolvedTheme> {
        self.expand(&ThemeSeed::from_json_str(json)?)
    }

    /// Expand a seed into a complete theme
    ///
    /// Colors resolve before gradients. The first error aborts expansion.
    pub fn expand(&self, seed: &ThemeSeed) -> Result<ResolvedTheme> {
        let colors = expand_colors(&seed.colors)?;
        let gradients = resolve_gradients(&seed.gradients, &colors)?;
        let font_families = resolve_font_families(&seed.font_family)?;
        let animations = resolve_animations_with(
            &seed.animations,
            &seed.keyframes,
            self.config.builtin_keyframes,
        )?;
        let content_scope = resolve_content_scope(&seed.content)?;

        let mut seen = HashSet::new();
        let mut plugins = Vec::with_capacity(seed.plugins.len());
        for plugin in &seed.plugins {
            if seen.insert(plugin.as_str()) {
                plugins.push(plugin.clone());
            } else {
                warn!(plugin = %plugin, "Dropping duplicate plugin");
            }
        }

        info!(
            colors = colors.len(),
            gradients = gradients.len(),
            animations = animations.len(),
            fonts = font_families.len(),
            patterns = content_scope.patterns().len(),
            "Expanded theme"
        );

        Ok(ResolvedTheme {
            colors,
            gradients,
            animations,
            font_families,
            content_scope,
            dark_mode: seed.dark_mode,
            plugins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TokenError;

    const SEED: &str = r##"{
        "content": ["./pages/**/*.{js,ts,jsx,tsx,mdx}"],
        "darkMode": "class",
        "colors": {
            "primary": { "50": "#fdf2f8", "500": "#ec4899", "900": "#881337" },
            "secondary": { "500": "#f43f5e" }
        },
        "fontFamily": { "sans": ["Assistant", "system-ui", "sans-serif"] },
        "gradients": [
            { "name": "gradient-primary", "angle": 135,
              "stops": [{ "token": "primary" }, { "token": "secondary" }] }
        ],
        "animations": [{ "name": "pulse-slow", "value": "pulse 4s ease-in-out infinite" }],
        "plugins": ["@tailwindcss/typography", "@tailwindcss/forms", "@tailwindcss/typography"]
    }"##;

    // ==========================================================================
    // Seed Tests
    // ==========================================================================

    #[test]
    fn test_seed_defaults() {
        let seed = ThemeSeed::from_json_str("{}").unwrap();
        assert_eq!(seed.dark_mode, DarkMode::Media);
        assert!(seed.colors.is_empty());
        assert!(seed.content.is_empty());
    }

    #[test]
    fn test_seed_rejects_bad_dark_mode() {
        let err = ThemeSeed::from_json_str(r#"{"darkMode": "auto"}"#).unwrap_err();
        assert!(matches!(err, TokenError::Parse(_)));
    }

    #[test]
    fn test_seed_rejects_unknown_keys() {
        let err = TokenExpander::default()
            .expand_json(
                r##"{
                    "content": ["./pages/**/*.tsx"],
                    "theme": { "extend": { "colors": { "primary": { "50": "#fdf2f8" } } } }
                }"##,
            )
            .unwrap_err();
        assert!(matches!(err, TokenError::Parse(_)));
        assert!(err.to_string().contains("unknown field `theme`"), "{err}");

        let err = ThemeSeed::from_json_str(r#"{"fontFamilies": {"sans": ["Georgia"]}}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field `fontFamilies`"), "{err}");
    }

    #[test]
    fn test_seed_rejects_unknown_nested_keys() {
        let err = ThemeSeed::from_json_str(
            r#"{"animations": [{"name": "pulse-slow", "value": "pulse 4s", "delay": "1s"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown field `delay`"), "{err}");

        let err = ThemeSeed::from_json_str(
            r#"{"keyframes": [{"name": "fade", "frames": [{"offset": "from", "style": {}}]}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown field `style`"), "{err}");

        assert!(ThemeSeed::from_json_str(
            r##"{"gradients": [{"name": "g", "stops": [{"token": "primary", "shade": 500}, "#fff"]}]}"##,
        )
        .is_err());
    }

    // ==========================================================================
    // Expansion Tests
    // ==========================================================================

    #[test]
    fn test_expand_full_seed() {
        let theme = TokenExpander::default().expand_json(SEED).unwrap();

        assert_eq!(theme.color("primary", 900), Some("#881337"));
        assert_eq!(
            theme.gradients["gradient-primary"],
            "linear-gradient(135deg, #ec4899, #f43f5e)"
        );
        assert_eq!(theme.animations["pulse-slow"].keyframes_name, "pulse");
        assert_eq!(theme.font_families["sans"].primary, "Assistant");
        assert_eq!(theme.dark_mode, DarkMode::Class);
        assert!(theme.content_scope.matches("pages/index.tsx"));
    }

    #[test]
    fn test_duplicate_plugins_dropped() {
        let theme = TokenExpander::default().expand_json(SEED).unwrap();
        assert_eq!(
            theme.plugins,
            vec!["@tailwindcss/typography".to_string(), "@tailwindcss/forms".to_string()]
        );
    }

    #[test]
    fn test_empty_content_fails() {
        let mut seed = ThemeSeed::from_json_str(SEED).unwrap();
        seed.content.clear();
        let err = TokenExpander::default().expand(&seed).unwrap_err();
        assert!(matches!(err, TokenError::EmptyContentScope));
    }

    #[test]
    fn test_colors_fail_before_gradients() {
        let mut seed = ThemeSeed::from_json_str(SEED).unwrap();
        seed.colors.remove("secondary");
        if let Some(ramp) = seed.colors.get_mut("primary") {
            ramp.remove("500");
        }
        let err = TokenExpander::default().expand(&seed).unwrap_err();
        assert!(matches!(err, TokenError::IncompleteColorRamp { .. }));
    }

    #[test]
    fn test_builtins_disabled() {
        let expander = TokenExpander::new(ExpanderConfig::default().builtin_keyframes(false));
        assert!(!expander.config().builtin_keyframes);
        let err = expander.expand_json(SEED).unwrap_err();
        assert!(matches!(err, TokenError::OrphanedAnimation { .. }));
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let expander = TokenExpander::default();
        let first = expander.expand_json(SEED).unwrap().to_json_pretty().unwrap();
        let second = expander.expand_json(SEED).unwrap().to_json_pretty().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolved_theme_serializes_camel_case() {
        let theme = TokenExpander::default().expand_json(SEED).unwrap();
        let json: serde_json::Value = serde_json::to_value(&theme).unwrap();
        assert_eq!(json["darkMode"], "class");
        assert_eq!(json["contentScope"][0], "./pages/**/*.{js,ts,jsx,tsx,mdx}");
        assert_eq!(json["fontFamilies"]["sans"][2], "sans-serif");
        assert_eq!(json["animations"]["pulse-slow"]["iterations"], "infinite");
        assert_eq!(json["colors"]["primary"]["50"], "#fdf2f8");
    }

    #[test]
    fn test_resolved_theme_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResolvedTheme>();
    }
}
