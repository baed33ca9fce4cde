//! Magazine Integration Tests
//!
//! End-to-end resolution of the magazine build options and theme, from
//! presets, JSON documents and seed files.

use build_config::{ConfigError, ConfigResolver, OptionValue};
use design_tokens::{TokenError, TokenExpander};
use proptest::prelude::*;
use site_tokens::{presets, BuildArtifacts, Error};
use std::collections::BTreeMap;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const CONFIG_JSON: &str = r#"{
    "reactStrictMode": true,
    "swcMinify": true,
    "images": {
        "domains": ["res.cloudinary.com", "images.unsplash.com"],
        "formats": ["image/avif", "image/webp"]
    },
    "i18n": { "locales": ["he", "en"], "defaultLocale": "he" },
    "experimental": { "optimizeCss": true }
}"#;

const THEME_JSON: &str = r##"{
    "content": ["./app/**/*.{js,ts,jsx,tsx,mdx}"],
    "darkMode": "class",
    "colors": {
        "primary": { "50": "#fdf2f8", "500": "#ec4899", "900": "#881337" },
        "secondary": { "500": "#f43f5e" }
    },
    "fontFamily": { "heading": ["Frank Ruhl Libre", "Georgia", "serif"] },
    "gradients": [
        { "name": "gradient-primary", "angle": 135,
          "stops": [{ "token": "primary", "weight": 500 }, { "token": "secondary" }] }
    ],
    "animations": [{ "name": "gradient", "value": "gradient 8s ease infinite" }],
    "keyframes": [
        { "name": "gradient", "frames": [
            { "offset": "0%, 100%", "styles": { "backgroundPosition": "0% 50%" } },
            { "offset": "50%", "styles": { "backgroundPosition": "100% 50%" } }
        ] }
    ]
}"##;

/// The presets reproduce the site's handwritten gradient values
#[test]
fn test_magazine_presets_match_site_values() {
    init_tracing();
    let artifacts = BuildArtifacts::magazine().unwrap();
    let gradients = &artifacts.theme.gradients;

    assert_eq!(gradients["gradient-primary"], "linear-gradient(135deg, #ec4899, #f43f5e)");
    assert_eq!(gradients["gradient-secondary"], "linear-gradient(135deg, #f43f5e, #fb923c)");
    assert_eq!(
        gradients["gradient-full"],
        "linear-gradient(135deg, #ec4899, #f43f5e, #fb923c, #fbbf24)"
    );
    assert_eq!(gradients["gradient-dark"], "linear-gradient(135deg, #1e293b, #0f172a)");

    let animations = &artifacts.theme.animations;
    assert_eq!(animations["pulse-slow"].to_css_value(), "pulse 4s ease-in-out infinite");
    assert_eq!(animations["gradient"].to_css_value(), "gradient 8s ease infinite");

    assert_eq!(
        artifacts.theme.font_families["heading"].to_css(),
        "\"Frank Ruhl Libre\", Georgia, serif"
    );
}

/// The preset build options resolve under a strict resolver
#[test]
fn test_magazine_config_resolves_strict() {
    init_tracing();
    let config = ConfigResolver::strict().resolve(&presets::magazine_config()).unwrap();

    assert!(config.strict_mode);
    assert_eq!(config.default_locale, "he");
    assert!(config.allows_image_host("images.unsplash.com"));
    assert!(!config.allows_image_host("example.com"));
    assert_eq!(
        config.image_formats.iter().map(|f| f.as_str()).collect::<Vec<_>>(),
        vec!["image/avif", "image/webp"]
    );
    assert!(config.minify);
}

/// Resolving the same documents twice yields byte-identical artifacts
#[test]
fn test_artifacts_are_idempotent() {
    init_tracing();
    let first = BuildArtifacts::from_json_strs(CONFIG_JSON, THEME_JSON)
        .unwrap()
        .to_json_pretty()
        .unwrap();
    let second = BuildArtifacts::from_json_strs(CONFIG_JSON, THEME_JSON)
        .unwrap()
        .to_json_pretty()
        .unwrap();
    assert_eq!(first, second);

    let magazine = BuildArtifacts::magazine().unwrap().to_json_pretty().unwrap();
    assert_eq!(magazine, BuildArtifacts::magazine().unwrap().to_json_pretty().unwrap());
}

/// JSON documents and the presets agree on the shared values
#[test]
fn test_json_documents_match_presets() {
    init_tracing();
    let from_json = BuildArtifacts::from_json_strs(CONFIG_JSON, THEME_JSON).unwrap();
    let magazine = BuildArtifacts::magazine().unwrap();

    assert_eq!(from_json.config.locales, magazine.config.locales);
    assert_eq!(from_json.config.image_domains, magazine.config.image_domains);
    assert_eq!(
        from_json.theme.gradients["gradient-primary"],
        magazine.theme.gradients["gradient-primary"]
    );
}

/// Seed files are read from disk and resolved
#[test]
fn test_artifacts_from_files() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("next.config.json");
    let theme_path = temp_dir.path().join("theme.json");
    std::fs::write(&config_path, CONFIG_JSON).unwrap();
    std::fs::write(&theme_path, THEME_JSON).unwrap();

    let artifacts = BuildArtifacts::from_files(&config_path, &theme_path).unwrap();
    assert_eq!(artifacts.config.default_locale, "he");
    assert!(artifacts.theme.content_scope.matches("app/[slug]/page.tsx"));

    let rendered: serde_json::Value =
        serde_json::from_str(&artifacts.to_json_pretty().unwrap()).unwrap();
    assert_eq!(rendered["config"]["defaultLocale"], "he");
    assert_eq!(rendered["theme"]["darkMode"], "class");
}

/// A malformed seed file surfaces as a config parse error
#[test]
fn test_malformed_config_file() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("next.config.json");
    let theme_path = temp_dir.path().join("theme.json");
    std::fs::write(&config_path, "{ not json").unwrap();
    std::fs::write(&theme_path, THEME_JSON).unwrap();

    let err = BuildArtifacts::from_files(&config_path, &theme_path).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

/// A default locale outside the locale set is a constraint violation
#[test]
fn test_default_locale_outside_locales() {
    let err = ConfigResolver::default()
        .resolve_json(r#"{"locales": ["en", "he"], "defaultLocale": "fr"}"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::ConstraintViolation { ref key, .. } if key == "defaultLocale"));
}

/// A gradient naming an undefined token fails the whole expansion
#[test]
fn test_unresolved_gradient_fails_expansion() {
    let mut seed = presets::magazine_theme();
    seed.colors.remove("secondary");
    let err = TokenExpander::default().expand(&seed).unwrap_err();
    assert!(matches!(
        err,
        TokenError::UnresolvedColorReference { ref gradient, ref token, weight: 500 }
            if gradient == "gradient-primary" && token == "secondary"
    ));
}

/// Unknown options are dropped leniently and rejected strictly
#[test]
fn test_unknown_option_modes() {
    init_tracing();
    let mut options = presets::magazine_config();
    options.insert("poweredByHeader".to_string(), OptionValue::from(false));

    let lenient = ConfigResolver::lenient().resolve(&options).unwrap();
    assert!(!lenient.strict_mode);

    let err = ConfigResolver::strict().resolve(&options).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownOption { ref key } if key == "poweredByHeader"));
}

const LOCALE_POOL: &[&str] = &["en", "he", "ar", "fr", "de", "en-US", "pt-BR", "zh-Hant"];

proptest! {
    /// Any locale set with a member as default resolves to that default
    #[test]
    fn prop_default_locale_member_resolves(
        (locales, index) in prop::sample::subsequence(LOCALE_POOL.to_vec(), 1..=LOCALE_POOL.len())
            .prop_flat_map(|locales| {
                let len = locales.len();
                (Just(locales), 0..len)
            })
    ) {
        let default = locales[index];
        let mut options = BTreeMap::new();
        options.insert("locales".to_string(), OptionValue::from(locales.clone()));
        options.insert("defaultLocale".to_string(), OptionValue::from(default));

        let config = ConfigResolver::default().resolve(&options).unwrap();
        prop_assert_eq!(config.default_locale.as_str(), default);
        prop_assert_eq!(config.locales.len(), locales.len());
    }

    /// Resolving the same option set twice serializes identically
    #[test]
    fn prop_config_resolution_is_idempotent(
        domains in prop::collection::btree_set("[a-z]{1,8}\\.(com|net|org)", 0..5)
    ) {
        let mut options = presets::magazine_config();
        options.remove("images");
        options.insert(
            "imageDomains".to_string(),
            OptionValue::from(domains.into_iter().collect::<Vec<_>>()),
        );

        let resolver = ConfigResolver::default();
        let first = serde_json::to_string(&resolver.resolve(&options).unwrap()).unwrap();
        let second = serde_json::to_string(&resolver.resolve(&options).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }
}
