//! Built-in seeds for the magazine site
//!
//! Bilingual (Hebrew default, English) with the pink, red, orange and slate
//! palette.

use build_config::OptionValue;
use design_tokens::{
    AnimationSpec, ColorSeed, DarkMode, GradientSpec, KeyframeEntry, KeyframesSpec, StopRef,
    ThemeSeed,
};
use std::collections::BTreeMap;

const CONTENT_EXTENSIONS: &str = "{js,ts,jsx,tsx,mdx}";

/// Build options for the magazine site, in the nested layout authors write
pub fn magazine_config() -> BTreeMap<String, OptionValue> {
    let mut images = BTreeMap::new();
    images.insert(
        "domains".to_string(),
        OptionValue::from(vec!["res.cloudinary.com", "images.unsplash.com"]),
    );
    images.insert(
        "formats".to_string(),
        OptionValue::from(vec!["image/avif", "image/webp"]),
    );

    let mut i18n = BTreeMap::new();
    i18n.insert("locales".to_string(), OptionValue::from(vec!["he", "en"]));
    i18n.insert("defaultLocale".to_string(), OptionValue::from("he"));

    let mut experimental = BTreeMap::new();
    experimental.insert("optimizeCss".to_string(), true);

    let mut config = BTreeMap::new();
    config.insert("reactStrictMode".to_string(), OptionValue::from(true));
    config.insert("swcMinify".to_string(), OptionValue::from(true));
    config.insert("images".to_string(), OptionValue::from(images));
    config.insert("i18n".to_string(), OptionValue::from(i18n));
    config.insert("experimental".to_string(), OptionValue::from(experimental));
    config
}

fn ramp(shades: &[(u16, &str)]) -> BTreeMap<String, String> {
    shades
        .iter()
        .map(|(weight, color)| (weight.to_string(), color.to_string()))
        .collect()
}

fn stack(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn magazine_colors() -> ColorSeed {
    let mut colors = ColorSeed::new();
    colors.insert(
        "primary".to_string(),
        ramp(&[
            (50, "#fdf2f8"),
            (100, "#fce7f3"),
            (200, "#fbcfe8"),
            (300, "#f9a8d4"),
            (400, "#f472b6"),
            (500, "#ec4899"),
            (600, "#db2777"),
            (700, "#be185d"),
            (800, "#9f1239"),
            (900, "#881337"),
        ]),
    );
    colors.insert(
        "secondary".to_string(),
        ramp(&[
            (50, "#fef2f2"),
            (100, "#fee2e2"),
            (200, "#fecaca"),
            (300, "#fca5a5"),
            (400, "#f87171"),
            (500, "#f43f5e"),
            (600, "#e11d48"),
            (700, "#be123c"),
            (800, "#9f1239"),
            (900, "#881337"),
        ]),
    );
    colors.insert(
        "accent".to_string(),
        ramp(&[
            (50, "#fff7ed"),
            (100, "#ffedd5"),
            (200, "#fed7aa"),
            (300, "#fdba74"),
            (400, "#fb923c"),
            (500, "#f97316"),
            (600, "#ea580c"),
            (700, "#c2410c"),
            (800, "#9a3412"),
            (900, "#7c2d12"),
        ]),
    );
    colors.insert(
        "dark".to_string(),
        ramp(&[
            (50, "#f8fafc"),
            (100, "#f1f5f9"),
            (200, "#e2e8f0"),
            (300, "#cbd5e1"),
            (400, "#94a3b8"),
            (500, "#64748b"),
            (600, "#475569"),
            (700, "#334155"),
            (800, "#1e293b"),
            (900, "#0f172a"),
            (950, "#020617"),
        ]),
    );
    colors
}

/// Theme seed for the magazine site
pub fn magazine_theme() -> ThemeSeed {
    let mut font_family = BTreeMap::new();
    font_family.insert("sans".to_string(), stack(&["Assistant", "system-ui", "sans-serif"]));
    font_family.insert("serif".to_string(), stack(&["Frank Ruhl Libre", "Georgia", "serif"]));
    font_family.insert("heading".to_string(), stack(&["Frank Ruhl Libre", "Georgia", "serif"]));

    ThemeSeed {
        content: ["pages", "components", "app"]
            .iter()
            .map(|dir| format!("./{dir}/**/*.{CONTENT_EXTENSIONS}"))
            .collect(),
        dark_mode: DarkMode::Class,
        colors: magazine_colors(),
        font_family,
        gradients: vec![
            GradientSpec::new(
                "gradient-primary",
                135.0,
                vec![StopRef::token("primary", 500), StopRef::token("secondary", 500)],
            ),
            GradientSpec::new(
                "gradient-secondary",
                135.0,
                vec![StopRef::token("secondary", 500), StopRef::token("accent", 400)],
            ),
            GradientSpec::new(
                "gradient-full",
                135.0,
                vec![
                    StopRef::token("primary", 500),
                    StopRef::token("secondary", 500),
                    StopRef::token("accent", 400),
                    StopRef::literal("#fbbf24"),
                ],
            ),
            GradientSpec::new(
                "gradient-dark",
                135.0,
                vec![StopRef::token("dark", 800), StopRef::token("dark", 900)],
            ),
        ],
        animations: vec![
            AnimationSpec::new("pulse-slow", "pulse 4s ease-in-out infinite"),
            AnimationSpec::new("gradient", "gradient 8s ease infinite"),
        ],
        keyframes: vec![KeyframesSpec::new(
            "gradient",
            vec![
                KeyframeEntry::new("0%, 100%", &[("backgroundPosition", "0% 50%")]),
                KeyframeEntry::new("50%", &[("backgroundPosition", "100% 50%")]),
            ],
        )],
        plugins: vec![
            "@tailwindcss/typography".to_string(),
            "@tailwindcss/forms".to_string(),
        ],
    }
}
