//! Design-token expansion for the utility-class generator
//!
//! This crate expands a small seed of named tokens into the complete,
//! consistently-shaped theme the generator consumes.
//!
//! # Modules
//!
//! - [`color`] - Shade ramps keyed by canonical weights
//! - [`gradient`] - Gradients referencing color tokens
//! - [`animation`] - Keyframe sets and the animations bound to them
//! - [`typography`] - Font stacks with generic fallbacks
//! - [`content`] - Content-scanning globs
//! - [`theme`] - Seed document, resolved theme and the expander
//!
//! # Example
//!
//! ```rust
//! use design_tokens::{ThemeSeed, TokenExpander};
//!
//! let seed = ThemeSeed::from_json_str(r##"{
//!     "content": ["./pages/**/*.tsx"],
//!     "colors": { "primary": { "50": "#fdf2f8", "500": "#ec4899", "900": "#881337" } },
//!     "gradients": [
//!         { "name": "gradient-primary", "angle": 135,
//!           "stops": [{ "token": "primary", "weight": 500 }, "#f43f5e"] }
//!     ]
//! }"##).unwrap();
//!
//! let theme = TokenExpander::default().expand(&seed).unwrap();
//! assert_eq!(theme.gradients["gradient-primary"], "linear-gradient(135deg, #ec4899, #f43f5e)");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod animation;
pub mod color;
pub mod content;
pub mod error;
pub mod gradient;
pub mod theme;
pub mod typography;

// Re-export commonly used types
pub use animation::{
    builtin_keyframes, resolve_animations, resolve_animations_with, AnimationSpec,
    AnimationToken, IterationPolicy, Keyframe, KeyframeEntry, KeyframeOffset, KeyframesSpec,
};
pub use color::{expand_colors, ColorSeed, ColorToken, Weight, CANONICAL_WEIGHTS};
pub use content::{resolve_content_scope, ContentScope};
pub use error::{Result, TokenError};
pub use gradient::{resolve_gradient, resolve_gradients, GradientSpec, GradientToken, StopRef};
pub use theme::{DarkMode, ExpanderConfig, ResolvedTheme, ThemeSeed, TokenExpander};
pub use typography::{resolve_font_families, FontStack, GENERIC_FAMILIES};
