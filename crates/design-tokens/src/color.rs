//! Color tokens and shade ramps
//!
//! A color token is a named hue family whose shades are indexed by a weight on
//! the canonical scale. Every shade is supplied explicitly; missing weights are
//! never interpolated.

use crate::error::{Result, TokenError};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use token_validation::normalize_color;
use tracing::debug;

/// Weights a shade ramp may use, lightest to darkest
pub const CANONICAL_WEIGHTS: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Seed shape for colors: token name to weight (as written) to color value
pub type ColorSeed = BTreeMap<String, BTreeMap<String, String>>;

// =============================================================================
// Weights
// =============================================================================

/// A shade weight on the canonical scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Weight(u16);

impl Weight {
    /// The main shade of every ramp
    pub const MAIN: Weight = Weight(500);

    /// Create a weight if `value` is on the canonical scale
    pub fn new(value: u16) -> Option<Self> {
        CANONICAL_WEIGHTS.contains(&value).then_some(Self(value))
    }

    /// Parse a weight as written in a seed (`"50"`, `"500"`)
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse().ok().and_then(Self::new)
    }

    /// Numeric value
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Color Token
// =============================================================================

/// A named hue family with explicitly supplied shades
///
/// Shades are ordered by weight, lightest first. The 500 shade is always
/// present.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorToken {
    name: String,
    anchors: BTreeMap<Weight, String>,
}

impl ColorToken {
    /// Token name (e.g. `primary`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a shade by its numeric weight
    pub fn get(&self, weight: u16) -> Option<&str> {
        Weight::new(weight)
            .and_then(|w| self.anchors.get(&w))
            .map(String::as_str)
    }

    /// The main (500) shade
    pub fn main(&self) -> &str {
        self.anchors
            .get(&Weight::MAIN)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Weights present in the ramp, lightest first
    pub fn weights(&self) -> impl Iterator<Item = u16> + '_ {
        self.anchors.keys().map(Weight::value)
    }

    /// All shades, lightest first
    pub fn anchors(&self) -> &BTreeMap<Weight, String> {
        &self.anchors
    }

    /// Number of shades
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether the ramp has no shades (never true for an expanded token)
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl Serialize for ColorToken {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.anchors.serialize(serializer)
    }
}

/// Validate one ramp and build its token
fn expand_ramp(name: &str, ramp: &BTreeMap<String, String>) -> Result<ColorToken> {
    let incomplete = |reason: String| TokenError::IncompleteColorRamp {
        token: name.to_string(),
        reason,
    };

    let mut anchors = BTreeMap::new();
    for (raw_weight, value) in ramp {
        let weight = Weight::parse(raw_weight).ok_or_else(|| {
            incomplete(format!(
                "weight '{raw_weight}' is not on the canonical scale (50, 100, 200, ..., 900, 950)"
            ))
        })?;

        let color = normalize_color(value).ok_or_else(|| TokenError::InvalidColorValue {
            token: name.to_string(),
            weight: raw_weight.clone(),
            value: value.clone(),
        })?;

        if anchors.insert(weight, color).is_some() {
            return Err(incomplete(format!("weight {weight} is supplied more than once")));
        }
    }

    if !anchors.contains_key(&Weight::MAIN) {
        return Err(incomplete(format!("missing main shade {}", Weight::MAIN)));
    }

    Ok(ColorToken {
        name: name.to_string(),
        anchors,
    })
}

/// Expand seed ramps into color tokens
///
/// Fails with [`TokenError::IncompleteColorRamp`] when a ramp uses an
/// off-scale weight or lacks the 500 shade.
///
/// ```rust
/// use design_tokens::{expand_colors, ColorSeed};
///
/// let mut seed = ColorSeed::new();
/// seed.insert(
///     "primary".to_string(),
///     [("50", "#fdf2f8"), ("500", "#ec4899")]
///         .into_iter()
///         .map(|(w, c)| (w.to_string(), c.to_string()))
///         .collect(),
/// );
///
/// let colors = expand_colors(&seed).unwrap();
/// assert_eq!(colors["primary"].main(), "#ec4899");
/// ```
pub fn expand_colors(seed: &ColorSeed) -> Result<BTreeMap<String, ColorToken>> {
    let colors = seed
        .iter()
        .map(|(name, ramp)| expand_ramp(name, ramp).map(|token| (name.clone(), token)))
        .collect::<Result<BTreeMap<_, _>>>()?;

    debug!(tokens = colors.len(), "Expanded color ramps");
    Ok(colors)
}
