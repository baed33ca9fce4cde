//! Gradient tokens
//!
//! Gradients are written as an angle and an ordered list of stops. A stop is
//! either a reference to a color token shade or a literal CSS color.

use crate::color::{ColorToken, Weight};
use crate::error::{Result, TokenError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use token_validation::normalize_color;
use tracing::debug;

/// Angle used when a gradient does not specify one (top to bottom)
pub const DEFAULT_ANGLE: f64 = 180.0;

fn default_angle() -> f64 {
    DEFAULT_ANGLE
}

/// A gradient stop as written in a seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum StopRef {
    /// Reference to a color token shade; the main shade when `weight` is omitted
    Token {
        /// Color token name
        token: String,
        /// Shade weight
        #[serde(default)]
        weight: Option<u16>,
    },
    /// Literal CSS color
    Literal(String),
}

impl StopRef {
    /// Reference a token shade
    pub fn token(token: impl Into<String>, weight: u16) -> Self {
        StopRef::Token {
            token: token.into(),
            weight: Some(weight),
        }
    }

    /// Literal color stop
    pub fn literal(color: impl Into<String>) -> Self {
        StopRef::Literal(color.into())
    }
}

/// A gradient definition as written in a seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradientSpec {
    /// Gradient name (e.g. `gradient-primary`)
    pub name: String,
    /// Angle in degrees
    #[serde(default = "default_angle")]
    pub angle: f64,
    /// Stops in gradient direction
    pub stops: Vec<StopRef>,
}

impl GradientSpec {
    /// Create a gradient definition
    pub fn new(name: impl Into<String>, angle: f64, stops: Vec<StopRef>) -> Self {
        Self {
            name: name.into(),
            angle,
            stops,
        }
    }
}

/// A gradient whose stops are resolved to concrete colors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientToken {
    /// Gradient name
    pub name: String,
    /// Angle in degrees
    pub angle: f64,
    /// Resolved stop colors in order
    pub stops: Vec<String>,
}

impl GradientToken {
    /// Render as a CSS `linear-gradient(...)` value
    pub fn to_css(&self) -> String {
        format!("linear-gradient({}deg, {})", self.angle, self.stops.join(", "))
    }
}

/// Resolve one gradient definition against the color tokens
pub fn resolve_gradient(
    spec: &GradientSpec,
    colors: &BTreeMap<String, ColorToken>,
) -> Result<GradientToken> {
    let invalid = |reason: String| TokenError::InvalidGradient {
        name: spec.name.clone(),
        reason,
    };

    if !spec.angle.is_finite() {
        return Err(invalid(format!("angle {} is not a finite number", spec.angle)));
    }
    if spec.stops.len() < 2 {
        return Err(invalid(format!(
            "needs at least two stops, found {}",
            spec.stops.len()
        )));
    }

    let stops = spec
        .stops
        .iter()
        .enumerate()
        .map(|(index, stop)| match stop {
            StopRef::Token { token, weight } => {
                let weight = weight.unwrap_or(Weight::MAIN.value());
                colors
                    .get(token)
                    .and_then(|t| t.get(weight))
                    .map(str::to_string)
                    .ok_or_else(|| TokenError::UnresolvedColorReference {
                        gradient: spec.name.clone(),
                        token: token.clone(),
                        weight,
                    })
            }
            StopRef::Literal(value) => {
                normalize_color(value).ok_or_else(|| TokenError::InvalidColorValue {
                    token: spec.name.clone(),
                    weight: format!("stop {index}"),
                    value: value.clone(),
                })
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(GradientToken {
        name: spec.name.clone(),
        angle: spec.angle,
        stops,
    })
}

/// Resolve gradient definitions into rendered CSS values keyed by name
///
/// Stop order and angle are preserved. Fails with
/// [`TokenError::UnresolvedColorReference`] when a stop names a missing token
/// or weight.
pub fn resolve_gradients(
    defs: &[GradientSpec],
    colors: &BTreeMap<String, ColorToken>,
) -> Result<BTreeMap<String, String>> {
    let mut seen = HashSet::with_capacity(defs.len());
    let mut gradients = BTreeMap::new();

    for spec in defs {
        if !seen.insert(spec.name.as_str()) {
            return Err(TokenError::InvalidGradient {
                name: spec.name.clone(),
                reason: "defined more than once".to_string(),
            });
        }
        let token = resolve_gradient(spec, colors)?;
        gradients.insert(token.name.clone(), token.to_css());
    }

    debug!(gradients = gradients.len(), "Resolved gradients");
    Ok(gradients)
}
