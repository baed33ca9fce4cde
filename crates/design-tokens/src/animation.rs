//! Keyframe sets and animation bindings
//!
//! Animations are written as CSS `animation` shorthands
//! (`"pulse 4s ease-in-out infinite"`) and bound to a keyframe set by name.
//! Keyframe sets come from the seed plus a small built-in library; a seed set
//! overrides the built-in set of the same name.
//!
//! Every animation must bind to a known keyframe set, and every keyframe set
//! declared in the seed must be used by at least one animation.

use crate::error::{Result, TokenError};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use token_validation::{find_duplicate_by, parse_css_time};
use tracing::debug;

/// Timing function used when the shorthand names none
pub const DEFAULT_TIMING_FUNCTION: &str = "ease";

/// Timing keywords accepted in a shorthand
const TIMING_KEYWORDS: &[&str] = &[
    "linear",
    "ease",
    "ease-in",
    "ease-out",
    "ease-in-out",
    "step-start",
    "step-end",
];

/// Timing functions written with arguments
const TIMING_FUNCTIONS: &[&str] = &["cubic-bezier(", "steps(", "linear("];

/// `animation-direction` keywords
const DIRECTION_KEYWORDS: &[&str] = &["normal", "reverse", "alternate", "alternate-reverse"];

/// `animation-fill-mode` keywords
const FILL_MODE_KEYWORDS: &[&str] = &["none", "forwards", "backwards", "both"];

/// `animation-play-state` keywords
const PLAY_STATE_KEYWORDS: &[&str] = &["running", "paused"];

// =============================================================================
// Keyframe Offsets
// =============================================================================

/// A keyframe offset as a percentage of the animation's duration
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct KeyframeOffset(f64);

impl KeyframeOffset {
    /// `from` / `0%`
    pub const START: KeyframeOffset = KeyframeOffset(0.0);
    /// `to` / `100%`
    pub const END: KeyframeOffset = KeyframeOffset(100.0);

    /// Parse `from`, `to` or a percentage between 0% and 100%
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "from" => Some(Self::START),
            "to" => Some(Self::END),
            other => {
                let percent: f64 = other.strip_suffix('%')?.parse().ok()?;
                (percent.is_finite() && (0.0..=100.0).contains(&percent)).then_some(Self(percent))
            }
        }
    }

    /// Offset as a percentage
    pub fn percent(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for KeyframeOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Serialize for KeyframeOffset {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Seed Definitions
// =============================================================================

/// One keyframe entry as written in a seed
///
/// `offset` may list several offsets sharing the same styles (`"0%, 100%"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyframeEntry {
    /// Offset selector
    pub offset: String,
    /// Style properties (camelCase or kebab-case) to values
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
}

impl KeyframeEntry {
    /// Create an entry from an offset selector and style pairs
    pub fn new(offset: &str, styles: &[(&str, &str)]) -> Self {
        Self {
            offset: offset.to_string(),
            styles: styles
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// A named keyframe set as written in a seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyframesSpec {
    /// Keyframe set name (`@keyframes <name>`)
    pub name: String,
    /// Entries in offset order
    pub frames: Vec<KeyframeEntry>,
}

impl KeyframesSpec {
    /// Create a keyframe set
    pub fn new(name: impl Into<String>, frames: Vec<KeyframeEntry>) -> Self {
        Self {
            name: name.into(),
            frames,
        }
    }
}

/// An animation as written in a seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationSpec {
    /// Animation utility name (e.g. `pulse-slow`)
    pub name: String,
    /// CSS `animation` shorthand (e.g. `pulse 4s ease-in-out infinite`)
    pub value: String,
}

impl AnimationSpec {
    /// Create an animation definition
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Keyframe sets every theme may bind to without declaring them
pub fn builtin_keyframes() -> Vec<KeyframesSpec> {
    vec![
        KeyframesSpec::new(
            "spin",
            vec![
                KeyframeEntry::new("from", &[("transform", "rotate(0deg)")]),
                KeyframeEntry::new("to", &[("transform", "rotate(360deg)")]),
            ],
        ),
        KeyframesSpec::new(
            "pulse",
            vec![
                KeyframeEntry::new("0%, 100%", &[("opacity", "1")]),
                KeyframeEntry::new("50%", &[("opacity", ".5")]),
            ],
        ),
        KeyframesSpec::new(
            "bounce",
            vec![
                KeyframeEntry::new(
                    "0%, 100%",
                    &[
                        ("transform", "translateY(-25%)"),
                        ("animationTimingFunction", "cubic-bezier(0.8, 0, 1, 1)"),
                    ],
                ),
                KeyframeEntry::new(
                    "50%",
                    &[
                        ("transform", "none"),
                        ("animationTimingFunction", "cubic-bezier(0, 0, 0.2, 1)"),
                    ],
                ),
            ],
        ),
    ]
}

// =============================================================================
// Resolved Tokens
// =============================================================================

/// A validated keyframe entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyframe {
    /// Offsets sharing these styles, increasing
    pub offsets: Vec<KeyframeOffset>,
    /// Style properties to values
    pub styles: BTreeMap<String, String>,
}

impl Keyframe {
    /// Offset selector (`0%, 100%`)
    pub fn selector(&self) -> String {
        self.offsets
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// How many times an animation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationPolicy {
    /// A finite number of cycles
    Count(u32),
    /// Repeat forever
    Infinite,
}

impl Default for IterationPolicy {
    fn default() -> Self {
        IterationPolicy::Count(1)
    }
}

impl std::fmt::Display for IterationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IterationPolicy::Count(n) => write!(f, "{n}"),
            IterationPolicy::Infinite => write!(f, "infinite"),
        }
    }
}

impl Serialize for IterationPolicy {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            IterationPolicy::Count(n) => serializer.serialize_u32(*n),
            IterationPolicy::Infinite => serializer.serialize_str("infinite"),
        }
    }
}

/// An animation bound to its keyframe definition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationToken {
    /// Animation utility name
    pub name: String,
    /// Name of the bound keyframe set
    pub keyframes_name: String,
    /// The bound keyframe entries
    pub keyframes: Vec<Keyframe>,
    /// CSS timing function
    pub timing_function: String,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Delay in milliseconds
    pub delay_ms: u64,
    /// Iteration policy
    pub iterations: IterationPolicy,
    /// `animation-direction`, when given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// `animation-fill-mode`, when given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_mode: Option<String>,
    /// `animation-play-state`, when given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_state: Option<String>,
}

impl AnimationToken {
    /// Render as a CSS `animation` value
    ///
    /// The delay is omitted when zero and the iteration count when one.
    /// Direction, fill mode and play state follow only when given.
    pub fn to_css_value(&self) -> String {
        let mut parts = vec![
            self.keyframes_name.clone(),
            format_time(self.duration_ms),
            self.timing_function.clone(),
        ];
        if self.delay_ms > 0 {
            parts.push(format_time(self.delay_ms));
        }
        if self.iterations != IterationPolicy::Count(1) {
            parts.push(self.iterations.to_string());
        }
        parts.extend(
            [&self.direction, &self.fill_mode, &self.play_state]
                .into_iter()
                .flatten()
                .cloned(),
        );
        parts.join(" ")
    }

    /// Render the bound keyframe set as a CSS `@keyframes` block
    pub fn keyframes_css(&self) -> String {
        let mut css = format!("@keyframes {} {{\n", self.keyframes_name);
        for frame in &self.keyframes {
            css.push_str(&format!("  {} {{\n", frame.selector()));
            for (property, value) in &frame.styles {
                css.push_str(&format!("    {}: {};\n", kebab_case(property), value));
            }
            css.push_str("  }\n");
        }
        css.push('}');
        css
    }
}

/// Format milliseconds as a CSS time, preferring whole seconds
fn format_time(ms: u64) -> String {
    if ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        format!("{ms}ms")
    }
}

/// Convert a camelCase property name to kebab-case
fn kebab_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

// =============================================================================
// Keyframe Validation
// =============================================================================

/// Validate a keyframe set against the offset ordering contract
///
/// Offsets within an entry must increase, each entry's first offset must be
/// greater than the previous entry's, and no offset may repeat.
fn validate_keyframes(spec: &KeyframesSpec) -> Result<Vec<Keyframe>> {
    let invalid = |reason: String| TokenError::InvalidKeyframeSequence {
        keyframes: spec.name.clone(),
        reason,
    };

    if spec.frames.len() < 2 {
        return Err(invalid(format!(
            "needs at least two keyframe entries, found {}",
            spec.frames.len()
        )));
    }

    let mut seen: Vec<KeyframeOffset> = Vec::new();
    let mut previous_first: Option<KeyframeOffset> = None;
    let mut frames = Vec::with_capacity(spec.frames.len());

    for entry in &spec.frames {
        let offsets = entry
            .offset
            .split(',')
            .map(|raw| KeyframeOffset::parse(raw).ok_or_else(|| invalid(format!("invalid offset '{}'", raw.trim()))))
            .collect::<Result<Vec<_>>>()?;

        if offsets.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(invalid(format!("offsets in '{}' are not increasing", entry.offset)));
        }

        let first = offsets[0];
        if previous_first.is_some_and(|prev| first <= prev) {
            return Err(invalid(format!(
                "entry '{}' is out of order",
                entry.offset
            )));
        }
        if let Some(dup) = offsets.iter().find(|o| seen.contains(o)) {
            return Err(invalid(format!("offset {dup} appears more than once")));
        }

        if let Some(property) = entry.styles.keys().find(|k| k.trim().is_empty()) {
            return Err(invalid(format!("empty style property '{property}' in '{}'", entry.offset)));
        }

        seen.extend(offsets.iter().copied());
        previous_first = Some(first);
        frames.push(Keyframe {
            offsets,
            styles: entry.styles.clone(),
        });
    }

    Ok(frames)
}

// =============================================================================
// Shorthand Parsing
// =============================================================================

/// Fields parsed from an `animation` shorthand
#[derive(Debug, Default)]
struct Shorthand {
    keyframes: Option<String>,
    duration_ms: Option<u64>,
    delay_ms: Option<u64>,
    timing_function: Option<String>,
    iterations: Option<IterationPolicy>,
    direction: Option<String>,
    fill_mode: Option<String>,
    play_state: Option<String>,
}

/// Store a keyword in its slot, rejecting a second keyword for the same property
fn set_keyword(
    slot: &mut Option<String>,
    property: &str,
    token: &str,
) -> std::result::Result<(), String> {
    match slot.replace(token.to_string()) {
        Some(existing) => Err(format!(
            "{property} given twice ('{existing}' and '{token}')"
        )),
        None => Ok(()),
    }
}

/// Split on whitespace outside parentheses
fn split_shorthand(value: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in value.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn is_timing_function(token: &str) -> bool {
    TIMING_KEYWORDS.contains(&token)
        || (TIMING_FUNCTIONS.iter().any(|f| token.starts_with(f)) && token.ends_with(')'))
}

fn is_keyframes_name(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '-')
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn parse_shorthand(spec: &AnimationSpec) -> Result<Shorthand> {
    let invalid = |reason: String| TokenError::InvalidAnimation {
        name: spec.name.clone(),
        reason,
    };

    let mut parsed = Shorthand::default();
    for token in split_shorthand(&spec.value) {
        if let Some(ms) = parse_css_time(&token) {
            if parsed.duration_ms.is_none() {
                parsed.duration_ms = Some(ms);
            } else if parsed.delay_ms.is_none() {
                parsed.delay_ms = Some(ms);
            } else {
                return Err(invalid(format!("unexpected third time value '{token}'")));
            }
        } else if is_timing_function(&token) {
            if parsed.timing_function.replace(token.clone()).is_some() {
                return Err(invalid(format!("timing function given twice at '{token}'")));
            }
        } else if token == "infinite" || token.chars().all(|c| c.is_ascii_digit()) {
            let policy = match token.parse::<u32>() {
                Ok(0) => return Err(invalid("iteration count must be positive".to_string())),
                Ok(n) => IterationPolicy::Count(n),
                Err(_) if token == "infinite" => IterationPolicy::Infinite,
                Err(_) => return Err(invalid(format!("iteration count '{token}' is out of range"))),
            };
            if parsed.iterations.replace(policy).is_some() {
                return Err(invalid(format!("iteration count given twice at '{token}'")));
            }
        } else if DIRECTION_KEYWORDS.contains(&token.as_str()) {
            set_keyword(&mut parsed.direction, "direction", &token).map_err(invalid)?;
        } else if FILL_MODE_KEYWORDS.contains(&token.as_str()) {
            set_keyword(&mut parsed.fill_mode, "fill mode", &token).map_err(invalid)?;
        } else if PLAY_STATE_KEYWORDS.contains(&token.as_str()) {
            set_keyword(&mut parsed.play_state, "play state", &token).map_err(invalid)?;
        } else if is_keyframes_name(&token) {
            if let Some(existing) = parsed.keyframes.replace(token.clone()) {
                return Err(invalid(format!(
                    "unexpected token '{token}' after keyframes name '{existing}'"
                )));
            }
        } else {
            return Err(invalid(format!("unrecognized token '{token}'")));
        }
    }

    if parsed.keyframes.is_none() {
        return Err(invalid("missing keyframes name".to_string()));
    }
    if parsed.duration_ms.is_none() {
        return Err(invalid("missing duration".to_string()));
    }
    Ok(parsed)
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve animations against the seed keyframes and the built-in library
pub fn resolve_animations(
    defs: &[AnimationSpec],
    keyframes: &[KeyframesSpec],
) -> Result<BTreeMap<String, AnimationToken>> {
    resolve_animations_with(defs, keyframes, true)
}

/// Resolve animations, optionally without the built-in keyframe library
///
/// Fails with [`TokenError::InvalidKeyframeSequence`] on a malformed keyframe
/// set, [`TokenError::OrphanedAnimation`] when an animation names an unknown
/// set and [`TokenError::OrphanedKeyframes`] when a seed set goes unused.
pub fn resolve_animations_with(
    defs: &[AnimationSpec],
    keyframes: &[KeyframesSpec],
    include_builtins: bool,
) -> Result<BTreeMap<String, AnimationToken>> {
    if let Some(dup) = find_duplicate_by(keyframes, |k| k.name.as_str()) {
        return Err(TokenError::InvalidKeyframeSequence {
            keyframes: dup.name.clone(),
            reason: "defined more than once".to_string(),
        });
    }
    if let Some(dup) = find_duplicate_by(defs, |a| a.name.as_str()) {
        return Err(TokenError::InvalidAnimation {
            name: dup.name.clone(),
            reason: "defined more than once".to_string(),
        });
    }

    let mut library: BTreeMap<String, Vec<Keyframe>> = BTreeMap::new();
    if include_builtins {
        for spec in builtin_keyframes() {
            library.insert(spec.name.clone(), validate_keyframes(&spec)?);
        }
    }
    for spec in keyframes {
        library.insert(spec.name.clone(), validate_keyframes(spec)?);
    }

    let mut used = HashSet::new();
    let mut animations = BTreeMap::new();
    for spec in defs {
        let shorthand = parse_shorthand(spec)?;
        let keyframes_name = shorthand.keyframes.unwrap_or_default();
        let frames = library
            .get(&keyframes_name)
            .ok_or_else(|| TokenError::OrphanedAnimation {
                name: spec.name.clone(),
                keyframes: keyframes_name.clone(),
            })?;

        used.insert(keyframes_name.clone());
        animations.insert(
            spec.name.clone(),
            AnimationToken {
                name: spec.name.clone(),
                keyframes: frames.clone(),
                keyframes_name,
                timing_function: shorthand
                    .timing_function
                    .unwrap_or_else(|| DEFAULT_TIMING_FUNCTION.to_string()),
                duration_ms: shorthand.duration_ms.unwrap_or_default(),
                delay_ms: shorthand.delay_ms.unwrap_or_default(),
                iterations: shorthand.iterations.unwrap_or_default(),
                direction: shorthand.direction,
                fill_mode: shorthand.fill_mode,
                play_state: shorthand.play_state,
            },
        );
    }

    let declared: BTreeSet<&str> = keyframes.iter().map(|k| k.name.as_str()).collect();
    if let Some(orphan) = declared.into_iter().find(|name| !used.contains(*name)) {
        return Err(TokenError::OrphanedKeyframes {
            name: orphan.to_string(),
        });
    }

    debug!(
        animations = animations.len(),
        keyframe_sets = used.len(),
        "Resolved animations"
    );
    Ok(animations)
}
