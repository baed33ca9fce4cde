//! Token expansion errors

use thiserror::Error;

/// Errors raised while expanding design tokens
///
/// Every variant names the offending token, definition or pattern.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Shade ramp has off-scale weights or lacks the main shade
    #[error("Incomplete color ramp '{token}': {reason}")]
    IncompleteColorRamp {
        /// Color token name
        token: String,
        /// What is wrong with the ramp
        reason: String,
    },

    /// Shade value is not a CSS color
    #[error("Invalid color value for '{token}' at {weight}: {value}")]
    InvalidColorValue {
        /// Color token or gradient name
        token: String,
        /// Weight or stop position the value was given for
        weight: String,
        /// The rejected value
        value: String,
    },

    /// Gradient stop references a missing token or weight
    #[error("Gradient '{gradient}' references undefined color {token}-{weight}")]
    UnresolvedColorReference {
        /// Gradient name
        gradient: String,
        /// Referenced color token
        token: String,
        /// Referenced weight
        weight: u16,
    },

    /// Gradient definition is malformed
    #[error("Invalid gradient '{name}': {reason}")]
    InvalidGradient {
        /// Gradient name
        name: String,
        /// What is wrong with the definition
        reason: String,
    },

    /// Keyframe offsets break the start/intermediate/end ordering
    #[error("Invalid keyframe sequence '{keyframes}': {reason}")]
    InvalidKeyframeSequence {
        /// Keyframe set name
        keyframes: String,
        /// What is wrong with the sequence
        reason: String,
    },

    /// Animation shorthand is malformed
    #[error("Invalid animation '{name}': {reason}")]
    InvalidAnimation {
        /// Animation name
        name: String,
        /// What is wrong with the shorthand
        reason: String,
    },

    /// Animation binds to a keyframe set that is not defined
    #[error("Animation '{name}' references undefined keyframes '{keyframes}'")]
    OrphanedAnimation {
        /// Animation name
        name: String,
        /// Missing keyframe set
        keyframes: String,
    },

    /// Keyframe set is defined but no animation uses it
    #[error("Keyframes '{name}' are not used by any animation")]
    OrphanedKeyframes {
        /// Keyframe set name
        name: String,
    },

    /// Font stack does not end in a generic family
    #[error("Font family '{family}' has no generic fallback")]
    MissingFontFallback {
        /// Font family token name
        family: String,
    },

    /// Font stack is malformed
    #[error("Invalid font stack '{family}': {reason}")]
    InvalidFontStack {
        /// Font family token name
        family: String,
        /// What is wrong with the stack
        reason: String,
    },

    /// No content globs were given
    #[error("Content scope is empty")]
    EmptyContentScope,

    /// Content glob is absolute or syntactically invalid
    #[error("Invalid content pattern '{pattern}': {reason}")]
    InvalidContentPattern {
        /// The rejected pattern
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// Seed document is not valid JSON
    #[error("Failed to parse theme seed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TokenError {
    /// Name of the offending token, definition or pattern, if any
    pub fn subject(&self) -> Option<&str> {
        match self {
            TokenError::IncompleteColorRamp { token, .. }
            | TokenError::InvalidColorValue { token, .. } => Some(token),
            TokenError::UnresolvedColorReference { gradient, .. } => Some(gradient),
            TokenError::InvalidGradient { name, .. }
            | TokenError::InvalidAnimation { name, .. }
            | TokenError::OrphanedAnimation { name, .. }
            | TokenError::OrphanedKeyframes { name } => Some(name),
            TokenError::InvalidKeyframeSequence { keyframes, .. } => Some(keyframes),
            TokenError::MissingFontFallback { family }
            | TokenError::InvalidFontStack { family, .. } => Some(family),
            TokenError::InvalidContentPattern { pattern, .. } => Some(pattern),
            TokenError::EmptyContentScope | TokenError::Parse(_) => None,
        }
    }
}

/// Result type for token expansion
pub type Result<T> = std::result::Result<T, TokenError>;
