//! Image encodings supported by the optimization pipeline

use serde::{Deserialize, Serialize};

/// Output encodings the image pipeline can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImageFormat {
    /// AVIF
    #[serde(rename = "image/avif")]
    Avif,
    /// WebP
    #[serde(rename = "image/webp")]
    Webp,
    /// PNG
    #[serde(rename = "image/png")]
    Png,
    /// JPEG
    #[serde(rename = "image/jpeg")]
    Jpeg,
}

impl ImageFormat {
    /// All supported formats
    pub const ALL: [ImageFormat; 4] = [
        ImageFormat::Avif,
        ImageFormat::Webp,
        ImageFormat::Png,
        ImageFormat::Jpeg,
    ];

    /// MIME type of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Avif => "image/avif",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    /// Parse a format from its MIME type
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.as_str() == s)
    }

    /// Comma-separated list of supported MIME types
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(ImageFormat::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
