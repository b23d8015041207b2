//! Background configuration types
//!
//! A background is either nothing, a CSS color, a CSS gradient, or a media
//! asset (image/gif/video). Media payloads are too large for the string
//! tier, so the background repository offloads them to the blob tier and
//! stores the `blob:stored` sentinel in the config's `value` instead.

use crate::transient::TransientBlobs;
use crate::validate::{self, format_file_size};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sentinel stored in a config's `value` when the real payload lives in
/// the blob tier. Never a renderable value.
pub const STORED_SENTINEL: &str = "blob:stored";

/// Kind of background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    /// No background; `value` is ignored by renderers
    None,
    /// CSS color, e.g. `#0f1117`
    Color,
    /// CSS gradient expression
    Gradient,
    Image,
    Gif,
    Video,
}

impl BackgroundKind {
    /// Get the string representation of the background kind
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundKind::None => "none",
            BackgroundKind::Color => "color",
            BackgroundKind::Gradient => "gradient",
            BackgroundKind::Image => "image",
            BackgroundKind::Gif => "gif",
            BackgroundKind::Video => "video",
        }
    }

    /// Whether this kind carries a binary media payload
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            BackgroundKind::Image | BackgroundKind::Gif | BackgroundKind::Video
        )
    }
}

impl FromStr for BackgroundKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(BackgroundKind::None),
            "color" => Ok(BackgroundKind::Color),
            "gradient" => Ok(BackgroundKind::Gradient),
            "image" => Ok(BackgroundKind::Image),
            "gif" => Ok(BackgroundKind::Gif),
            "video" => Ok(BackgroundKind::Video),
            _ => Err(Error::InvalidMedia(format!("Unknown background kind: {}", s))),
        }
    }
}

impl std::fmt::Display for BackgroundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The dashboard background configuration.
///
/// `blur` (0-10) and `dim` (0-100) are clamped by the editing UI; the
/// repository persists them as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundConfig {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    /// CSS color, gradient expression, or asset reference
    pub value: String,
    pub blur: u8,
    pub dim: u8,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::None,
            value: String::new(),
            blur: 0,
            dim: 0,
        }
    }
}

/// A named, ready-to-use gradient
#[derive(Debug, Clone, Copy)]
pub struct GradientPreset {
    pub name: &'static str,
    pub value: &'static str,
}

/// Predefined gradient presets offered by the background editor
pub const GRADIENT_PRESETS: &[GradientPreset] = &[
    GradientPreset {
        name: "Sunset",
        value: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
    },
    GradientPreset {
        name: "Ocean",
        value: "linear-gradient(135deg, #2E3192 0%, #1BFFFF 100%)",
    },
    GradientPreset {
        name: "Forest",
        value: "linear-gradient(135deg, #0F2027 0%, #203A43 50%, #2C5364 100%)",
    },
    GradientPreset {
        name: "Fire",
        value: "linear-gradient(135deg, #FF512F 0%, #DD2476 100%)",
    },
    GradientPreset {
        name: "Aurora",
        value: "linear-gradient(135deg, #00c6ff 0%, #0072ff 100%)",
    },
    GradientPreset {
        name: "Violet",
        value: "linear-gradient(135deg, #4e54c8 0%, #8f94fb 100%)",
    },
];

const BACKGROUND_IMAGE_MIMES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];
const BACKGROUND_VIDEO_MIMES: &[&str] = &["video/mp4", "video/webm"];

const BACKGROUND_IMAGE_LIMIT_MB: u64 = 20;
const BACKGROUND_VIDEO_LIMIT_MB: u64 = 100;

const IMAGE_WARN_MB: u64 = 5;
const VIDEO_WARN_MB: u64 = 20;

/// Validate a background upload by declared MIME type and size
pub fn validate_background_media(mime: &str, len: u64) -> Result<()> {
    if !BACKGROUND_IMAGE_MIMES.contains(&mime) && !BACKGROUND_VIDEO_MIMES.contains(&mime) {
        return Err(Error::InvalidMedia(
            "Invalid file type. Accepted: JPG, PNG, GIF, WebP, MP4, WebM".into(),
        ));
    }

    if mime.starts_with("video/") && len > BACKGROUND_VIDEO_LIMIT_MB * validate::MEGABYTE {
        return Err(Error::InvalidMedia(format!(
            "Video files should be under {}MB",
            BACKGROUND_VIDEO_LIMIT_MB
        )));
    }
    if mime.starts_with("image/") && len > BACKGROUND_IMAGE_LIMIT_MB * validate::MEGABYTE {
        return Err(Error::InvalidMedia(format!(
            "Image files should be under {}MB",
            BACKGROUND_IMAGE_LIMIT_MB
        )));
    }

    Ok(())
}

/// An uploaded background accepted into the transient registry
#[derive(Debug, Clone)]
pub struct IngestedMedia {
    /// Transient reference to hand to `BackgroundConfig::value`
    pub reference: String,
    pub kind: BackgroundKind,
    /// Present when the payload is large enough to slow rendering down
    pub warning: Option<String>,
}

/// Validate an uploaded media payload and register it as a transient
/// reference for preview and a later `save`
pub fn ingest_media(
    transients: &TransientBlobs,
    bytes: Vec<u8>,
    mime: &str,
) -> Result<IngestedMedia> {
    validate_background_media(mime, bytes.len() as u64)?;

    let kind = if mime == "image/gif" {
        BackgroundKind::Gif
    } else if mime.starts_with("video/") {
        BackgroundKind::Video
    } else {
        BackgroundKind::Image
    };

    let len = bytes.len() as u64;
    let warning = match kind {
        BackgroundKind::Image | BackgroundKind::Gif if len > IMAGE_WARN_MB * validate::MEGABYTE => {
            Some(format!("Large image ({})", format_file_size(len)))
        }
        BackgroundKind::Video if len > VIDEO_WARN_MB * validate::MEGABYTE => {
            Some(format!("Large video ({})", format_file_size(len)))
        }
        _ => None,
    };

    Ok(IngestedMedia {
        reference: transients.insert(bytes),
        kind,
        warning,
    })
}
