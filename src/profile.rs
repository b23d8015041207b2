//! Profile types - identity card shown in the dashboard header
//!
//! The avatar is a tagged union: either a remote URL or an embedded data
//! URI, each with a media type the renderer switches on. A first-generation
//! format stored a bare `avatarUrl` string; the profile repository upgrades
//! that shape on load.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Media type of an avatar or background asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Gif,
    Video,
}

impl MediaType {
    /// Get the string representation of the media type
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Gif => "gif",
            MediaType::Video => "video",
        }
    }

    /// Classify a MIME type; anything that is not a gif or video is an image
    pub fn from_mime(mime: &str) -> Self {
        if mime == "image/gif" {
            MediaType::Gif
        } else if mime.starts_with("video/") {
            MediaType::Video
        } else {
            MediaType::Image
        }
    }

    /// Classify a URL by its extension; anything unrecognized is an image
    pub fn from_url(url: &str) -> Self {
        let url = url.to_lowercase();

        if url.ends_with(".gif") {
            MediaType::Gif
        } else if url.ends_with(".mp4") || url.ends_with(".webm") {
            MediaType::Video
        } else {
            MediaType::Image
        }
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "image" => Ok(MediaType::Image),
            "gif" => Ok(MediaType::Gif),
            "video" => Ok(MediaType::Video),
            _ => Err(Error::InvalidMedia(format!("Unknown media type: {}", s))),
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Avatar source, tagged by `mode`.
///
/// Exactly one source is carried per variant, so renderers and migrations
/// get exhaustiveness checking instead of optional-field conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum AvatarConfig {
    /// Remote or bundled image addressed by URL
    Url { url: String, media_type: MediaType },
    /// Uploaded file embedded as a base64 data URI
    File {
        file_data_url: String,
        media_type: MediaType,
    },
}

impl AvatarConfig {
    /// Media type regardless of source variant
    pub fn media_type(&self) -> MediaType {
        match self {
            AvatarConfig::Url { media_type, .. } => *media_type,
            AvatarConfig::File { media_type, .. } => *media_type,
        }
    }
}

/// The single profile record shown in the dashboard header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub bio: String,
    pub avatar: AvatarConfig,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Your Name".into(),
            bio: "Developer • Designer • Creative Thinker".into(),
            avatar: AvatarConfig::Url {
                url: "/avatar.png".into(),
                media_type: MediaType::Image,
            },
        }
    }
}

const AVATAR_IMAGE_MIMES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];
const AVATAR_VIDEO_MIMES: &[&str] = &["video/mp4", "video/webm"];

const AVATAR_IMAGE_LIMIT_MB: u64 = 5;
const AVATAR_VIDEO_LIMIT_MB: u64 = 10;

/// Validate an avatar upload by declared MIME type and size
pub fn validate_avatar_file(mime: &str, len: u64) -> Result<()> {
    if !AVATAR_IMAGE_MIMES.contains(&mime) && !AVATAR_VIDEO_MIMES.contains(&mime) {
        return Err(Error::InvalidMedia(
            "Invalid file type. Accepted: JPG, PNG, WebP, GIF, MP4, WebM".into(),
        ));
    }

    let limit_mb = if mime.starts_with("video/") {
        AVATAR_VIDEO_LIMIT_MB
    } else {
        AVATAR_IMAGE_LIMIT_MB
    };
    if len > limit_mb * 1024 * 1024 {
        return Err(Error::InvalidMedia(format!(
            "File too large. Maximum: {}MB",
            limit_mb
        )));
    }

    Ok(())
}

/// Validate an avatar URL: http(s) only
pub fn validate_avatar_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(Error::InvalidMedia("URL is required".into()));
    }
    if !crate::validate::is_valid_web_url(url) {
        return Err(Error::InvalidMedia(
            "URL must use http:// or https://".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_tagged_serialization() {
        let avatar = AvatarConfig::Url {
            url: "https://example.com/a.gif".into(),
            media_type: MediaType::Gif,
        };

        let json = serde_json::to_value(&avatar).unwrap();
        assert_eq!(json["mode"], "url");
        assert_eq!(json["url"], "https://example.com/a.gif");
        assert_eq!(json["mediaType"], "gif");

        let file = AvatarConfig::File {
            file_data_url: "data:image/png;base64,AAAA".into(),
            media_type: MediaType::Image,
        };
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["mode"], "file");
        assert_eq!(json["fileDataUrl"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_media_type_detection() {
        assert_eq!(MediaType::from_mime("image/gif"), MediaType::Gif);
        assert_eq!(MediaType::from_mime("video/webm"), MediaType::Video);
        assert_eq!(MediaType::from_mime("image/png"), MediaType::Image);

        assert_eq!(MediaType::from_url("https://x.com/A.GIF"), MediaType::Gif);
        assert_eq!(MediaType::from_url("https://x.com/clip.mp4"), MediaType::Video);
        assert_eq!(MediaType::from_url("https://x.com/pic.png"), MediaType::Image);

        assert_eq!("video".parse::<MediaType>().unwrap(), MediaType::Video);
        assert!("audio".parse::<MediaType>().is_err());
    }

    #[test]
    fn test_avatar_file_limits() {
        assert!(validate_avatar_file("image/png", 1024).is_ok());
        assert!(validate_avatar_file("image/png", 6 * 1024 * 1024).is_err());
        assert!(validate_avatar_file("video/mp4", 8 * 1024 * 1024).is_ok());
        assert!(validate_avatar_file("video/mp4", 11 * 1024 * 1024).is_err());
        assert!(validate_avatar_file("application/pdf", 10).is_err());
    }

    #[test]
    fn test_avatar_url_validation() {
        assert!(validate_avatar_url("https://example.com/a.png").is_ok());
        assert!(validate_avatar_url("ftp://example.com/a.png").is_err());
        assert!(validate_avatar_url("").is_err());
    }
}
