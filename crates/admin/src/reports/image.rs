//! Images embedded in reports.
//!
//! Only inline `data:image/...;base64,` payloads are embedded. Anything else
//! (remote URLs, malformed payloads) is left out of the report.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Raster format of an embedded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// A validated inline image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub format: ImageFormat,
    /// Data URL rebuilt from the validated payload.
    pub data_url: String,
}

impl EmbeddedImage {
    /// Parse a `data:image/...;base64,` URL.
    ///
    /// PNG is detected from the media type; every other image type is
    /// treated as JPEG.
    #[must_use]
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.trim().strip_prefix("data:image/")?;
        let (media, payload) = rest.split_once(',')?;
        let subtype = media.strip_suffix(";base64")?;
        let format = if subtype.eq_ignore_ascii_case("png") {
            ImageFormat::Png
        } else {
            ImageFormat::Jpeg
        };
        let bytes = STANDARD.decode(payload).ok()?;
        if bytes.is_empty() {
            return None;
        }
        Some(Self {
            format,
            data_url: format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes)),
        })
    }

    /// The first candidate that is an embeddable data URL.
    #[must_use]
    pub fn first_of<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<Self> {
        candidates.into_iter().flatten().find_map(Self::from_data_url)
    }
}
