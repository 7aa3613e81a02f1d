//! Core image types: formats and the data-URI encoded image.

use crate::error::{ProPhotoError, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format (modern, efficient).
    WebP,
    /// GIF format.
    Gif,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
            Self::Gif => "gif",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// Maps a MIME type back to a format.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::WebP),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // GIF87a / GIF89a
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(Self::Gif);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// Image editor kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorKind {
    /// Google Gemini image models.
    Gemini,
    /// In-process editor (tests, offline fakes).
    Local,
}

impl fmt::Display for EditorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::Local => write!(f, "local"),
        }
    }
}

const DATA_URI_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// A text-safe image: a `data:<mime>;base64,<payload>` URI.
///
/// Both the user's original and the edited result use this form, so a
/// renderer can display either without format-specific logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedImage {
    mime_type: String,
    data: String,
}

impl EncodedImage {
    /// Encodes raw image bytes, labelling them by their magic bytes.
    ///
    /// Unrecognised content is labelled `image/png`; no further validation
    /// is done.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mime_type = ImageFormat::from_magic_bytes(bytes)
            .unwrap_or_default()
            .mime_type();
        Self {
            mime_type: mime_type.to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Wraps an already base64-encoded payload.
    pub fn from_base64(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Wraps a base64 payload as PNG.
    pub fn png_from_base64(data: impl Into<String>) -> Self {
        Self::from_base64(ImageFormat::Png.mime_type(), data)
    }

    /// Parses a data URI. A bare base64 payload is taken to be PNG.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let Some(rest) = input.strip_prefix(DATA_URI_SCHEME) else {
            if input.is_empty() {
                return Err(ProPhotoError::Decode("empty image data".into()));
            }
            return Ok(Self::png_from_base64(input));
        };

        let (mime_type, data) = rest.split_once(BASE64_MARKER).ok_or_else(|| {
            ProPhotoError::Decode("data URI is not base64 encoded".into())
        })?;
        if data.is_empty() {
            return Err(ProPhotoError::Decode("data URI has no payload".into()));
        }

        let mime_type = if mime_type.is_empty() {
            ImageFormat::Png.mime_type()
        } else {
            mime_type
        };
        Ok(Self::from_base64(mime_type, data))
    }

    /// Returns the declared MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the declared format, if it is one we know.
    pub fn format(&self) -> Option<ImageFormat> {
        ImageFormat::from_mime_type(&self.mime_type)
    }

    /// Returns the base64 payload with the data-URI prefix stripped.
    pub fn base64_data(&self) -> &str {
        &self.data
    }

    /// Decodes the payload back to raw bytes.
    ///
    /// Tolerates embedded whitespace and missing padding.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let cleaned: String = self
            .data
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        if let Ok(bytes) = base64::engine::general_purpose::STANDARD.decode(&cleaned) {
            return Ok(bytes);
        }

        base64::engine::general_purpose::STANDARD_NO_PAD
            .decode(&cleaned)
            .map_err(|e| ProPhotoError::Decode(e.to_string()))
    }

    /// Returns the full `data:` URI.
    pub fn to_data_uri(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{DATA_URI_SCHEME}{}{BASE64_MARKER}{}",
            self.mime_type, self.data
        )
    }
}

impl FromStr for EncodedImage {
    type Err = ProPhotoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EncodedImage {
    type Error = ProPhotoError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<EncodedImage> for String {
    fn from(image: EncodedImage) -> Self {
        image.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&PNG_MAGIC),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&JPEG_MAGIC),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&WEBP_MAGIC),
            Some(ImageFormat::WebP)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(b"GIF89a\x01\x00"),
            Some(ImageFormat::Gif)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"hello"), None);
    }

    #[test]
    fn test_format_from_mime_type() {
        assert_eq!(ImageFormat::from_mime_type("image/png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_mime_type("IMAGE/JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_mime_type("text/plain"), None);
    }

    #[test]
    fn test_from_bytes_sniffs_mime() {
        let image = EncodedImage::from_bytes(&JPEG_MAGIC);
        assert_eq!(image.mime_type(), "image/jpeg");
        assert!(image.to_data_uri().starts_with("data:image/jpeg;base64,"));

        let unknown = EncodedImage::from_bytes(b"not an image");
        assert_eq!(unknown.mime_type(), "image/png");
    }

    #[test]
    fn test_round_trip_preserves_bytes() {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.extend((0..=255u8).cycle().take(10 * 1024));

        let encoded = EncodedImage::from_bytes(&bytes);
        let reparsed = EncodedImage::parse(&encoded.to_data_uri()).unwrap();

        assert_eq!(reparsed, encoded);
        assert_eq!(reparsed.decode().unwrap(), bytes);
    }

    #[test]
    fn test_parse_strips_prefix() {
        let image = EncodedImage::parse("data:image/webp;base64,UklGRg==").unwrap();
        assert_eq!(image.mime_type(), "image/webp");
        assert_eq!(image.base64_data(), "UklGRg==");
        assert_eq!(image.format(), Some(ImageFormat::WebP));
    }

    #[test]
    fn test_parse_bare_base64_is_png() {
        let image = EncodedImage::parse("iVBORw0KGgo=").unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.to_string(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(EncodedImage::parse("").is_err());
        assert!(EncodedImage::parse("data:image/png,rawtext").is_err());
        assert!(EncodedImage::parse("data:image/png;base64,").is_err());
    }

    #[test]
    fn test_decode_is_lenient() {
        let image = EncodedImage::png_from_base64("aGVs\nbG8");
        assert_eq!(image.decode().unwrap(), b"hello");

        let bad = EncodedImage::png_from_base64("!!!");
        assert!(matches!(bad.decode(), Err(ProPhotoError::Decode(_))));
    }

    #[test]
    fn test_serde_as_data_uri() {
        let image = EncodedImage::png_from_base64("WA==");
        let json = serde_json::to_string(&image).unwrap();
        assert_eq!(json, "\"data:image/png;base64,WA==\"");

        let back: EncodedImage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, image);
    }

    #[test]
    fn test_editor_kind_display() {
        assert_eq!(EditorKind::Gemini.to_string(), "gemini");
        assert_eq!(EditorKind::Local.to_string(), "local");
    }
}
