use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::assets::decode::decode_image;
use crate::foundation::error::{AdcompError, AdcompResult};
use crate::render::surface::Surface;

/// A loadable image reference handed over by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// Encoded image bytes already in memory.
    Bytes(Vec<u8>),
    /// Image file on disk.
    Path(PathBuf),
    /// `data:<mime>;base64,<payload>` URI, as returned by the generative backend.
    DataUri(String),
}

impl ImageSource {
    /// Interpret `s` as a data URI when it starts with `data:`, otherwise as a file path.
    pub fn parse(s: &str) -> Self {
        if s.trim_start().starts_with("data:") {
            Self::DataUri(s.trim().to_string())
        } else {
            Self::Path(PathBuf::from(s))
        }
    }

    /// Resolve the reference to encoded bytes.
    pub fn read_bytes(&self) -> AdcompResult<Vec<u8>> {
        match self {
            Self::Bytes(b) => Ok(b.clone()),
            Self::Path(p) => std::fs::read(p).map_err(|e| {
                AdcompError::invalid_image(format!("failed to read image '{}': {e}", p.display()))
            }),
            Self::DataUri(uri) => Ok(DataUri::parse(uri)?.bytes),
        }
    }

    /// Load and decode the referenced image.
    pub fn load(&self) -> AdcompResult<Surface> {
        let bytes = self.read_bytes()?;
        decode_image(&bytes)
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

/// Decoded base64 data URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUri {
    /// Declared MIME type, e.g. `image/jpeg`.
    pub mime: String,
    /// Decoded payload.
    pub bytes: Vec<u8>,
}

impl DataUri {
    /// Parse `data:<mime>;base64,<payload>`.
    pub fn parse(uri: &str) -> AdcompResult<Self> {
        let invalid = || AdcompError::invalid_image("invalid base64 image format");

        let rest = uri.trim().strip_prefix("data:").ok_or_else(invalid)?;
        let (header, payload) = rest.split_once(',').ok_or_else(invalid)?;
        let mime = header.strip_suffix(";base64").ok_or_else(invalid)?;
        if mime.is_empty() || payload.is_empty() {
            return Err(invalid());
        }

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| AdcompError::invalid_image(format!("invalid base64 payload: {e}")))?;
        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }
}

/// Encode `bytes` as a `data:<mime>;base64,...` URI.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
