//! `data:` URL encoding for frame images.
//!
//! Frames travel between components as self-describing strings of the
//! form `data:<mime>;base64,<payload>`, so no separate storage is needed.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// MIME type of every frame the pipeline emits.
pub const PNG_MIME: &str = "image/png";

const SCHEME_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// A base64 `data:` URL with its MIME type split out.
///
/// Construction validates the payload, so a `DataUrl` always decodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataUrl {
    mime_type: String,
    payload: String,
}

impl DataUrl {
    /// Parse a `data:<mime>;base64,<payload>` string.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let rest = input.strip_prefix(SCHEME_PREFIX).ok_or_else(|| {
            CoreError::MalformedDataUrl("missing 'data:' prefix".to_string())
        })?;

        let (mime_type, payload) = rest.split_once(BASE64_MARKER).ok_or_else(|| {
            CoreError::MalformedDataUrl("expected ';base64,' after the MIME type".to_string())
        })?;

        Self::from_base64(mime_type, payload)
    }

    /// Build a data URL from a MIME type and an already base64-encoded payload.
    pub fn from_base64(mime_type: &str, payload: &str) -> Result<Self, CoreError> {
        let mime_type = mime_type.trim();
        if mime_type.is_empty() || mime_type.contains(',') || !mime_type.contains('/') {
            return Err(CoreError::MalformedDataUrl(format!(
                "invalid MIME type '{mime_type}'"
            )));
        }
        if payload.is_empty() {
            return Err(CoreError::MalformedDataUrl("empty payload".to_string()));
        }
        BASE64_STANDARD
            .decode(payload)
            .map_err(|e| CoreError::MalformedDataUrl(format!("invalid base64 payload: {e}")))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            payload: payload.to_string(),
        })
    }

    /// Encode raw bytes under the given MIME type.
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            payload: BASE64_STANDARD.encode(bytes),
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload, without the `data:` header.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Decode the payload into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>, CoreError> {
        BASE64_STANDARD
            .decode(&self.payload)
            .map_err(|e| CoreError::MalformedDataUrl(format!("invalid base64 payload: {e}")))
    }

    /// Decode into a `(bytes, mime_type)` pair.
    pub fn to_parts(&self) -> Result<(Vec<u8>, String), CoreError> {
        Ok((self.decode()?, self.mime_type.clone()))
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SCHEME_PREFIX}{}{BASE64_MARKER}{}",
            self.mime_type, self.payload
        )
    }
}

impl FromStr for DataUrl {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DataUrl {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DataUrl> for String {
    fn from(value: DataUrl) -> Self {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
