//! Base64 encoding and decoding of x402 header values.
//!
//! Every structured x402 header (`Payment-Required`, `Payment-Signature`,
//! `Payment-Response`) is standard base64 over a JSON document.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as b64;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::fmt::Display;

/// A wrapper for base64-encoded byte data.
///
/// ```rust
/// use x402_types::util::Base64Bytes;
///
/// let encoded = Base64Bytes::encode(b"hello world");
/// assert_eq!(encoded.to_string(), "aGVsbG8gd29ybGQ=");
///
/// let decoded = encoded.decode().unwrap();
/// assert_eq!(decoded, b"hello world");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Bytes<'a>(pub Cow<'a, [u8]>);

impl Base64Bytes<'_> {
    /// Decodes the base64 string bytes to raw binary data.
    ///
    /// Surrounding ASCII whitespace is ignored, since header values and bodies
    /// often arrive with a trailing newline.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        b64.decode(self.0.trim_ascii())
    }

    /// Encodes raw binary data into base64 string bytes.
    pub fn encode<T: AsRef<[u8]>>(input: T) -> Base64Bytes<'static> {
        let encoded = b64.encode(input.as_ref());
        Base64Bytes(Cow::Owned(encoded.into_bytes()))
    }

    /// Serializes `value` to JSON and base64-encodes the result.
    pub fn encode_json<T: Serialize>(value: &T) -> Result<Base64Bytes<'static>, serde_json::Error> {
        let json = serde_json::to_vec(value)?;
        Ok(Self::encode(json))
    }

    /// Decodes base64 and parses the bytes as a JSON document of type `T`.
    pub fn decode_json<T: DeserializeOwned>(&self) -> Result<T, Base64JsonError> {
        let bytes = self.decode()?;
        let json = serde_json::from_slice(&bytes)?;
        Ok(json)
    }
}

/// Failure of [`Base64Bytes::decode_json`].
#[derive(Debug, thiserror::Error)]
pub enum Base64JsonError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl AsRef<[u8]> for Base64Bytes<'_> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<'a> From<&'a [u8]> for Base64Bytes<'a> {
    fn from(slice: &'a [u8]) -> Self {
        Base64Bytes(Cow::Borrowed(slice))
    }
}

impl<'a> From<&'a str> for Base64Bytes<'a> {
    fn from(s: &'a str) -> Self {
        Base64Bytes(Cow::Borrowed(s.as_bytes()))
    }
}

impl Display for Base64Bytes<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.0.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_ignores_surrounding_whitespace() {
        let encoded = format!("  {}\n", Base64Bytes::encode(b"abc"));
        let decoded = Base64Bytes::from(encoded.as_str()).decode().unwrap();
        assert_eq!(decoded, b"abc");
    }

    #[test]
    fn test_json_roundtrip() {
        let value = json!({ "errorReason": "insufficient_funds" });
        let encoded = Base64Bytes::encode_json(&value).unwrap();
        let decoded: serde_json::Value = encoded.decode_json().unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_decode_json_reports_base64_failure() {
        let result = Base64Bytes::from("%%%").decode_json::<serde_json::Value>();
        assert!(matches!(result, Err(Base64JsonError::Base64(_))));
    }
}
