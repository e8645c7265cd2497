//! The `402 Payment Required` envelope and its parser.
//!
//! A paywalled server answers with a [`PaymentRequired`] envelope, base64-encoded
//! JSON carried in the `Payment-Required` response header or in the body. The
//! envelope lists every payment method the server accepts; the buyer picks one
//! (see [`crate::selector`]) and echoes it back in its payment payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::util::Base64Bytes;

/// Failure to obtain a usable envelope from a 402 response.
///
/// [`ParseError::MissingEnvelope`] is recoverable: a 402 may legitimately carry
/// no machine-readable requirement, and callers typically treat it as "nothing
/// to pay". Every other variant means an envelope was present but malformed.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("missing envelope")]
    MissingEnvelope,
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("invalid utf-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("accepts must be a non-empty array")]
    EmptyAccepts,
    #[error("accepts[{index}] is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("accepts[{index}] has an amount that is not a decimal integer")]
    InvalidAmount { index: usize },
}

impl ParseError {
    /// `true` when no envelope was found at all, as opposed to a malformed one.
    pub fn is_missing(&self) -> bool {
        matches!(self, ParseError::MissingEnvelope)
    }
}

/// Metadata about the resource being paid for.
///
/// Every field is optional on the wire. Unknown fields are preserved so the
/// resource can be echoed back to the server unchanged.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceInfo {
    pub url: Option<String>,
    pub description: Option<String>,
    pub mime_type: Option<String>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, Value>,
}

/// Asset-specific parameters of a requirement.
///
/// For EIP-3009 tokens `name` and `version` are the token's EIP-712 domain,
/// and `name` doubles as the currency shown to the user.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementExtra {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, Value>,
}

/// One acceptable way to pay, as offered by the server.
///
/// `network` is a CAIP-2 chain ID string such as `eip155:84532`. Addresses stay
/// strings here since the envelope may carry offers for chains this client
/// cannot interpret; they are parsed when the message is signed.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequirement {
    pub scheme: String,
    pub network: String,
    pub pay_to: String,
    pub asset: Option<String>,
    pub amount: Option<String>,
    pub max_amount_required: Option<String>,
    pub extra: Option<RequirementExtra>,
    pub description: Option<String>,
    pub max_timeout_seconds: Option<u64>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, Value>,
}

impl PaymentRequirement {
    /// The raw on-chain amount: `amount`, or `maxAmountRequired` for older servers.
    ///
    /// An empty `amount` counts as absent.
    pub fn raw_amount(&self) -> Option<&str> {
        self.amount
            .as_deref()
            .filter(|amount| !amount.is_empty())
            .or(self.max_amount_required.as_deref())
    }

    pub fn extra_name(&self) -> Option<&str> {
        self.extra.as_ref().and_then(|e| e.name.as_deref())
    }

    pub fn extra_version(&self) -> Option<&str> {
        self.extra.as_ref().and_then(|e| e.version.as_deref())
    }
}

/// The envelope of a `402 Payment Required` response.
///
/// ```
/// use x402_types::proto::PaymentRequired;
///
/// let body = br#"{"x402Version":2,"accepts":[{"network":"eip155:84532","scheme":"exact","maxAmountRequired":"250000","payTo":"0xabc"}]}"#;
/// let envelope = PaymentRequired::from_body(body).unwrap();
/// assert_eq!(envelope.accepts[0].raw_amount(), Some("250000"));
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequired {
    pub x402_version: Option<u8>,
    pub error: Option<String>,
    pub resource: Option<ResourceInfo>,
    pub accepts: Vec<PaymentRequirement>,
}

impl PaymentRequired {
    /// Parses a `Payment-Required` header value: base64, then UTF-8 JSON.
    pub fn from_header(value: &[u8]) -> Result<Self, ParseError> {
        let bytes = Base64Bytes::from(value).decode()?;
        let json = std::str::from_utf8(&bytes)?;
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(value)
    }

    /// Parses a 402 response body.
    ///
    /// The body is tried as base64 JSON first, then as a plain JSON document.
    /// A body that is neither is reported as [`ParseError::MissingEnvelope`].
    pub fn from_body(body: &[u8]) -> Result<Self, ParseError> {
        let body = body.trim_ascii();
        if body.is_empty() {
            return Err(ParseError::MissingEnvelope);
        }
        let value = Base64Bytes::from(body)
            .decode()
            .ok()
            .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok())
            .or_else(|| serde_json::from_slice::<Value>(body).ok())
            .ok_or(ParseError::MissingEnvelope)?;
        Self::from_json(value)
    }

    /// Locates the envelope in a 402 response: header first, then body.
    ///
    /// A present header is authoritative, so a malformed header is an error
    /// even when the body would have parsed.
    pub fn from_transport(header: Option<&[u8]>, body: Option<&[u8]>) -> Result<Self, ParseError> {
        match (header, body) {
            (Some(header), _) => Self::from_header(header),
            (None, Some(body)) => Self::from_body(body),
            (None, None) => Err(ParseError::MissingEnvelope),
        }
    }

    /// Validates a decoded JSON document and converts it into an envelope.
    pub fn from_json(value: Value) -> Result<Self, ParseError> {
        validate_accepts(&value)?;
        let envelope = serde_json::from_value(value)?;
        Ok(envelope)
    }

    /// Encodes the envelope the way a server puts it into the header.
    pub fn to_header(&self) -> Result<String, serde_json::Error> {
        Ok(Base64Bytes::encode_json(self)?.to_string())
    }
}

fn validate_accepts(value: &Value) -> Result<(), ParseError> {
    let accepts = value
        .get("accepts")
        .and_then(Value::as_array)
        .filter(|accepts| !accepts.is_empty())
        .ok_or(ParseError::EmptyAccepts)?;
    for (index, entry) in accepts.iter().enumerate() {
        for field in ["network", "scheme", "payTo"] {
            let present = entry
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| !s.is_empty());
            if !present {
                return Err(ParseError::MissingField { index, field });
            }
        }
        let amount = ["amount", "maxAmountRequired"]
            .into_iter()
            .filter_map(|field| entry.get(field))
            .find(|amount| !amount.is_null() && amount.as_str() != Some(""))
            .ok_or(ParseError::MissingField {
                index,
                field: "amount",
            })?;
        let is_integer = amount
            .as_str()
            .is_some_and(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()));
        if !is_integer {
            return Err(ParseError::InvalidAmount { index });
        }
    }
    Ok(())
}
