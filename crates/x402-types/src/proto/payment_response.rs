use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::util::{Base64Bytes, Base64JsonError};

/// Settlement result reported by the server in the `Payment-Response` header.
///
/// On success it usually carries the transaction hash; on failure an
/// `errorReason` (or, from some servers, a plain `error`).
///
/// ```json
/// { "success": false, "errorReason": "insufficient_funds", "network": "eip155:84532" }
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub success: Option<bool>,
    pub error_reason: Option<String>,
    pub error: Option<String>,
    pub transaction: Option<String>,
    pub network: Option<String>,
    pub payer: Option<String>,
    #[serde(flatten)]
    pub other: serde_json::Map<String, Value>,
}

impl PaymentResponse {
    pub fn from_header(value: &[u8]) -> Result<Self, Base64JsonError> {
        Base64Bytes::from(value).decode_json()
    }

    pub fn to_header(&self) -> Result<String, serde_json::Error> {
        Ok(Base64Bytes::encode_json(self)?.to_string())
    }

    /// The failure reason: `errorReason`, else `error`. Empty strings do not count.
    pub fn reason(&self) -> Option<&str> {
        self.error_reason
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.error.as_deref().filter(|s| !s.is_empty()))
    }
}
