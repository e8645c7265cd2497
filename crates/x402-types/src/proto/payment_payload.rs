use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::proto::{PaymentRequirement, ResourceInfo, X402Version2};
use crate::util::{Base64Bytes, Base64JsonError};

/// A signed payment, sent back to the server in the `Payment-Signature` header.
///
/// `accepted` is the requirement the buyer chose, echoed verbatim so the
/// server can check which terms were signed. `payload` is scheme-specific;
/// for `exact` on EVM it holds the signature and the EIP-3009 authorization.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload<TPayload> {
    pub x402_version: X402Version2,
    pub resource: Option<ResourceInfo>,
    pub accepted: PaymentRequirement,
    pub payload: TPayload,
}

impl<TPayload: Serialize> PaymentPayload<TPayload> {
    /// base64(JSON) header value.
    pub fn to_header(&self) -> Result<String, serde_json::Error> {
        Ok(Base64Bytes::encode_json(self)?.to_string())
    }
}

impl<TPayload: DeserializeOwned> PaymentPayload<TPayload> {
    pub fn from_header(value: &[u8]) -> Result<Self, Base64JsonError> {
        Base64Bytes::from(value).decode_json()
    }
}
