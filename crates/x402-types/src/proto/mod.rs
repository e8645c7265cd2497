//! Wire format of the buyer side of an x402 exchange.
//!
//! Three documents travel between buyer and paywalled server, each as
//! base64-encoded camelCase JSON in an HTTP header:
//!
//! - [`PaymentRequired`] - the 402 envelope listing accepted payment methods
//! - [`PaymentPayload`] - the signed payment the buyer sends back in `Payment-Signature`
//! - [`PaymentResponse`] - the server's settlement result in `Payment-Response`

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

mod payment_payload;
mod payment_required;
mod payment_response;

pub use payment_payload::*;
pub use payment_required::*;
pub use payment_response::*;

use crate::constants::X402_VERSION;

/// Version marker for x402 protocol version 2.
///
/// Serializes as the integer `2` and refuses any other number on the way in.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct X402Version2;

impl X402Version2 {
    pub const VALUE: u8 = X402_VERSION;
}

impl From<X402Version2> for u8 {
    fn from(_: X402Version2) -> Self {
        X402Version2::VALUE
    }
}

impl Serialize for X402Version2 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(Self::VALUE)
    }
}

impl<'de> Deserialize<'de> for X402Version2 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let num = u8::deserialize(deserializer)?;
        if num == Self::VALUE {
            Ok(X402Version2)
        } else {
            Err(serde::de::Error::custom(format!(
                "expected version {}, got {}",
                Self::VALUE,
                num
            )))
        }
    }
}

impl fmt::Display for X402Version2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::VALUE)
    }
}
