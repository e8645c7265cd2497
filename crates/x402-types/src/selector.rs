//! Choosing which of the server's offers to pay with.
//!
//! The buyer pays on exactly one `(network, scheme)` pair. Selection is a
//! linear scan: the first requirement whose network and scheme are both equal
//! to the supported ones wins. There is no partial matching or scoring.

use crate::chain::ChainId;
use crate::client::PaymentError;
use crate::constants::SUPPORTED_SCHEME;
use crate::display::DisplayInfo;
use crate::networks::network_label;
use crate::proto::{PaymentRequired, PaymentRequirement};

/// The `(network, scheme)` pair this client can pay with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedPayment {
    pub network: ChainId,
    pub scheme: String,
}

impl Default for SupportedPayment {
    /// Base Sepolia, `exact`.
    fn default() -> Self {
        Self {
            network: ChainId::new("eip155", "84532"),
            scheme: SUPPORTED_SCHEME.to_string(),
        }
    }
}

impl SupportedPayment {
    pub fn new<S: Into<String>>(network: ChainId, scheme: S) -> Self {
        Self {
            network,
            scheme: scheme.into(),
        }
    }

    /// Returns the first requirement in `accepts` matching this pair.
    pub fn select<'a>(
        &self,
        envelope: &'a PaymentRequired,
    ) -> Result<&'a PaymentRequirement, PaymentError> {
        let network = self.network.to_string();
        envelope
            .accepts
            .iter()
            .find(|requirement| requirement.network == network && requirement.scheme == self.scheme)
            .ok_or_else(|| PaymentError::UnsupportedRequirement {
                required: format!("{}/{}", network_label(&network), self.scheme),
                offered: envelope
                    .accepts
                    .iter()
                    .map(|r| format!("{}/{}", network_label(&r.network), r.scheme))
                    .collect(),
            })
    }

    /// Selects a requirement and projects it for display.
    pub fn display(&self, envelope: &PaymentRequired) -> Result<DisplayInfo, PaymentError> {
        let requirement = self.select(envelope)?;
        Ok(DisplayInfo::project(envelope, requirement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SUPPORTED_NETWORK;
    use serde_json::json;

    fn envelope(accepts: serde_json::Value) -> PaymentRequired {
        PaymentRequired::from_json(json!({ "accepts": accepts })).unwrap()
    }

    #[test]
    fn test_default_matches_constants() {
        let supported = SupportedPayment::default();
        assert_eq!(supported.network.to_string(), SUPPORTED_NETWORK);
        assert_eq!(supported.scheme, SUPPORTED_SCHEME);
    }

    #[test]
    fn test_selects_matching_requirement() {
        let envelope = envelope(json!([
            { "network": "eip155:84532", "scheme": "exact",
              "amount": "1000000", "payTo": "0xabc", "asset": "0xusdc" }
        ]));
        let selected = SupportedPayment::default().select(&envelope).unwrap();
        assert_eq!(selected.pay_to, "0xabc");
    }

    #[test]
    fn test_first_match_wins() {
        let envelope = envelope(json!([
            { "network": "eip155:8453", "scheme": "exact", "amount": "1", "payTo": "0xmainnet" },
            { "network": "eip155:84532", "scheme": "upto", "amount": "2", "payTo": "0xupto" },
            { "network": "eip155:84532", "scheme": "exact", "amount": "3", "payTo": "0xfirst" },
            { "network": "eip155:84532", "scheme": "exact", "amount": "4", "payTo": "0xsecond" }
        ]));
        let selected = SupportedPayment::default().select(&envelope).unwrap();
        assert_eq!(selected.pay_to, "0xfirst");
    }

    #[test]
    fn test_no_match_is_unsupported() {
        let envelope = envelope(json!([
            { "network": "eip155:1", "scheme": "exact", "amount": "1000000", "payTo": "0xabc" }
        ]));
        let err = SupportedPayment::default().select(&envelope).unwrap_err();
        match err {
            PaymentError::UnsupportedRequirement { required, offered } => {
                assert_eq!(required, "base-sepolia/exact");
                assert_eq!(offered, vec!["ethereum/exact".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_no_partial_matching() {
        let envelope = envelope(json!([
            { "network": "eip155:845320", "scheme": "exact", "amount": "1", "payTo": "0xabc" },
            { "network": "EIP155:84532", "scheme": "exact", "amount": "1", "payTo": "0xabc" },
            { "network": "eip155:84532", "scheme": "Exact", "amount": "1", "payTo": "0xabc" }
        ]));
        let err = SupportedPayment::default().select(&envelope).unwrap_err();
        assert!(matches!(err, PaymentError::UnsupportedRequirement { .. }));
    }

    #[test]
    fn test_custom_supported_pair() {
        let envelope = envelope(json!([
            { "network": "eip155:84532", "scheme": "exact", "amount": "1", "payTo": "0xtestnet" },
            { "network": "eip155:8453", "scheme": "exact", "amount": "1", "payTo": "0xmainnet" }
        ]));
        let supported = SupportedPayment::new(ChainId::new("eip155", "8453"), "exact");
        assert_eq!(supported.select(&envelope).unwrap().pay_to, "0xmainnet");
    }
}
