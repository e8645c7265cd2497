//! Wire format of an `exact` EVM payment.

use alloy_primitives::{B256, Bytes};
use alloy_sol_types::sol;
use serde::{Deserialize, Serialize};
use x402_types::proto;
use x402_types::timestamp::UnixTimestamp;

/// The signed payment sent to the server: x402 envelope around an [`ExactEvmPayload`].
pub type PaymentPayload = proto::PaymentPayload<ExactEvmPayload>;

/// Signature plus the authorization it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExactEvmPayload {
    /// 65-byte `r || s || v` signature, `0x`-prefixed hex on the wire.
    pub signature: Bytes,
    pub authorization: Authorization,
}

/// An ERC-3009 transfer authorization as it travels on the wire.
///
/// Addresses and the amount are kept exactly as the requirement stated them;
/// they are parsed into EVM types only when hashed for signing. `value` is
/// the raw on-chain integer, never a display amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    pub from: String,
    pub to: String,
    pub value: String,
    pub valid_after: UnixTimestamp,
    pub valid_before: UnixTimestamp,
    pub nonce: B256,
}

sol!(
    /// Solidity-compatible struct definition for ERC-3009 `transferWithAuthorization`.
    ///
    /// The EIP-712 type the token contract recovers the signer from: transfer
    /// `value` tokens from `from` to `to`, valid only between `validAfter` and
    /// `validBefore` and identified by a unique `nonce`.
    #[derive(Serialize, Deserialize)]
    struct TransferWithAuthorization {
        address from;
        address to;
        uint256 value;
        uint256 validAfter;
        uint256 validBefore;
        bytes32 nonce;
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_authorization_wire_format() {
        let authorization = Authorization {
            from: "0x857b06519E91e3A54538791bDbb0E22373e36b66".into(),
            to: "0x209693Bc6afc0C5328bA36FaF03C514EF312287C".into(),
            value: "1000000".into(),
            valid_after: UnixTimestamp::from_secs(1_700_000_000),
            valid_before: UnixTimestamp::from_secs(1_700_000_300),
            nonce: B256::repeat_byte(0xab),
        };
        let value = serde_json::to_value(&authorization).unwrap();
        assert_eq!(
            value,
            json!({
                "from": "0x857b06519E91e3A54538791bDbb0E22373e36b66",
                "to": "0x209693Bc6afc0C5328bA36FaF03C514EF312287C",
                "value": "1000000",
                "validAfter": "1700000000",
                "validBefore": "1700000300",
                "nonce": format!("0x{}", "ab".repeat(32)),
            })
        );
    }
}
