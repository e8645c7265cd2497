//! EIP-712 typed data for ERC-3009 authorizations, and the capability that signs it.
//!
//! The token contract recovers the payer from a signature over
//! `TransferWithAuthorization(address from,address to,uint256 value,uint256 validAfter,uint256 validBefore,bytes32 nonce)`
//! under the token's EIP-712 domain. [`TypedData`] carries exactly that
//! document; a [`TypedDataSigner`] turns it into a 65-byte signature.

use alloy_primitives::{Address, B256, Bytes, FixedBytes, Signature, U256};
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{SolStruct, eip712_domain};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;

use crate::v2_eip155_exact::types::{Authorization, TransferWithAuthorization};

/// Failure to produce a signature.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("invalid {field} address {value:?}")]
    InvalidAddress { field: &'static str, value: String },
    #[error("invalid transfer value {0:?}, expected a decimal uint256")]
    InvalidValue(String),
    #[error(transparent)]
    Signer(#[from] alloy_signer::Error),
    #[error("{0}")]
    Other(String),
}

/// The EIP-712 domain of the token contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: String,
}

/// A `TransferWithAuthorization` message bound to its domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedData {
    pub domain: TypedDataDomain,
    pub primary_type: String,
    pub message: Authorization,
}

impl TypedData {
    pub const PRIMARY_TYPE: &'static str = "TransferWithAuthorization";

    pub fn transfer_with_authorization(domain: TypedDataDomain, message: Authorization) -> Self {
        Self {
            domain,
            primary_type: Self::PRIMARY_TYPE.to_string(),
            message,
        }
    }

    /// The `types` section of the EIP-712 document.
    pub fn types() -> serde_json::Value {
        json!({
            "EIP712Domain": [
                { "name": "name", "type": "string" },
                { "name": "version", "type": "string" },
                { "name": "chainId", "type": "uint256" },
                { "name": "verifyingContract", "type": "address" },
            ],
            "TransferWithAuthorization": [
                { "name": "from", "type": "address" },
                { "name": "to", "type": "address" },
                { "name": "value", "type": "uint256" },
                { "name": "validAfter", "type": "uint256" },
                { "name": "validBefore", "type": "uint256" },
                { "name": "nonce", "type": "bytes32" },
            ],
        })
    }

    /// The full document as `eth_signTypedData_v4` expects it.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "types": Self::types(),
            "primaryType": self.primary_type,
            "domain": self.domain,
            "message": self.message,
        })
    }

    /// The EIP-712 digest: `keccak256("\x19\x01" || domainSeparator || hashStruct(message))`.
    pub fn signing_hash(&self) -> Result<B256, SignerError> {
        let verifying_contract =
            parse_address("verifyingContract", &self.domain.verifying_contract)?;
        let domain = eip712_domain! {
            name: self.domain.name.clone(),
            version: self.domain.version.clone(),
            chain_id: self.domain.chain_id,
            verifying_contract: verifying_contract,
        };
        let value = U256::from_str_radix(&self.message.value, 10)
            .map_err(|_| SignerError::InvalidValue(self.message.value.clone()))?;
        // Field by field the same as the wire authorization; the server
        // reconstructs this struct from it to recover the signer.
        let transfer_with_authorization = TransferWithAuthorization {
            from: parse_address("from", &self.message.from)?,
            to: parse_address("to", &self.message.to)?,
            value,
            validAfter: U256::from(self.message.valid_after.as_secs()),
            validBefore: U256::from(self.message.valid_before.as_secs()),
            nonce: self.message.nonce,
        };
        Ok(transfer_with_authorization.eip712_signing_hash(&domain))
    }
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, SignerError> {
    Address::from_str(value).map_err(|_| SignerError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}

/// Signs EIP-712 typed data on behalf of the payer.
#[async_trait]
pub trait TypedDataSigner {
    /// The address the signature recovers to; becomes the authorization's `from`.
    fn signer_address(&self) -> Address;

    /// Returns the 65-byte `r || s || v` signature over the typed data.
    async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<Bytes, SignerError>;
}

#[async_trait]
impl<S> TypedDataSigner for S
where
    S: SignerLike + Send + Sync,
{
    fn signer_address(&self) -> Address {
        self.address()
    }

    async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<Bytes, SignerError> {
        let eip712_hash = typed_data.signing_hash()?;
        let signature = self.sign_hash(&eip712_hash).await?;
        Ok(signature.as_bytes().into())
    }
}

/// A trait that abstracts signing operations, allowing both owned signers and Arc-wrapped signers.
///
/// Alloy's `Signer` trait is not implemented for `Arc<T>`, and `PrivateKeySigner`
/// is commonly shared that way.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use alloy_signer_local::PrivateKeySigner;
/// use x402_chain_eip155::v2_eip155_exact::TypedDataSigner;
///
/// let signer = Arc::new(PrivateKeySigner::random());
/// let expected = signer.address();
/// assert_eq!(signer.signer_address(), expected);
/// ```
#[async_trait]
pub trait SignerLike {
    /// Returns the address of the signer.
    fn address(&self) -> Address;

    /// Signs the given hash.
    async fn sign_hash(&self, hash: &FixedBytes<32>) -> Result<Signature, alloy_signer::Error>;
}

#[async_trait]
impl SignerLike for PrivateKeySigner {
    fn address(&self) -> Address {
        PrivateKeySigner::address(self)
    }

    async fn sign_hash(&self, hash: &FixedBytes<32>) -> Result<Signature, alloy_signer::Error> {
        alloy_signer::Signer::sign_hash(self, hash).await
    }
}

#[async_trait]
impl<T: SignerLike + Send + Sync> SignerLike for Arc<T> {
    fn address(&self) -> Address {
        (**self).address()
    }

    async fn sign_hash(&self, hash: &FixedBytes<32>) -> Result<Signature, alloy_signer::Error> {
        (**self).sign_hash(hash).await
    }
}
