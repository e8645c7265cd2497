//! CAIP-2 chain identifier type.
//!
//! A CAIP-2 chain ID consists of two parts separated by a colon:
//!
//! - **Namespace**: The blockchain ecosystem (e.g., `eip155` for EVM)
//! - **Reference**: The chain-specific identifier (e.g., `84532` for Base Sepolia)
//!
//! # Examples
//!
//! ```
//! use x402_types::chain::ChainId;
//!
//! let base_sepolia = ChainId::new("eip155", "84532");
//! assert_eq!(base_sepolia.to_string(), "eip155:84532");
//!
//! let parsed: ChainId = "eip155:84532".parse().unwrap();
//! assert_eq!(parsed, base_sepolia);
//! ```

use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

use crate::networks;

/// A CAIP-2 blockchain identifier, `namespace:reference`.
///
/// Serialized as the colon-separated string. Only the first colon splits, so
/// references such as `cosmoshub:4` stay intact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct ChainId {
    pub namespace: String,
    pub reference: String,
}

impl ChainId {
    pub fn new<N: Into<String>, R: Into<String>>(namespace: N, reference: R) -> Self {
        Self {
            namespace: namespace.into(),
            reference: reference.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Looks up a well-known network by name.
    ///
    /// ```
    /// use x402_types::chain::ChainId;
    ///
    /// let chain = ChainId::from_network_name("base-sepolia").unwrap();
    /// assert_eq!(chain.to_string(), "eip155:84532");
    /// assert!(ChainId::from_network_name("unknown").is_none());
    /// ```
    pub fn from_network_name(network_name: &str) -> Option<Self> {
        networks::chain_id_by_network_name(network_name).cloned()
    }

    /// Name of this chain in the known-network registry.
    pub fn as_network_name(&self) -> Option<&'static str> {
        networks::network_name_by_chain_id(self)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.reference)
    }
}

/// A string that is not `namespace:reference` with both parts non-empty.
#[derive(Debug, thiserror::Error)]
#[error("Invalid chain id format {0}")]
pub struct ChainIdFormatError(String);

impl FromStr for ChainId {
    type Err = ChainIdFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, reference) = s
            .split_once(':')
            .filter(|(namespace, reference)| !namespace.is_empty() && !reference.is_empty())
            .ok_or_else(|| ChainIdFormatError(s.to_owned()))?;
        Ok(Self::new(namespace, reference))
    }
}
