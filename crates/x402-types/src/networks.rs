//! Known networks and their human-readable labels.
//!
//! Servers identify networks by CAIP-2 chain ID. People recognise names, so the
//! display projection and the "unsupported network" message look the label up
//! here, falling back to the raw chain ID for anything unknown.
//!
//! ```
//! use x402_types::chain::ChainId;
//! use x402_types::networks::{chain_id_by_network_name, network_label};
//!
//! let chain_id = chain_id_by_network_name("base-sepolia").unwrap();
//! assert_eq!(chain_id.to_string(), "eip155:84532");
//! assert_eq!(network_label("eip155:84532"), "base-sepolia");
//! assert_eq!(network_label("eip155:424242"), "eip155:424242");
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::chain::ChainId;

/// A known network definition with its chain ID and human-readable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    /// Human-readable network name (e.g., "base-sepolia")
    pub name: &'static str,
    /// CAIP-2 namespace (e.g., "eip155")
    pub namespace: &'static str,
    /// Chain reference (e.g., "84532" for Base Sepolia)
    pub reference: &'static str,
}

impl NetworkInfo {
    /// Create a ChainId from this network info
    pub fn chain_id(&self) -> ChainId {
        ChainId::new(self.namespace, self.reference)
    }
}

/// Well-known networks, EVM first.
pub static KNOWN_NETWORKS: &[NetworkInfo] = &[
    // Ethereum
    NetworkInfo {
        name: "ethereum",
        namespace: "eip155",
        reference: "1",
    },
    NetworkInfo {
        name: "ethereum-sepolia",
        namespace: "eip155",
        reference: "11155111",
    },
    // Base
    NetworkInfo {
        name: "base",
        namespace: "eip155",
        reference: "8453",
    },
    NetworkInfo {
        name: "base-sepolia",
        namespace: "eip155",
        reference: "84532",
    },
    // Polygon
    NetworkInfo {
        name: "polygon",
        namespace: "eip155",
        reference: "137",
    },
    NetworkInfo {
        name: "polygon-amoy",
        namespace: "eip155",
        reference: "80002",
    },
    // Avalanche
    NetworkInfo {
        name: "avalanche",
        namespace: "eip155",
        reference: "43114",
    },
    NetworkInfo {
        name: "avalanche-fuji",
        namespace: "eip155",
        reference: "43113",
    },
    // Celo
    NetworkInfo {
        name: "celo",
        namespace: "eip155",
        reference: "42220",
    },
    NetworkInfo {
        name: "celo-sepolia",
        namespace: "eip155",
        reference: "11142220",
    },
    // Solana
    NetworkInfo {
        name: "solana",
        namespace: "solana",
        reference: "5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp",
    },
    NetworkInfo {
        name: "solana-devnet",
        namespace: "solana",
        reference: "EtWTRABZaYq6iMfeYKouRu166VU2xqa1",
    },
];

/// Network name to ChainId, populated once from [`KNOWN_NETWORKS`].
pub static NAME_TO_CHAIN_ID: LazyLock<HashMap<&'static str, ChainId>> = LazyLock::new(|| {
    KNOWN_NETWORKS
        .iter()
        .map(|n| (n.name, n.chain_id()))
        .collect()
});

/// ChainId to network name, populated once from [`KNOWN_NETWORKS`].
pub static CHAIN_ID_TO_NAME: LazyLock<HashMap<ChainId, &'static str>> = LazyLock::new(|| {
    KNOWN_NETWORKS
        .iter()
        .map(|n| (n.chain_id(), n.name))
        .collect()
});

pub fn chain_id_by_network_name(name: &str) -> Option<&ChainId> {
    NAME_TO_CHAIN_ID.get(name)
}

pub fn network_name_by_chain_id(chain_id: &ChainId) -> Option<&'static str> {
    CHAIN_ID_TO_NAME.get(chain_id).copied()
}

/// Label for a network string as it appears in a payment requirement.
///
/// Returns the known name when the string is a CAIP-2 ID in the registry,
/// otherwise the string itself.
pub fn network_label(network: &str) -> String {
    network
        .parse::<ChainId>()
        .ok()
        .and_then(|chain_id| network_name_by_chain_id(&chain_id))
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| network.to_string())
}
