//! EVM chain identity for x402 payments via EIP-155.
//!
//! - [`Eip155ChainReference`] - A numeric chain ID for EVM networks (e.g., `84532` for Base Sepolia)
//! - [`EIP155_NAMESPACE`] - The CAIP-2 namespace shared by every EVM chain
//! - [`erc20::token_balance`] - A token balance with the decimals the token reports

pub mod erc20;
pub mod types;
pub use types::*;
