//! V2 EIP-155 "exact" payment scheme, buyer side.
//!
//! The `exact` scheme on EVM pays the requested amount with an ERC-3009
//! `transferWithAuthorization`, signed off-chain as EIP-712 typed data. The
//! seller (or its facilitator) submits it on-chain.
//!
//! - [`authorization`] - fills in the transfer authorization
//! - [`signer`] - typed data and the signing capability
//! - [`client`] - [`ExactEvmPayer`], the two put together
//! - [`types`] - wire format of the signed payload

pub mod authorization;
pub use authorization::*;

pub mod client;
pub use client::*;

pub mod signer;
pub use signer::*;

pub mod types;
pub use types::*;
