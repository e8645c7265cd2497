//! Chain identifiers for x402 payment requirements.
//!
//! Payment requirements name their network with a CAIP-2 chain ID such as
//! `eip155:84532`. The buyer only ever pays on one chain, but it must still
//! understand the identifiers of every alternative a server offers in order to
//! explain what it cannot pay for.

mod chain_id;

pub use chain_id::*;
