//! EIP-155 (EVM) support for x402 buyers.
//!
//! Paying with the `exact` scheme on an EVM chain means authorizing an ERC-3009
//! `transferWithAuthorization` of the requested token amount to the seller and
//! signing that authorization as EIP-712 typed data. This crate does both:
//!
//! - [`v2_eip155_exact::AuthorizationBuilder`] fills in the authorization from a
//!   selected requirement, with an injectable clock and nonce source
//! - [`v2_eip155_exact::TypedDataSigner`] is the signing capability, implemented
//!   for every alloy-backed [`v2_eip155_exact::SignerLike`]
//! - [`v2_eip155_exact::ExactEvmPayer`] builds, signs and assembles the payment payload
//!
//! # Example
//!
//! ```no_run
//! use alloy_signer_local::PrivateKeySigner;
//! use x402_chain_eip155::v2_eip155_exact::ExactEvmPayer;
//! use x402_types::proto::PaymentRequired;
//! use x402_types::selector::SupportedPayment;
//!
//! # async fn pay(envelope: PaymentRequired) -> Result<(), Box<dyn std::error::Error>> {
//! let supported = SupportedPayment::default();
//! let payer = ExactEvmPayer::from_supported(PrivateKeySigner::random(), &supported)?;
//! let requirement = supported.select(&envelope)?;
//! let payload = payer.pay(&envelope, requirement).await?;
//! let _header = payload.to_header()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Feature Flags
//!
//! - `telemetry` - tracing spans and events for authorization building and signing

pub mod chain;
pub mod v2_eip155_exact;
