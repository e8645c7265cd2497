#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Paying for [x402](https://www.x402.org) resources over `reqwest`.
//!
//! The payment flow is split into small steps so a caller can stop between
//! them, for example to ask a human for confirmation:
//!
//! 1. [`intercept`] recognises a 402 that carries a payment envelope.
//! 2. [`SupportedPayment::select`](x402_types::selector::SupportedPayment::select)
//!    picks the requirement this client can pay.
//! 3. [`PaymentExecutor::execute`] signs it, retries the `GET` once with the
//!    `Payment-Signature` header and returns the [`Content`] or a
//!    [`PaymentError`](x402_types::client::PaymentError) explained by [`interpret`].
//!
//! For unattended use, [`X402Client`] runs the same steps as `reqwest`
//! middleware:
//!
//! ```rust,no_run
//! use alloy_signer_local::PrivateKeySigner;
//! use x402_chain_eip155::v2_eip155_exact::ExactEvmPayer;
//! use x402_reqwest::{ReqwestWithPayments, X402Client};
//! use x402_types::selector::SupportedPayment;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let signer: PrivateKeySigner = std::env::var("EVM_PRIVATE_KEY")?.parse()?;
//! let supported = SupportedPayment::default();
//! let payer = ExactEvmPayer::from_supported(signer, &supported)?;
//!
//! let http_client = reqwest::Client::new()
//!     .with_payments(X402Client::new(payer, supported))
//!     .build();
//! let _response = http_client
//!     .get("https://api.example.com/protected")
//!     .send()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod client;
mod executor;
mod http_transport;
mod intercept;
mod interpret;

pub use builder::*;
pub use client::*;
pub use executor::*;
pub use http_transport::*;
pub use intercept::*;
pub use interpret::*;
