#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the buyer side of the x402 payment protocol.
//!
//! A server that wants to be paid answers with `402 Payment Required` and a
//! machine-readable envelope listing the payment methods it accepts. This crate
//! holds everything about that exchange that does not depend on a particular
//! chain or HTTP client:
//!
//! - [`proto`] - Wire format of the envelope, the outbound payment payload and the
//!   server's payment response, plus the envelope parser
//! - [`selector`] - Picks the one requirement matching the supported `(network, scheme)`
//! - [`display`] - Human-facing projection of a requirement (amount, currency, network label)
//! - [`client`] - The [`client::PaymentError`] taxonomy shared by the whole workspace
//! - [`chain`] - CAIP-2 chain identifiers
//! - [`networks`] - Registry of well-known networks for labels
//! - [`timestamp`] - Unix timestamps used in authorization windows
//! - [`util`] - Base64 helper
//!
//! # Example
//!
//! ```
//! use x402_types::proto::PaymentRequired;
//! use x402_types::selector::SupportedPayment;
//! use x402_types::util::Base64Bytes;
//!
//! let json = r#"{"accepts":[{"network":"eip155:84532","scheme":"exact","amount":"1000000","payTo":"0xabc","asset":"0xusdc"}]}"#;
//! let header = Base64Bytes::encode(json);
//!
//! let envelope = PaymentRequired::from_header(header.as_ref()).unwrap();
//! let supported = SupportedPayment::default();
//! let display = supported.display(&envelope).unwrap();
//! assert_eq!(display.amount.as_deref(), Some("1.00"));
//! assert_eq!(display.network, "base-sepolia");
//! ```

pub mod chain;
pub mod client;
pub mod constants;
pub mod display;
pub mod networks;
pub mod proto;
pub mod selector;
pub mod timestamp;
pub mod util;
