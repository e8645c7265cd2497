//! Utility types for x402.
//!
//! - [`b64`] - Base64 encoding/decoding of header values

pub mod b64;

pub use b64::*;
