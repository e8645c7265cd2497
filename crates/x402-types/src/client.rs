//! Errors a buyer can run into while paying for a resource.

use crate::proto::ParseError;

/// Everything that can go wrong between receiving a 402 and unlocking the resource.
///
/// The variants follow the negotiation: the envelope can be unreadable
/// ([`PaymentError::Parse`]), offer nothing this client can pay with
/// ([`PaymentError::UnsupportedRequirement`]), fail to sign, or be answered by
/// the server with a rejection.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Unsupported network: this client pays with {required}, the server accepts {}", .offered.join(", "))]
    UnsupportedRequirement {
        /// `network/scheme` this client pays with.
        required: String,
        /// `network/scheme` pairs offered by the server, networks rendered as labels.
        offered: Vec<String>,
    },
    #[error("Failed to sign payment: {0}")]
    SigningFailed(String),
    /// The server decoded the payment and refused it; the reason is shown as sent.
    #[error("{0}")]
    PaymentRejected(String),
    #[error("Payment failed without valid x402 payment-response header: {body}")]
    PaymentFailed { status: u16, body: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Failed to encode payment: {0}")]
    Encoding(String),
}

impl PaymentError {
    /// `true` when the response carried no envelope and there is nothing to pay.
    pub fn is_missing_envelope(&self) -> bool {
        matches!(self, PaymentError::Parse(e) if e.is_missing())
    }
}
