//! Recognising a payable 402.
//!
//! Many 402 responses carry no machine-readable requirement. That is not an
//! error for the caller, so this boundary logs why a response is not payable
//! and returns `None`. Everything downstream receives the envelope and the URL
//! it came from as plain values.

use http::StatusCode;
use url::Url;
use x402_types::constants::PAYMENT_REQUIRED_HEADER;
use x402_types::proto::PaymentRequired;

use crate::http_transport::TransportResponse;

/// A 402 that can be paid: where it came from and what it asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPayment {
    pub url: Url,
    pub payment_required: PaymentRequired,
}

/// Extracts the payment envelope from a 402 response, header first, then body.
#[cfg_attr(not(feature = "telemetry"), allow(unused_variables))]
pub fn intercept(url: &Url, response: &TransportResponse) -> Option<PendingPayment> {
    if response.status != StatusCode::PAYMENT_REQUIRED {
        #[cfg(feature = "telemetry")]
        tracing::trace!(status = %response.status, "No payment required");
        return None;
    }
    let body = Some(response.body.as_bytes());
    match PaymentRequired::from_transport(response.header(PAYMENT_REQUIRED_HEADER), body) {
        Ok(payment_required) => {
            #[cfg(feature = "telemetry")]
            tracing::info!(
                %url,
                accepts = payment_required.accepts.len(),
                "Received 402 Payment Required"
            );
            Some(PendingPayment {
                url: url.clone(),
                payment_required,
            })
        }
        Err(e) if e.is_missing() => {
            #[cfg(feature = "telemetry")]
            tracing::debug!(%url, "402 without a payment envelope, nothing to pay");
            None
        }
        Err(e) => {
            #[cfg(feature = "telemetry")]
            tracing::warn!(%url, error = %e, "402 with a malformed payment envelope");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, HeaderValue};
    use serde_json::json;
    use x402_types::util::Base64Bytes;

    fn url() -> Url {
        "https://example.com/article".parse().unwrap()
    }

    fn envelope_header() -> String {
        Base64Bytes::encode_json(&json!({
            "accepts": [{
                "network": "eip155:84532",
                "scheme": "exact",
                "amount": "1000000",
                "payTo": "0xabc",
                "asset": "0xusdc"
            }]
        }))
        .unwrap()
        .to_string()
    }

    fn response(status: StatusCode, header: Option<&str>, body: &str) -> TransportResponse {
        let mut headers = HeaderMap::new();
        if let Some(value) = header {
            headers.insert(
                PAYMENT_REQUIRED_HEADER,
                HeaderValue::from_str(value).unwrap(),
            );
        }
        TransportResponse {
            status,
            headers,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_header_envelope_is_pending() {
        let header = envelope_header();
        let pending = intercept(
            &url(),
            &response(StatusCode::PAYMENT_REQUIRED, Some(&header), ""),
        )
        .unwrap();
        assert_eq!(pending.url, url());
        assert_eq!(pending.payment_required.accepts[0].pay_to, "0xabc");
    }

    #[test]
    fn test_body_envelope_is_pending() {
        let body = envelope_header();
        let pending = intercept(&url(), &response(StatusCode::PAYMENT_REQUIRED, None, &body));
        assert!(pending.is_some());
    }

    #[test]
    fn test_missing_envelope_is_not_actionable() {
        let pending = intercept(
            &url(),
            &response(StatusCode::PAYMENT_REQUIRED, None, "Payment Required"),
        );
        assert!(pending.is_none());
    }

    #[test]
    fn test_malformed_envelope_is_not_actionable() {
        let header = Base64Bytes::encode_json(&json!({ "accepts": [] }))
            .unwrap()
            .to_string();
        let pending = intercept(
            &url(),
            &response(StatusCode::PAYMENT_REQUIRED, Some(&header), ""),
        );
        assert!(pending.is_none());
    }

    #[test]
    fn test_other_statuses_are_ignored() {
        let header = envelope_header();
        let pending = intercept(&url(), &response(StatusCode::OK, Some(&header), ""));
        assert!(pending.is_none());
    }
}
