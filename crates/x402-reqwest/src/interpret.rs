//! Turning a failed paid request into a [`PaymentError`].

use http::HeaderMap;
use x402_types::client::PaymentError;
use x402_types::constants::PAYMENT_RESPONSE_HEADER;
use x402_types::proto::PaymentResponse;

use crate::http_transport::TransportResponse;

/// Decodes the `Payment-Response` header, if the server sent a readable one.
pub fn payment_response(headers: &HeaderMap) -> Option<PaymentResponse> {
    let value = headers.get(PAYMENT_RESPONSE_HEADER)?;
    PaymentResponse::from_header(value.as_bytes()).ok()
}

/// Explains why a paid request did not succeed.
///
/// A structured reason from the `Payment-Response` header becomes
/// [`PaymentError::PaymentRejected`]. Anything else, including a missing or
/// undecodable header, falls back to [`PaymentError::PaymentFailed`] with the
/// raw body attached.
pub fn interpret(response: &TransportResponse) -> PaymentError {
    let reason = payment_response(&response.headers)
        .as_ref()
        .and_then(|payment_response| payment_response.reason().map(ToOwned::to_owned));
    match reason {
        Some(reason) => {
            #[cfg(feature = "telemetry")]
            tracing::warn!(status = %response.status, %reason, "Payment rejected by server");
            PaymentError::PaymentRejected(reason)
        }
        None => {
            #[cfg(feature = "telemetry")]
            tracing::warn!(
                status = %response.status,
                "Payment failed without structured reason"
            );
            PaymentError::PaymentFailed {
                status: response.status.as_u16(),
                body: response.body.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderValue, StatusCode};
    use serde_json::json;
    use x402_types::util::Base64Bytes;

    fn response(status: u16, payment_response: Option<&str>, body: &str) -> TransportResponse {
        let mut headers = HeaderMap::new();
        if let Some(value) = payment_response {
            headers.insert(
                PAYMENT_RESPONSE_HEADER,
                HeaderValue::from_str(value).unwrap(),
            );
        }
        TransportResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers,
            body: body.to_string(),
        }
    }

    fn encode(value: serde_json::Value) -> String {
        Base64Bytes::encode_json(&value).unwrap().to_string()
    }

    #[test]
    fn test_error_reason_is_rejection() {
        let header = encode(json!({ "success": false, "errorReason": "insufficient_funds" }));
        let err = interpret(&response(402, Some(&header), ""));
        assert!(
            matches!(&err, PaymentError::PaymentRejected(reason) if reason == "insufficient_funds")
        );
        assert_eq!(err.to_string(), "insufficient_funds");
    }

    #[test]
    fn test_error_field_is_rejection() {
        let header = encode(json!({ "error": "authorization expired" }));
        let err = interpret(&response(400, Some(&header), "ignored"));
        assert_eq!(err.to_string(), "authorization expired");
    }

    #[test]
    fn test_missing_header_falls_back_to_body() {
        let err = interpret(&response(500, None, "upstream exploded"));
        match &err {
            PaymentError::PaymentFailed { status, body } => {
                assert_eq!(*status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "Payment failed without valid x402 payment-response header: upstream exploded"
        );
    }

    #[test]
    fn test_undecodable_header_falls_back_to_body() {
        let err = interpret(&response(402, Some("not base64 json"), "try again"));
        assert!(matches!(err, PaymentError::PaymentFailed { status: 402, .. }));
    }

    #[test]
    fn test_header_without_reason_falls_back_to_body() {
        let header = encode(json!({ "success": false }));
        let err = interpret(&response(402, Some(&header), "no reason given"));
        assert!(
            matches!(err, PaymentError::PaymentFailed { ref body, .. } if body == "no reason given")
        );
    }

    #[test]
    fn test_payment_response_on_success() {
        let header = encode(json!({ "success": true, "transaction": "0xabc" }));
        let response = response(200, Some(&header), "");
        let settlement = payment_response(&response.headers).unwrap();
        assert_eq!(settlement.transaction.as_deref(), Some("0xabc"));
    }
}
