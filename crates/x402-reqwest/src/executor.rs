//! Paying for a resource and fetching it again.
//!
//! One [`PaymentExecutor::execute`] call walks
//! `Building -> Signing -> Submitting -> Success | Failed`: it signs once,
//! sends one `GET` with the `Payment-Signature` header and never retries.
//! Nothing survives the call; dropping it halfway leaves at most an unsent
//! authorization in memory.

use http::{HeaderMap, HeaderValue};
use url::Url;
use x402_chain_eip155::v2_eip155_exact::{ExactEvmPayer, PaymentPayload, TypedDataSigner};
use x402_types::client::PaymentError;
use x402_types::constants::PAYMENT_SIGNATURE_HEADER;
use x402_types::proto::{PaymentRequired, PaymentRequirement, PaymentResponse};
use x402_types::selector::SupportedPayment;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::http_transport::{HttpTransport, TransportResponse};
use crate::intercept::PendingPayment;
use crate::interpret::{interpret, payment_response};

/// How unlocked content should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Html,
    PlainText,
}

/// The resource body returned once payment went through.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub body: String,
    pub content_type: Option<String>,
    /// Settlement details, when the server reported them in `Payment-Response`.
    pub settlement: Option<PaymentResponse>,
}

impl Content {
    /// HTML when the server says so or the body looks like an HTML document.
    pub fn kind(&self) -> ContentKind {
        let declared_html = self
            .content_type
            .as_deref()
            .is_some_and(|content_type| content_type.trim_start().starts_with("text/html"));
        let body = self.body.trim_start();
        let looks_html = starts_with_ignore_case(body, "<!doctype")
            || starts_with_ignore_case(body, "<html");
        if declared_html || looks_html {
            ContentKind::Html
        } else {
            ContentKind::PlainText
        }
    }

    fn from_response(response: TransportResponse) -> Self {
        let content_type = response.content_type().map(ToOwned::to_owned);
        let settlement = payment_response(&response.headers);
        Self {
            body: response.body,
            content_type,
            settlement,
        }
    }
}

impl AsRef<str> for Content {
    fn as_ref(&self) -> &str {
        &self.body
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// base64(JSON) of the payload, ready to go into `Payment-Signature`.
pub fn encode_payment(payload: &PaymentPayload) -> Result<HeaderValue, PaymentError> {
    let encoded = payload
        .to_header()
        .map_err(|e| PaymentError::Encoding(e.to_string()))?;
    HeaderValue::from_str(&encoded).map_err(|e| PaymentError::Encoding(e.to_string()))
}

/// Reverses [`encode_payment`].
pub fn decode_payment(value: &HeaderValue) -> Result<PaymentPayload, PaymentError> {
    PaymentPayload::from_header(value.as_bytes())
        .map_err(|e| PaymentError::Encoding(e.to_string()))
}

/// Signs payments with an [`ExactEvmPayer`] and submits them over an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct PaymentExecutor<S, T> {
    payer: ExactEvmPayer<S>,
    transport: T,
}

impl<S, T> PaymentExecutor<S, T> {
    pub fn new(payer: ExactEvmPayer<S>, transport: T) -> Self {
        Self { payer, transport }
    }

    pub fn payer(&self) -> &ExactEvmPayer<S> {
        &self.payer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<S, T> PaymentExecutor<S, T>
where
    S: TypedDataSigner + Send + Sync,
    T: HttpTransport + Send + Sync,
{
    /// Pays `requirement` and fetches `url` again with the payment attached.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "x402.reqwest.execute", skip_all, fields(url = %url), err)
    )]
    pub async fn execute(
        &self,
        url: &Url,
        envelope: &PaymentRequired,
        requirement: &PaymentRequirement,
    ) -> Result<Content, PaymentError> {
        #[cfg(feature = "telemetry")]
        tracing::debug!(
            phase = "building",
            network = %requirement.network,
            scheme = %requirement.scheme,
            "Building authorization"
        );
        let typed_data = self.payer.authorize(requirement)?;

        #[cfg(feature = "telemetry")]
        tracing::debug!(phase = "signing", "Requesting signature");
        let payload = self.payer.sign(envelope, requirement, typed_data).await?;

        let mut headers = HeaderMap::new();
        headers.insert(PAYMENT_SIGNATURE_HEADER, encode_payment(&payload)?);
        #[cfg(feature = "telemetry")]
        tracing::debug!(phase = "submitting", %url, "Retrying request with payment");
        let response = self
            .transport
            .get(url, headers)
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        if response.status.is_success() {
            #[cfg(feature = "telemetry")]
            tracing::info!(phase = "success", status = %response.status, "Payment accepted");
            Ok(Content::from_response(response))
        } else {
            #[cfg(feature = "telemetry")]
            tracing::debug!(phase = "failed", status = %response.status, "Payment not accepted");
            Err(interpret(&response))
        }
    }

    /// Selects the requirement matching `supported` and executes it.
    pub async fn pay(
        &self,
        pending: &PendingPayment,
        supported: &SupportedPayment,
    ) -> Result<Content, PaymentError> {
        let requirement = supported.select(&pending.payment_required)?;
        self.execute(&pending.url, &pending.payment_required, requirement)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, Bytes};
    use async_trait::async_trait;
    use http::StatusCode;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use x402_chain_eip155::chain::Eip155ChainReference;
    use x402_chain_eip155::v2_eip155_exact::{SignerError, TypedData};
    use x402_types::constants::PAYMENT_RESPONSE_HEADER;
    use x402_types::util::Base64Bytes;

    use crate::http_transport::TransportError;

    struct StubSigner {
        fail: bool,
    }

    #[async_trait]
    impl TypedDataSigner for StubSigner {
        fn signer_address(&self) -> Address {
            Address::repeat_byte(0x01)
        }

        async fn sign_typed_data(&self, _typed_data: &TypedData) -> Result<Bytes, SignerError> {
            if self.fail {
                Err(SignerError::Other("signer refused".into()))
            } else {
                Ok(Bytes::from(vec![0x22; 65]))
            }
        }
    }

    /// Answers every request with the same canned response and keeps the request headers.
    struct StubTransport {
        response: TransportResponse,
        calls: AtomicUsize,
        last_headers: Mutex<Option<HeaderMap>>,
    }

    impl StubTransport {
        fn new(status: u16, headers: HeaderMap, body: &str) -> Self {
            Self {
                response: TransportResponse {
                    status: StatusCode::from_u16(status).unwrap(),
                    headers,
                    body: body.to_string(),
                },
                calls: AtomicUsize::new(0),
                last_headers: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn get(
            &self,
            _url: &Url,
            headers: HeaderMap,
        ) -> Result<TransportResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_headers.lock().unwrap() = Some(headers);
            Ok(self.response.clone())
        }
    }

    fn envelope() -> PaymentRequired {
        PaymentRequired::from_json(json!({
            "resource": { "url": "https://example.com/article", "description": "Article" },
            "accepts": [{
                "network": "eip155:84532",
                "scheme": "exact",
                "amount": "1000000",
                "payTo": "0xabc",
                "asset": "0xusdc"
            }]
        }))
        .unwrap()
    }

    fn url() -> Url {
        "https://example.com/article".parse().unwrap()
    }

    /// Fails every request the way a non-HTTP transport would.
    struct UnreachableTransport;

    #[async_trait]
    impl HttpTransport for UnreachableTransport {
        async fn get(
            &self,
            _url: &Url,
            _headers: HeaderMap,
        ) -> Result<TransportResponse, TransportError> {
            Err(TransportError::Other("connection reset by peer".into()))
        }
    }

    fn executor<T>(fail: bool, transport: T) -> PaymentExecutor<StubSigner, T> {
        let payer = ExactEvmPayer::new(StubSigner { fail }, Eip155ChainReference::new(84532));
        PaymentExecutor::new(payer, transport)
    }

    fn ok_transport(body: &str) -> StubTransport {
        StubTransport::new(200, HeaderMap::new(), body)
    }

    #[tokio::test]
    async fn test_success_returns_content() {
        let executor = executor(false, ok_transport("<html>...</html>"));
        let envelope = envelope();
        let content = executor
            .execute(&url(), &envelope, &envelope.accepts[0])
            .await
            .unwrap();
        assert_eq!(content.body, "<html>...</html>");
        assert_eq!(content.kind(), ContentKind::Html);
        assert!(content.settlement.is_none());
        assert_eq!(executor.transport().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_request_carries_decodable_payment() {
        let executor = executor(false, ok_transport("ok"));
        let envelope = envelope();
        executor
            .execute(&url(), &envelope, &envelope.accepts[0])
            .await
            .unwrap();

        let headers = executor.transport().last_headers.lock().unwrap().take();
        let headers = headers.unwrap();
        let value = headers.get(PAYMENT_SIGNATURE_HEADER).unwrap();
        let payload = decode_payment(value).unwrap();
        assert_eq!(payload.accepted, envelope.accepts[0]);
        assert_eq!(payload.resource, envelope.resource);
        assert_eq!(payload.payload.signature, Bytes::from(vec![0x22; 65]));
        assert_eq!(payload.payload.authorization.to, "0xabc");
        assert_eq!(payload.payload.authorization.value, "1000000");
        let authorization = &payload.payload.authorization;
        assert_eq!(authorization.valid_before - authorization.valid_after, 300);
    }

    #[tokio::test]
    async fn test_rejection_surfaces_reason() {
        let mut headers = HeaderMap::new();
        let reason = Base64Bytes::encode_json(&json!({ "errorReason": "insufficient_funds" }))
            .unwrap()
            .to_string();
        headers.insert(PAYMENT_RESPONSE_HEADER, HeaderValue::from_str(&reason).unwrap());
        let executor = executor(false, StubTransport::new(402, headers, ""));
        let envelope = envelope();
        let err = executor
            .execute(&url(), &envelope, &envelope.accepts[0])
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::PaymentRejected(_)));
        assert_eq!(err.to_string(), "insufficient_funds");
    }

    #[tokio::test]
    async fn test_unstructured_failure_keeps_body() {
        let executor = executor(false, StubTransport::new(500, HeaderMap::new(), "boom"));
        let envelope = envelope();
        let err = executor
            .execute(&url(), &envelope, &envelope.accepts[0])
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Payment failed without valid x402 payment-response header: boom"
        );
    }

    #[tokio::test]
    async fn test_signing_failure_makes_no_request() {
        let executor = executor(true, ok_transport("never"));
        let envelope = envelope();
        let err = executor
            .execute(&url(), &envelope, &envelope.accepts[0])
            .await
            .unwrap_err();
        assert!(
            matches!(err, PaymentError::SigningFailed(ref reason) if reason == "signer refused")
        );
        assert_eq!(executor.transport().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_transport_error() {
        let executor = executor(false, UnreachableTransport);
        let envelope = envelope();
        let err = executor
            .execute(&url(), &envelope, &envelope.accepts[0])
            .await
            .unwrap_err();
        match err {
            PaymentError::Transport(reason) => {
                assert_eq!(reason, "HTTP request failed: connection reset by peer")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pay_selects_supported_requirement() {
        let executor = executor(false, ok_transport("paid"));
        let pending = PendingPayment {
            url: url(),
            payment_required: PaymentRequired::from_json(json!({
                "accepts": [
                    {
                        "network": "eip155:1", "scheme": "exact", "amount": "1",
                        "payTo": "0xmainnet", "asset": "0xusdc"
                    },
                    {
                        "network": "eip155:84532", "scheme": "exact", "amount": "2",
                        "payTo": "0xtestnet", "asset": "0xusdc"
                    }
                ]
            }))
            .unwrap(),
        };
        let content = executor
            .pay(&pending, &SupportedPayment::default())
            .await
            .unwrap();
        assert_eq!(content.body, "paid");
        let headers = executor.transport().last_headers.lock().unwrap().take();
        let headers = headers.unwrap();
        let payload = decode_payment(headers.get(PAYMENT_SIGNATURE_HEADER).unwrap()).unwrap();
        assert_eq!(payload.accepted.pay_to, "0xtestnet");
    }

    #[tokio::test]
    async fn test_pay_unsupported_makes_no_request() {
        let executor = executor(false, ok_transport("never"));
        let pending = PendingPayment {
            url: url(),
            payment_required: PaymentRequired::from_json(json!({
                "accepts": [{
                    "network": "eip155:1", "scheme": "exact", "amount": "1", "payTo": "0xabc"
                }]
            }))
            .unwrap(),
        };
        let err = executor
            .pay(&pending, &SupportedPayment::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::UnsupportedRequirement { .. }));
        assert_eq!(executor.transport().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_content_kind() {
        let content = |body: &str, content_type: Option<&str>| Content {
            body: body.into(),
            content_type: content_type.map(Into::into),
            settlement: None,
        };
        let html = Some("text/html; charset=utf-8");
        assert_eq!(content("  <!DOCTYPE html><p>x</p>", None).kind(), ContentKind::Html);
        assert_eq!(content("<html></html>", None).kind(), ContentKind::Html);
        assert_eq!(content("plain words", html).kind(), ContentKind::Html);
        assert_eq!(content("plain words", Some("text/plain")).kind(), ContentKind::PlainText);
        assert_eq!(content("<p>fragment</p>", None).kind(), ContentKind::PlainText);
        assert_eq!(content("é", None).kind(), ContentKind::PlainText);
    }

    #[test]
    fn test_settlement_is_exposed() {
        let mut headers = HeaderMap::new();
        let settlement =
            Base64Bytes::encode_json(&json!({ "success": true, "transaction": "0xfeed" }))
                .unwrap()
                .to_string();
        headers.insert(PAYMENT_RESPONSE_HEADER, HeaderValue::from_str(&settlement).unwrap());
        let content = Content::from_response(TransportResponse {
            status: StatusCode::OK,
            headers,
            body: "ok".into(),
        });
        assert_eq!(
            content.settlement.and_then(|s| s.transaction).as_deref(),
            Some("0xfeed")
        );
    }
}
