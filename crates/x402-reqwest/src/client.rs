//! Automatic x402 payment as `reqwest` middleware.
//!
//! [`X402Client`] pays any 402 that carries an envelope it can satisfy and
//! retries the request once with the payment attached. The retried response is
//! handed back untouched; reading the settlement or a rejection out of it is
//! up to the caller (see [`crate::payment_response`] and [`crate::interpret`]).

use http::{Extensions, HeaderMap, StatusCode};
use reqwest::{Request, Response};
use reqwest_middleware as rqm;
use url::Url;
use x402_chain_eip155::v2_eip155_exact::{ExactEvmPayer, TypedDataSigner};
use x402_types::client::PaymentError;
use x402_types::constants::PAYMENT_SIGNATURE_HEADER;
use x402_types::selector::SupportedPayment;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::executor::encode_payment;
use crate::http_transport::TransportResponse;
use crate::intercept::{PendingPayment, intercept};

/// Middleware that answers 402 responses with a signed payment.
///
/// ```rust,no_run
/// use alloy_signer_local::PrivateKeySigner;
/// use x402_chain_eip155::v2_eip155_exact::ExactEvmPayer;
/// use x402_reqwest::{ReqwestWithPayments, X402Client};
/// use x402_types::selector::SupportedPayment;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let signer: PrivateKeySigner = "0x...".parse()?;
/// let supported = SupportedPayment::default();
/// let payer = ExactEvmPayer::from_supported(signer, &supported)?;
/// let http_client = reqwest::Client::new()
///     .with_payments(X402Client::new(payer, supported))
///     .build();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct X402Client<S> {
    payer: ExactEvmPayer<S>,
    supported: SupportedPayment,
}

impl<S> X402Client<S> {
    pub fn new(payer: ExactEvmPayer<S>, supported: SupportedPayment) -> Self {
        Self { payer, supported }
    }

    pub fn supported(&self) -> &SupportedPayment {
        &self.supported
    }
}

impl<S> X402Client<S>
where
    S: TypedDataSigner + Send + Sync,
{
    /// Signs a payment for `pending` and returns the headers to retry with.
    ///
    /// # Errors
    ///
    /// [`PaymentError::UnsupportedRequirement`] when nothing in the envelope
    /// matches the supported pair, [`PaymentError::SigningFailed`] when the
    /// signer refuses.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "x402.reqwest.make_payment_headers", skip_all, err)
    )]
    pub async fn make_payment_headers(
        &self,
        pending: &PendingPayment,
    ) -> Result<HeaderMap, PaymentError> {
        let envelope = &pending.payment_required;
        let requirement = self.supported.select(envelope)?;
        #[cfg(feature = "telemetry")]
        tracing::debug!(
            network = %requirement.network,
            scheme = %requirement.scheme,
            "Selected payment requirement"
        );
        let typed_data = self.payer.authorize(requirement)?;
        let payload = self.payer.sign(envelope, requirement, typed_data).await?;
        let mut headers = HeaderMap::new();
        headers.insert(PAYMENT_SIGNATURE_HEADER, encode_payment(&payload)?);
        Ok(headers)
    }
}

/// Rebuilds a response whose body was already read.
fn restore_response(response: TransportResponse) -> Response {
    let mut restored = http::Response::new(response.body);
    *restored.status_mut() = response.status;
    *restored.headers_mut() = response.headers;
    Response::from(restored)
}

#[async_trait::async_trait]
impl<S> rqm::Middleware for X402Client<S>
where
    S: TypedDataSigner + Send + Sync + 'static,
{
    #[cfg_attr(feature = "telemetry", instrument(name = "x402.reqwest.handle", skip_all, err))]
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: rqm::Next<'_>,
    ) -> rqm::Result<Response> {
        let retry_req = req.try_clone();
        let url: Url = req.url().clone();
        let res = next.clone().run(req, extensions).await?;

        if res.status() != StatusCode::PAYMENT_REQUIRED {
            #[cfg(feature = "telemetry")]
            tracing::trace!(status = ?res.status(), "No payment required, returning response");
            return Ok(res);
        }

        let response = TransportResponse::from_reqwest(res)
            .await
            .map_err(|e| rqm::Error::Middleware(e.into()))?;
        let Some(pending) = intercept(&url, &response) else {
            return Ok(restore_response(response));
        };

        let headers = self
            .make_payment_headers(&pending)
            .await
            .map_err(|e| rqm::Error::Middleware(e.into()))?;

        let mut retry = retry_req.ok_or_else(|| {
            rqm::Error::Middleware(
                PaymentError::Transport("request cannot be cloned for retry".into()).into(),
            )
        })?;
        retry.headers_mut().extend(headers);

        #[cfg(feature = "telemetry")]
        tracing::trace!(url = %retry.url(), "Retrying request with payment headers");
        next.run(retry, extensions).await
    }
}
