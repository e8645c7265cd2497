//! Attaching [`X402Client`] to a `reqwest` client.

use reqwest::{Client, ClientBuilder};
use reqwest_middleware as rqm;

use crate::client::X402Client;

/// Installs x402 payment handling on a [`Client`] or [`ClientBuilder`].
///
/// The result is a [`rqm::ClientBuilder`], so further middleware can be
/// stacked before calling `build()`. Middleware added later runs inside the
/// payment handling and sees both the unpaid and the paid request.
pub trait ReqwestWithPayments: Sized {
    type Output;

    fn with_payments<S>(self, x402_client: X402Client<S>) -> Self::Output
    where
        X402Client<S>: rqm::Middleware;
}

impl ReqwestWithPayments for Client {
    type Output = rqm::ClientBuilder;

    fn with_payments<S>(self, x402_client: X402Client<S>) -> Self::Output
    where
        X402Client<S>: rqm::Middleware,
    {
        rqm::ClientBuilder::new(self).with(x402_client)
    }
}

impl ReqwestWithPayments for ClientBuilder {
    /// Fails when the underlying `reqwest` client cannot be built.
    type Output = Result<rqm::ClientBuilder, reqwest::Error>;

    fn with_payments<S>(self, x402_client: X402Client<S>) -> Self::Output
    where
        X402Client<S>: rqm::Middleware,
    {
        Ok(self.build()?.with_payments(x402_client))
    }
}
