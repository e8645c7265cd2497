//! Client-side payment signing for the V2 EIP-155 "exact" scheme.
//!
//! [`ExactEvmPayer`] turns a selected requirement into a signed
//! [`PaymentPayload`]: build the authorization, sign it as EIP-712 typed data
//! under the token's domain, wrap both into the x402 envelope.
//!
//! # Usage
//!
//! ```
//! use alloy_signer_local::PrivateKeySigner;
//! use x402_chain_eip155::chain::Eip155ChainReference;
//! use x402_chain_eip155::v2_eip155_exact::ExactEvmPayer;
//!
//! let payer = ExactEvmPayer::new(PrivateKeySigner::random(), Eip155ChainReference::new(84532));
//! assert_eq!(payer.chain_reference().inner(), 84532);
//! ```

use x402_types::client::PaymentError;
use x402_types::constants::{DEFAULT_CURRENCY, DEFAULT_DOMAIN_VERSION, SUPPORTED_SCHEME};
use x402_types::networks::network_label;
use x402_types::proto::{PaymentRequired, PaymentRequirement, X402Version2};
use x402_types::selector::SupportedPayment;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::chain::{Eip155ChainReference, Eip155ChainReferenceFormatError};
use crate::v2_eip155_exact::authorization::AuthorizationBuilder;
use crate::v2_eip155_exact::signer::{TypedData, TypedDataDomain, TypedDataSigner};
use crate::v2_eip155_exact::types::{Authorization, ExactEvmPayload, PaymentPayload};

/// Pays `exact` requirements on one EVM chain with one signer.
///
/// Holds no mutable state: concurrent payments share nothing but the signer,
/// and each gets its own nonce.
#[derive(Debug, Clone)]
pub struct ExactEvmPayer<S> {
    signer: S,
    chain_reference: Eip155ChainReference,
    builder: AuthorizationBuilder,
}

impl<S> ExactEvmPayer<S> {
    pub fn new(signer: S, chain_reference: Eip155ChainReference) -> Self {
        Self {
            signer,
            chain_reference,
            builder: AuthorizationBuilder::new(),
        }
    }

    /// Creates a payer for the network of `supported`, which must be an `eip155` chain.
    pub fn from_supported(
        signer: S,
        supported: &SupportedPayment,
    ) -> Result<Self, Eip155ChainReferenceFormatError> {
        let chain_reference = Eip155ChainReference::try_from(&supported.network)?;
        Ok(Self::new(signer, chain_reference))
    }

    pub fn with_authorization_builder(mut self, builder: AuthorizationBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn chain_reference(&self) -> Eip155ChainReference {
        self.chain_reference
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }
}

impl<S> ExactEvmPayer<S>
where
    S: TypedDataSigner + Send + Sync,
{
    /// Binds `authorization` to the token domain named by `requirement`.
    ///
    /// `extra.name` and `extra.version` default to `USDC` and `2`; the
    /// verifying contract is the requirement's `asset`.
    pub fn typed_data(
        &self,
        requirement: &PaymentRequirement,
        authorization: Authorization,
    ) -> Result<TypedData, PaymentError> {
        let verifying_contract = requirement
            .asset
            .clone()
            .ok_or_else(|| PaymentError::SigningFailed("requirement has no asset".into()))?;
        let domain = TypedDataDomain {
            name: requirement
                .extra_name()
                .unwrap_or(DEFAULT_CURRENCY)
                .to_string(),
            version: requirement
                .extra_version()
                .unwrap_or(DEFAULT_DOMAIN_VERSION)
                .to_string(),
            chain_id: self.chain_reference.inner(),
            verifying_contract,
        };
        Ok(TypedData::transfer_with_authorization(
            domain,
            authorization,
        ))
    }

    /// Builds the authorization for `requirement` and binds it to the token domain.
    ///
    /// Fails when the requirement is for another chain or scheme, names no
    /// asset or carries no amount.
    pub fn authorize(&self, requirement: &PaymentRequirement) -> Result<TypedData, PaymentError> {
        let chain_id = self.chain_reference.as_chain_id().to_string();
        if requirement.network != chain_id || requirement.scheme != SUPPORTED_SCHEME {
            return Err(PaymentError::UnsupportedRequirement {
                required: format!("{}/{}", network_label(&chain_id), SUPPORTED_SCHEME),
                offered: vec![format!(
                    "{}/{}",
                    network_label(&requirement.network),
                    requirement.scheme
                )],
            });
        }
        let authorization = self
            .builder
            .build(requirement, self.signer.signer_address())?;
        self.typed_data(requirement, authorization)
    }

    /// Signs `typed_data` once and wraps the result into the x402 payload.
    #[cfg_attr(feature = "telemetry", instrument(name = "x402.eip155.sign", skip_all, err))]
    pub async fn sign(
        &self,
        envelope: &PaymentRequired,
        requirement: &PaymentRequirement,
        typed_data: TypedData,
    ) -> Result<PaymentPayload, PaymentError> {
        let signature = self
            .signer
            .sign_typed_data(&typed_data)
            .await
            .map_err(|e| PaymentError::SigningFailed(e.to_string()))?;
        #[cfg(feature = "telemetry")]
        tracing::debug!(%signature, "Signature obtained");

        Ok(PaymentPayload {
            x402_version: X402Version2,
            resource: envelope.resource.clone(),
            accepted: requirement.clone(),
            payload: ExactEvmPayload {
                signature,
                authorization: typed_data.message,
            },
        })
    }

    /// Builds and signs the payment for `requirement`, one of `envelope.accepts`.
    ///
    /// Signs exactly once. Nothing is sent anywhere.
    #[cfg_attr(feature = "telemetry", instrument(name = "x402.eip155.pay", skip_all, err, fields(
        network = %requirement.network,
        scheme = %requirement.scheme,
    )))]
    pub async fn pay(
        &self,
        envelope: &PaymentRequired,
        requirement: &PaymentRequirement,
    ) -> Result<PaymentPayload, PaymentError> {
        let typed_data = self.authorize(requirement)?;
        self.sign(envelope, requirement, typed_data).await
    }
}
