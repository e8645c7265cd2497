//! Building the ERC-3009 authorization for a selected requirement.
//!
//! The authorization's time window starts now and lasts
//! [`AUTHORIZATION_VALIDITY_SECS`]. Its nonce is 32 fresh random bytes per
//! attempt, which is what protects a signed payment against replay.

use alloy_primitives::{Address, B256};
use rand::{Rng, rng};
use std::sync::Arc;
use x402_types::client::PaymentError;
use x402_types::constants::AUTHORIZATION_VALIDITY_SECS;
use x402_types::proto::PaymentRequirement;
use x402_types::timestamp::UnixTimestamp;

use crate::v2_eip155_exact::types::Authorization;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> UnixTimestamp;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> UnixTimestamp {
        UnixTimestamp::now()
    }
}

/// Source of authorization nonces.
pub trait NonceSource: Send + Sync {
    fn nonce(&self) -> B256;
}

/// 32 bytes from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn nonce(&self) -> B256 {
        let nonce: [u8; 32] = rng().random();
        B256::from(nonce)
    }
}

/// Fills in an [`Authorization`] from a requirement and the payer's address.
#[derive(Clone)]
pub struct AuthorizationBuilder {
    clock: Arc<dyn Clock>,
    nonces: Arc<dyn NonceSource>,
    validity_secs: u64,
}

impl Default for AuthorizationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AuthorizationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationBuilder")
            .field("validity_secs", &self.validity_secs)
            .finish_non_exhaustive()
    }
}

impl AuthorizationBuilder {
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            nonces: Arc::new(RandomNonce),
            validity_secs: AUTHORIZATION_VALIDITY_SECS,
        }
    }

    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_nonce_source<N: NonceSource + 'static>(mut self, nonces: N) -> Self {
        self.nonces = Arc::new(nonces);
        self
    }

    pub fn with_validity_secs(mut self, validity_secs: u64) -> Self {
        self.validity_secs = validity_secs;
        self
    }

    /// Authorizes a transfer of the requirement's raw amount from `payer` to `payTo`.
    pub fn build(
        &self,
        requirement: &PaymentRequirement,
        payer: Address,
    ) -> Result<Authorization, PaymentError> {
        let value = requirement
            .raw_amount()
            .ok_or_else(|| PaymentError::SigningFailed("requirement has no amount".into()))?;
        let valid_after = self.clock.now();
        let valid_before = valid_after + self.validity_secs;
        let authorization = Authorization {
            from: payer.to_checksum(None),
            to: requirement.pay_to.clone(),
            value: value.to_string(),
            valid_after,
            valid_before,
            nonce: self.nonces.nonce(),
        };
        #[cfg(feature = "telemetry")]
        tracing::debug!(?authorization, "Constructed authorization payload");
        Ok(authorization)
    }
}
