//! Numeric EVM chain IDs and their CAIP-2 form.

use std::fmt::{Display, Formatter};
use x402_types::chain::ChainId;

/// The CAIP-2 namespace for EVM-compatible chains.
pub const EIP155_NAMESPACE: &str = "eip155";

/// A numeric chain ID for EVM-compatible networks.
///
/// This is the `chainId` of the EIP-712 domain an authorization is signed under.
/// It converts to and from a [`ChainId`] such as `eip155:84532`.
///
/// # Example
///
/// ```
/// use x402_chain_eip155::chain::Eip155ChainReference;
/// use x402_types::chain::ChainId;
///
/// let base_sepolia = Eip155ChainReference::new(84532);
/// let chain_id: ChainId = base_sepolia.into();
/// assert_eq!(chain_id.to_string(), "eip155:84532");
///
/// let parsed = Eip155ChainReference::try_from(&chain_id).unwrap();
/// assert_eq!(parsed.inner(), 84532);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Eip155ChainReference(u64);

impl Eip155ChainReference {
    pub const fn new(chain_id: u64) -> Self {
        Self(chain_id)
    }

    pub const fn inner(&self) -> u64 {
        self.0
    }

    pub fn as_chain_id(&self) -> ChainId {
        ChainId::new(EIP155_NAMESPACE, self.0.to_string())
    }
}

impl From<Eip155ChainReference> for ChainId {
    fn from(value: Eip155ChainReference) -> Self {
        value.as_chain_id()
    }
}

impl TryFrom<&ChainId> for Eip155ChainReference {
    type Error = Eip155ChainReferenceFormatError;

    fn try_from(chain_id: &ChainId) -> Result<Self, Self::Error> {
        match (chain_id.namespace(), chain_id.reference().parse::<u64>()) {
            (EIP155_NAMESPACE, Ok(reference)) => Ok(Self(reference)),
            (EIP155_NAMESPACE, Err(_)) => Err(Eip155ChainReferenceFormatError::InvalidReference(
                chain_id.reference().to_owned(),
            )),
            (namespace, _) => Err(Eip155ChainReferenceFormatError::InvalidNamespace(
                namespace.to_owned(),
            )),
        }
    }
}

impl TryFrom<ChainId> for Eip155ChainReference {
    type Error = Eip155ChainReferenceFormatError;

    fn try_from(chain_id: ChainId) -> Result<Self, Self::Error> {
        Self::try_from(&chain_id)
    }
}

/// The chain cannot be paid on with an EVM signer.
#[derive(Debug, thiserror::Error)]
pub enum Eip155ChainReferenceFormatError {
    #[error("Invalid namespace {0}, expected eip155")]
    InvalidNamespace(String),
    #[error("Invalid eip155 chain reference {0}")]
    InvalidReference(String),
}

impl Display for Eip155ChainReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}
