//! Read-only ERC-20 queries: the payer's token balance before paying.

use alloy_primitives::{Address, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_sol_types::sol;
use url::Url;
use x402_types::display::format_units;

#[cfg(feature = "telemetry")]
use tracing::instrument;

sol!(
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
    }
);

/// A raw token balance together with the decimals reported by the token contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBalance {
    pub raw: U256,
    pub decimals: u8,
}

impl TokenBalance {
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Balance scaled by the token decimals and rounded to 2 places, e.g. `"12.34"`.
    ///
    /// `None` if the balance is too large to render.
    pub fn formatted(&self) -> Option<String> {
        format_units(&self.raw.to_string(), u32::from(self.decimals))
    }
}

/// A JSON-RPC provider over HTTP.
pub fn http_provider(rpc_url: Url) -> impl Provider {
    ProviderBuilder::new().connect_http(rpc_url)
}

/// Reads `balanceOf(owner)` and `decimals()` of the token at `asset`.
///
/// # Errors
///
/// Any failed `eth_call`, or a return value that does not decode.
#[cfg_attr(
    feature = "telemetry",
    instrument(name = "x402.eip155.token_balance", skip(provider), err)
)]
pub async fn token_balance<P: Provider>(
    provider: &P,
    asset: Address,
    owner: Address,
) -> Result<TokenBalance, alloy_contract::Error> {
    let token = IERC20::new(asset, provider);
    let raw = token.balanceOf(owner).call().await?;
    let decimals = token.decimals().call().await?;
    #[cfg(feature = "telemetry")]
    tracing::debug!(%raw, decimals, "Fetched token balance");
    Ok(TokenBalance { raw, decimals })
}
