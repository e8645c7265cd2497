//! Command-line configuration for `x402-unlock`.
//!
//! Every flag can also come from the environment; `.env` is loaded before
//! parsing.

use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;
use x402_types::chain::ChainId;
use x402_types::constants::{
    BASE_SEPOLIA_RPC_URL, BASE_SEPOLIA_USDC, SUPPORTED_NETWORK, SUPPORTED_SCHEME,
};
use x402_types::selector::SupportedPayment;

/// CLI arguments for the x402 unlock client.
#[derive(Parser, Debug)]
#[command(name = "x402-unlock", version)]
#[command(about = "Pay for a resource behind HTTP 402 with an x402 payment")]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
    #[command(flatten)]
    pub unlock: UnlockArgs,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print a freshly generated private key and its address
    Keygen,
    /// Print the token balance of the paying wallet
    Balance(BalanceArgs),
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct BalanceArgs {
    /// Wallet to query instead of the address of the private key
    #[arg(long, short)]
    pub address: Option<Address>,

    /// Hex-encoded private key of the paying wallet
    #[arg(long, short = 'k', env = "EVM_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// JSON-RPC endpoint of the network
    #[arg(long, env = "X402_RPC_URL", default_value = BASE_SEPOLIA_RPC_URL)]
    pub rpc_url: Url,

    /// ERC-20 token contract to read the balance of
    #[arg(long, env = "X402_ASSET", default_value = BASE_SEPOLIA_USDC)]
    pub asset: Address,
}

#[derive(clap::Args, Debug, Clone)]
pub struct UnlockArgs {
    /// URL of the paywalled resource
    #[arg(required = true)]
    pub url: Option<Url>,

    /// Hex-encoded private key of the paying wallet
    #[arg(long, short = 'k', env = "EVM_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Network to pay on, as a CAIP-2 id or a known network name
    #[arg(
        long,
        short,
        env = "X402_NETWORK",
        default_value = SUPPORTED_NETWORK,
        value_parser = parse_network
    )]
    pub network: ChainId,

    /// Payment scheme to pay with
    #[arg(long, short, env = "X402_SCHEME", default_value = SUPPORTED_SCHEME)]
    pub scheme: String,

    /// Request timeout in seconds
    #[arg(long, short, env = "X402_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Pay without asking for confirmation
    #[arg(long, short)]
    pub yes: bool,

    /// Show what the server asks for and stop
    #[arg(long)]
    pub dry_run: bool,

    /// Write the unlocked content to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl UnlockArgs {
    pub fn supported(&self) -> SupportedPayment {
        SupportedPayment::new(self.network.clone(), self.scheme.clone())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Accepts `eip155:84532` as well as `base-sepolia`.
fn parse_network(value: &str) -> Result<ChainId, String> {
    if let Some(chain_id) = ChainId::from_network_name(value) {
        return Ok(chain_id);
    }
    value.parse::<ChainId>().map_err(|e| e.to_string())
}
