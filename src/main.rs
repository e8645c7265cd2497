//! x402-unlock command-line client.
//!
//! Fetches a URL and, when the server answers `402 Payment Required` with an
//! x402 envelope, shows the price, signs an EIP-3009 authorization on Base
//! Sepolia and fetches the resource again with the payment attached.
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `EVM_PRIVATE_KEY` is the paying wallet
//! - `X402_NETWORK`, `X402_SCHEME`, `X402_TIMEOUT` override the defaults
//! - `RUST_LOG` controls log verbosity

mod config;
mod telemetry;
mod unlock;

use clap::Parser;
use dotenvy::dotenv;

use crate::config::Cli;

#[tokio::main]
async fn main() {
    // Load .env variables
    dotenv().ok();
    telemetry::init();

    let cli = Cli::parse();
    if let Err(e) = unlock::run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
