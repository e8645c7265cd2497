//! Fetch, confirm, pay, print.

use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use http::HeaderMap;
use std::error::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use url::Url;
use x402_chain_eip155::chain::erc20::{http_provider, token_balance};
use x402_chain_eip155::v2_eip155_exact::ExactEvmPayer;
use x402_reqwest::{
    Content, ContentKind, HttpTransport, PaymentExecutor, ReqwestTransport, intercept,
};
use x402_types::constants::{BASE_SEPOLIA_USDC, DEFAULT_CURRENCY};

use crate::config::{BalanceArgs, Cli, Command, UnlockArgs};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Some(Command::Keygen) => keygen(),
        Some(Command::Balance(args)) => balance(args).await,
        None => unlock(cli.unlock).await,
    }
}

fn keygen() -> Result<(), Box<dyn Error>> {
    let signer = PrivateKeySigner::random();
    println!("Address:     {}", signer.address());
    println!("Private key: {}", signer.to_bytes());
    Ok(())
}

fn load_signer(private_key: Option<&str>) -> Result<PrivateKeySigner, Box<dyn Error>> {
    let signer = private_key
        .ok_or("no private key: pass --private-key or set EVM_PRIVATE_KEY")?
        .parse()?;
    Ok(signer)
}

async fn balance(args: BalanceArgs) -> Result<(), Box<dyn Error>> {
    let owner = match args.address {
        Some(address) => address,
        None => load_signer(args.private_key.as_deref())?.address(),
    };
    let provider = http_provider(args.rpc_url);
    let balance = token_balance(&provider, args.asset, owner).await?;
    let amount = balance
        .formatted()
        .ok_or("token balance is too large to display")?;
    if balance.is_zero() {
        tracing::warn!(%owner, asset = %args.asset, "Wallet holds none of the token");
    }
    println!("{owner}: {amount} {}", asset_label(args.asset));
    Ok(())
}

fn asset_label(asset: Address) -> String {
    if asset.to_string().eq_ignore_ascii_case(BASE_SEPOLIA_USDC) {
        DEFAULT_CURRENCY.to_string()
    } else {
        asset.to_string()
    }
}

async fn unlock(args: UnlockArgs) -> Result<(), Box<dyn Error>> {
    let url: Url = args.url.clone().ok_or("missing URL")?;
    let mut transport = ReqwestTransport::new();
    if let Some(timeout) = args.timeout() {
        transport = transport.with_timeout(timeout);
    }

    let response = transport.get(&url, HeaderMap::new()).await?;
    let Some(pending) = intercept(&url, &response) else {
        if response.status.is_success() {
            tracing::info!(status = %response.status, "Resource is not paywalled");
            let content = Content {
                content_type: response.content_type().map(ToOwned::to_owned),
                body: response.body,
                settlement: None,
            };
            return write_content(&args, &content).await;
        }
        return Err(format!(
            "{} answered {} without a usable payment envelope",
            url, response.status
        )
        .into());
    };

    let supported = args.supported();
    let display = supported.display(&pending.payment_required)?;
    eprintln!("Payment required: {display}");
    if args.dry_run {
        return Ok(());
    }

    let signer = load_signer(args.private_key.as_deref())?;
    if !args.yes && !confirm(&format!("Pay from {}? [y/N] ", signer.address())).await? {
        eprintln!("Payment cancelled");
        return Ok(());
    }

    let payer = ExactEvmPayer::from_supported(signer, &supported)?;
    let executor = PaymentExecutor::new(payer, transport);
    let content = executor.pay(&pending, &supported).await?;
    if let Some(transaction) = content
        .settlement
        .as_ref()
        .and_then(|settlement| settlement.transaction.as_deref())
    {
        tracing::info!(%transaction, "Payment settled");
    }
    write_content(&args, &content).await
}

/// Asks on stderr so that stdout carries only the unlocked content.
async fn confirm(prompt: &str) -> Result<bool, Box<dyn Error>> {
    let answer = ask(
        prompt,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stderr(),
    )
    .await?;
    Ok(answer)
}

async fn ask<R, W>(prompt: &str, mut input: R, mut prompt_out: W) -> std::io::Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    prompt_out.write_all(prompt.as_bytes()).await?;
    prompt_out.flush().await?;
    let mut answer = String::new();
    input.read_line(&mut answer).await?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

async fn write_content(args: &UnlockArgs, content: &Content) -> Result<(), Box<dyn Error>> {
    tracing::debug!(kind = ?content.kind(), bytes = content.body.len(), "Unlocked content");
    match &args.output {
        Some(path) => {
            tokio::fs::write(path, content.body.as_bytes()).await?;
            let kind = match content.kind() {
                ContentKind::Html => "HTML",
                ContentKind::PlainText => "text",
            };
            eprintln!("Saved {kind} content to {}", path.display());
        }
        None => println!("{}", content.body),
    }
    Ok(())
}
