//! Protocol constants shared by the buyer workspace.

/// Network the buyer pays on: Base Sepolia.
pub const SUPPORTED_NETWORK: &str = "eip155:84532";

/// The only payment scheme the buyer understands.
pub const SUPPORTED_SCHEME: &str = "exact";

/// Decimals used to render amounts for humans.
///
/// Fixed rather than read from the asset contract, which is only correct for
/// 6-decimal assets such as USDC.
pub const DISPLAY_DECIMALS: u32 = 6;

/// Digits after the decimal point in a rendered amount.
pub const DISPLAY_PRECISION: u32 = 2;

/// Length of the `[validAfter, validBefore]` window of an authorization, in seconds.
pub const AUTHORIZATION_VALIDITY_SECS: u64 = 300;

/// Protocol version written into outbound payment payloads.
pub const X402_VERSION: u8 = 2;

/// Response header carrying the base64 payment-required envelope.
pub const PAYMENT_REQUIRED_HEADER: &str = "payment-required";

/// Request header carrying the base64 payment payload.
pub const PAYMENT_SIGNATURE_HEADER: &str = "payment-signature";

/// Response header carrying the base64 payment result.
pub const PAYMENT_RESPONSE_HEADER: &str = "payment-response";

/// Currency shown when a requirement does not name its asset.
pub const DEFAULT_CURRENCY: &str = "USDC";

/// EIP-712 domain version used when a requirement does not carry one.
pub const DEFAULT_DOMAIN_VERSION: &str = "2";

/// USDC token contract on Base Sepolia.
pub const BASE_SEPOLIA_USDC: &str = "0x036CbD53842c5426634e7929541eC2318f3dCF7e";

/// Public JSON-RPC endpoint of Base Sepolia.
pub const BASE_SEPOLIA_RPC_URL: &str = "https://sepolia.base.org";
