//! Human-facing projection of a payment requirement.
//!
//! Amounts on the wire are raw on-chain integers. For display they are scaled
//! by a fixed 6 decimals and rounded half away from zero to 2 places; the
//! signed value always stays the raw integer.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;

use crate::constants::{DEFAULT_CURRENCY, DISPLAY_DECIMALS, DISPLAY_PRECISION};
use crate::networks::network_label;
use crate::proto::{PaymentRequired, PaymentRequirement};

/// What a user is asked to confirm before paying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayInfo {
    /// Decimal amount such as `"1.00"`; `None` if the raw amount is out of range.
    pub amount: Option<String>,
    pub currency: String,
    /// Known network name, or the raw chain ID.
    pub network: String,
    pub description: Option<String>,
    pub pay_to: String,
    pub scheme: String,
}

impl DisplayInfo {
    pub fn project(envelope: &PaymentRequired, requirement: &PaymentRequirement) -> Self {
        let description = envelope
            .resource
            .as_ref()
            .and_then(|r| r.description.clone())
            .or_else(|| requirement.description.clone());
        DisplayInfo {
            amount: requirement.raw_amount().and_then(format_amount),
            currency: requirement
                .extra_name()
                .unwrap_or(DEFAULT_CURRENCY)
                .to_string(),
            network: network_label(&requirement.network),
            description,
            pay_to: requirement.pay_to.clone(),
            scheme: requirement.scheme.clone(),
        }
    }
}

impl fmt::Display for DisplayInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.amount.as_deref().unwrap_or("?");
        write!(
            f,
            "{} {} on {} to {} ({})",
            amount, self.currency, self.network, self.pay_to, self.scheme
        )?;
        if let Some(description) = &self.description {
            write!(f, ": {description}")?;
        }
        Ok(())
    }
}

/// Renders a raw integer amount with [`DISPLAY_DECIMALS`] implied decimals.
///
/// ```
/// use x402_types::display::format_amount;
///
/// assert_eq!(format_amount("1000000").as_deref(), Some("1.00"));
/// assert_eq!(format_amount("5000").as_deref(), Some("0.01"));
/// assert_eq!(format_amount("abc"), None);
/// ```
pub fn format_amount(raw: &str) -> Option<String> {
    format_units(raw, DISPLAY_DECIMALS)
}

/// Renders a raw integer amount of a token with `decimals` decimals, rounded
/// to [`DISPLAY_PRECISION`] places.
///
/// `None` when the amount is not an integer or does not fit a `Decimal` at
/// that scale.
pub fn format_units(raw: &str, decimals: u32) -> Option<String> {
    let value: i128 = raw.parse().ok()?;
    let decimal = Decimal::try_from_i128_with_scale(value, decimals).ok()?;
    let rounded =
        decimal.round_dp_with_strategy(DISPLAY_PRECISION, RoundingStrategy::MidpointAwayFromZero);
    Some(format!("{:.*}", DISPLAY_PRECISION as usize, rounded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(document: serde_json::Value) -> PaymentRequired {
        PaymentRequired::from_json(document).unwrap()
    }

    #[test]
    fn test_format_amount_scales_and_rounds() {
        assert_eq!(format_amount("1000000").as_deref(), Some("1.00"));
        assert_eq!(format_amount("1").as_deref(), Some("0.00"));
        assert_eq!(format_amount("0").as_deref(), Some("0.00"));
        assert_eq!(format_amount("4999").as_deref(), Some("0.00"));
        assert_eq!(format_amount("5000").as_deref(), Some("0.01"));
        assert_eq!(format_amount("1234567").as_deref(), Some("1.23"));
        assert_eq!(format_amount("1235000").as_deref(), Some("1.24"));
        assert_eq!(format_amount("250000000").as_deref(), Some("250.00"));
    }

    #[test]
    fn test_format_amount_out_of_range() {
        // Above the 96-bit mantissa of `Decimal`.
        assert_eq!(format_amount("100000000000000000000000000000"), None);
        // Above u256, let alone i128.
        assert_eq!(format_amount(&"9".repeat(80)), None);
    }

    #[test]
    fn test_format_units_uses_token_decimals() {
        assert_eq!(format_units("12340000", 6).as_deref(), Some("12.34"));
        assert_eq!(format_units("1500000000000000000", 18).as_deref(), Some("1.50"));
        assert_eq!(format_units("7", 0).as_deref(), Some("7.00"));
        assert_eq!(format_units("1", 29), None);
    }

    #[test]
    fn test_project_defaults() {
        let envelope = envelope(json!({
            "accepts": [{ "network": "eip155:84532", "scheme": "exact",
              "amount": "1000000", "payTo": "0xabc", "asset": "0xusdc" }]
        }));
        let info = DisplayInfo::project(&envelope, &envelope.accepts[0]);
        assert_eq!(
            info,
            DisplayInfo {
                amount: Some("1.00".into()),
                currency: "USDC".into(),
                network: "base-sepolia".into(),
                description: None,
                pay_to: "0xabc".into(),
                scheme: "exact".into(),
            }
        );
    }

    #[test]
    fn test_project_uses_extra_name_and_resource_description() {
        let envelope = envelope(json!({
            "resource": { "description": "Premium article" },
            "accepts": [{
                "network": "eip155:84532", "scheme": "exact", "maxAmountRequired": "10000",
                "payTo": "0xabc", "description": "fallback",
                "extra": { "name": "EURC", "version": "2" }
            }]
        }));
        let info = DisplayInfo::project(&envelope, &envelope.accepts[0]);
        assert_eq!(info.amount.as_deref(), Some("0.01"));
        assert_eq!(info.currency, "EURC");
        assert_eq!(info.description.as_deref(), Some("Premium article"));
    }

    #[test]
    fn test_project_falls_back_to_requirement_description_and_raw_network() {
        let envelope = envelope(json!({
            "accepts": [{
                "network": "eip155:424242", "scheme": "exact", "amount": "1",
                "payTo": "0xabc", "description": "Weather data"
            }]
        }));
        let info = DisplayInfo::project(&envelope, &envelope.accepts[0]);
        assert_eq!(info.description.as_deref(), Some("Weather data"));
        assert_eq!(info.network, "eip155:424242");
    }

    #[test]
    fn test_display_line() {
        let info = DisplayInfo {
            amount: Some("1.00".into()),
            currency: "USDC".into(),
            network: "base-sepolia".into(),
            description: Some("Article".into()),
            pay_to: "0xabc".into(),
            scheme: "exact".into(),
        };
        assert_eq!(
            info.to_string(),
            "1.00 USDC on base-sepolia to 0xabc (exact): Article"
        );
    }
}
