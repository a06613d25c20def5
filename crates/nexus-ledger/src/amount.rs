use std::str::FromStr;

use nexus_core::ValidationError;
use rust_decimal::{Decimal, RoundingStrategy};

/// Money is stored in whole cents.
pub const MONEY_SCALE: u32 = 2;

/// Lenient parse used by the client form: blank, malformed or negative input
/// becomes zero instead of an error. Sub-cent digits are rounded away so the
/// value matches what the store keeps.
pub fn parse_amount_or_zero(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim())
        .ok()
        .filter(|amount| !amount.is_sign_negative())
        .map(to_cents)
        .unwrap_or(Decimal::ZERO)
}

/// Strict parse used by the payment dialog. Only a strictly positive amount
/// is accepted.
pub fn parse_payment_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required("amount"));
    }

    let amount = Decimal::from_str(trimmed)
        .map_err(|_| ValidationError::invalid("amount", "amount must be a number"))?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::invalid(
            "amount",
            "amount must be greater than zero",
        ));
    }
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(ValidationError::invalid(
            "amount",
            "amount must not have more than 2 decimal places",
        ));
    }

    Ok(amount)
}

fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Money for display, always two decimal places.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = to_cents(amount);
    format!("{rounded:.2}")
}
