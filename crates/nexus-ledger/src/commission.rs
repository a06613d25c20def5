use rust_decimal::Decimal;

/// 15% of the quoted trip amount.
pub const COMMISSION_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Commission owed to the agent for a quote. Negative quotes count as zero.
pub fn compute_commission(free_amount: Decimal) -> Decimal {
    free_amount.max(Decimal::ZERO) * COMMISSION_RATE
}
