use rust_decimal::{Decimal, RoundingStrategy};

/// Fraction digits used when an amount leaves the engine (Thai baht, satang)
pub const DISPLAY_SCALE: u32 = 2;

/// Rounds an amount for display. Stored values keep their 6 fraction
/// digits; only rendering drops to satang.
pub fn round_for_display(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_SCALE);
    rounded
}

/// Fraction digits of the money columns, `DECIMAL(20,6)`
pub const STORED_SCALE: u32 = 6;

/// Largest magnitude a `DECIMAL(20,6)` column holds
pub fn max_stored_amount() -> Decimal {
    Decimal::from_i128_with_scale(99_999_999_999_999_999_999, STORED_SCALE)
}

/// Rounds a derived figure (VAT, withholding) to the stored precision, so
/// a freshly computed document reads back unchanged.
pub fn round_for_storage(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(STORED_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Amount as a fixed 2-digit string, e.g. `"2140.00"`
pub fn display_amount(amount: Decimal) -> String {
    round_for_display(amount).to_string()
}

/// Rate as a plain decimal string without trailing zeros, e.g. `"7"`, `"1.5"`
pub fn display_rate(rate: Decimal) -> String {
    rate.normalize().to_string()
}
