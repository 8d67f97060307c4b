use rust_decimal::Decimal;
use serde::Serialize;

/// Derived money figures of a quotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotationTotals {
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
}

/// Derived money figures of an invoice. `total` may be negative when the
/// withholding exceeds subtotal plus VAT; it is never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub withholding_tax: Decimal,
    pub total: Decimal,
}

impl QuotationTotals {
    pub fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            vat_amount: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}
