use rust_decimal::Decimal;

use crate::core::error::AppError;
use crate::core::money::{max_stored_amount, round_for_storage};
use crate::modules::documents::models::LineItem;
use crate::modules::taxes::models::{InvoiceTotals, QuotationTotals};

/// Maximum fraction digits of a stored rate (DECIMAL(7,4))
const MAX_RATE_SCALE: u32 = 4;

/// Computes document totals from line items and percentage rates.
///
/// Pure and stateless. Derived figures are rounded to the 6 stored fraction
/// digits, display rounding happens when rendered. Every figure must fit the
/// money columns; anything larger is a validation error, never a panic.
#[derive(Debug, Clone, Copy)]
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Sum of the items' amounts (not recomputed from quantity × price)
    pub fn subtotal(&self, items: &[LineItem]) -> Result<Decimal, AppError> {
        let subtotal = items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.amount))
            .ok_or_else(|| too_large("Subtotal"))?;
        storable("Subtotal", subtotal)
    }

    /// `base × rate / 100`
    pub fn percentage(&self, base: Decimal, rate: Decimal) -> Result<Decimal, AppError> {
        base.checked_mul(rate)
            .map(|product| round_for_storage(product / Decimal::ONE_HUNDRED))
            .ok_or_else(|| too_large("Tax amount"))
    }

    /// subtotal, VAT and total of a quotation
    pub fn compute_quotation_totals(
        &self,
        items: &[LineItem],
        vat_rate: Decimal,
    ) -> Result<QuotationTotals, AppError> {
        let subtotal = self.subtotal(items)?;
        let vat_amount = self.percentage(subtotal, vat_rate)?;

        Ok(QuotationTotals {
            subtotal,
            vat_amount,
            total: storable("Total", subtotal + vat_amount)?,
        })
    }

    /// subtotal, VAT, withholding and net total of an invoice
    pub fn compute_invoice_totals(
        &self,
        items: &[LineItem],
        vat_rate: Decimal,
        withholding_tax_rate: Decimal,
    ) -> Result<InvoiceTotals, AppError> {
        let subtotal = self.subtotal(items)?;
        let vat_amount = self.percentage(subtotal, vat_rate)?;
        let withholding_tax = self.percentage(subtotal, withholding_tax_rate)?;

        Ok(InvoiceTotals {
            subtotal,
            vat_amount,
            withholding_tax,
            total: storable("Total", subtotal + vat_amount - withholding_tax)?,
        })
    }

    /// Validate a percentage rate: 0–100 with at most 4 decimal places
    pub fn validate_rate(&self, label: &str, rate: Decimal) -> Result<(), AppError> {
        if rate < Decimal::ZERO {
            return Err(AppError::Validation(format!("{} cannot be negative", label)));
        }

        if rate > Decimal::ONE_HUNDRED {
            return Err(AppError::Validation(format!("{} cannot exceed 100%", label)));
        }

        if rate.normalize().scale() > MAX_RATE_SCALE {
            return Err(AppError::Validation(format!(
                "{} cannot have more than {} decimal places",
                label, MAX_RATE_SCALE
            )));
        }

        Ok(())
    }
}

fn too_large(label: &str) -> AppError {
    AppError::Validation(format!(
        "{} cannot exceed {}",
        label,
        max_stored_amount().trunc()
    ))
}

fn storable(label: &str, amount: Decimal) -> Result<Decimal, AppError> {
    if amount.abs() > max_stored_amount() {
        return Err(too_large(label));
    }
    Ok(amount)
}

impl Default for TaxCalculator {
    fn default() -> Self {
        Self::new()
    }
}
