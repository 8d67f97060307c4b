use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

/// What to do with a caller-supplied line item amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountPolicy {
    /// Reject amounts further than the tolerance from quantity × unit price
    #[default]
    Verify,
    /// Keep the submitted amount as is
    Trust,
}

/// Rules shared by the quotation and invoice lifecycles
#[derive(Debug, Clone)]
pub struct DocumentSettings {
    pub amount_policy: AmountPolicy,
    pub amount_tolerance: Decimal,
    /// VAT applied when the caller omits `vatRate`
    pub default_vat_rate: Decimal,
    /// Days between issue date and default `validUntil`
    pub quotation_validity_days: i64,
    /// Days between issue date and default `dueDate`
    pub invoice_payment_days: i64,
}

impl DocumentSettings {
    pub fn default_valid_until(&self, issue_date: NaiveDate) -> NaiveDate {
        issue_date + Duration::days(self.quotation_validity_days)
    }

    pub fn default_due_date(&self, issue_date: NaiveDate) -> NaiveDate {
        issue_date + Duration::days(self.invoice_payment_days)
    }
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            amount_policy: AmountPolicy::Verify,
            amount_tolerance: Decimal::new(1, 2),
            default_vat_rate: Decimal::from(7),
            quotation_validity_days: 30,
            invoice_payment_days: 30,
        }
    }
}
