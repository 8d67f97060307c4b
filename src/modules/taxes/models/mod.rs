mod totals;
mod withholding;

pub use totals::{InvoiceTotals, QuotationTotals};
pub use withholding::{WithholdingRatePreset, WITHHOLDING_RATE_PRESETS};
