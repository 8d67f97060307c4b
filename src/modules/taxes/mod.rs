// Monetary calculator: subtotal, VAT, withholding tax and net totals.

pub mod controllers;
pub mod models;
pub mod services;

pub use models::{InvoiceTotals, QuotationTotals};
pub use services::TaxCalculator;
