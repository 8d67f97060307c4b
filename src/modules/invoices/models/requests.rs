use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::status::InvoiceStatus;
use crate::modules::documents::LineItemInput;

/// New invoice. With `quotationId`, omitted customer, items, VAT rate and
/// notes are taken from that quotation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub customer_id: Option<String>,
    pub quotation_id: Option<String>,
    /// Defaults to today (Bangkok)
    pub issue_date: Option<NaiveDate>,
    /// Defaults to the issue date plus the configured payment term
    pub due_date: Option<NaiveDate>,
    pub items: Option<Vec<LineItemInput>>,
    pub vat_rate: Option<Decimal>,
    /// Defaults to 0
    pub withholding_tax_rate: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceRequest {
    pub customer_id: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    /// Replaces every stored item when present
    pub items: Option<Vec<LineItemInput>>,
    pub vat_rate: Option<Decimal>,
    pub withholding_tax_rate: Option<Decimal>,
    pub notes: Option<String>,
    pub status: Option<InvoiceStatus>,
    /// Payment time recorded with `status: paid`; defaults to now
    pub paid_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceStatusRequest {
    pub status: InvoiceStatus,
    pub paid_date: Option<DateTime<Utc>>,
}

/// Query parameters for listing invoices. `status` matches the display
/// status, so `overdue` selects unpaid invoices past their due date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub customer_id: Option<String>,
}
