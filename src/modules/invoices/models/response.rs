use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::invoice::Invoice;
use super::status::InvoiceStatus;
use crate::core::money::{display_amount, display_rate};
use crate::modules::customers::models::{Customer, CustomerResponse};
use crate::modules::documents::LineItemResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: String,
    pub number: String,
    pub customer_id: String,
    /// `null` once the customer has been deleted
    pub customer: Option<CustomerResponse>,
    pub quotation_id: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub items: Vec<LineItemResponse>,
    pub subtotal: String,
    pub vat_rate: String,
    pub vat_amount: String,
    pub withholding_tax_rate: String,
    pub withholding_tax: String,
    pub total: String,
    pub notes: Option<String>,
    /// Display status, `overdue` included
    pub status: InvoiceStatus,
    pub stored_status: InvoiceStatus,
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InvoiceResponse {
    pub fn new(invoice: &Invoice, customer: Option<&Customer>, today: NaiveDate) -> Self {
        Self {
            id: invoice.id.clone(),
            number: invoice.number.clone(),
            customer_id: invoice.customer_id.clone(),
            customer: customer.map(CustomerResponse::from),
            quotation_id: invoice.quotation_id.clone(),
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            items: invoice.items.iter().map(Into::into).collect(),
            subtotal: display_amount(invoice.subtotal),
            vat_rate: display_rate(invoice.vat_rate),
            vat_amount: display_amount(invoice.vat_amount),
            withholding_tax_rate: display_rate(invoice.withholding_tax_rate),
            withholding_tax: display_amount(invoice.withholding_tax),
            total: display_amount(invoice.total),
            notes: invoice.notes.clone(),
            status: invoice.display_status(today),
            stored_status: invoice.status,
            paid_date: invoice.paid_date,
            created_at: invoice.created_at,
            updated_at: invoice.updated_at,
        }
    }
}
