use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::quotation::Quotation;
use super::status::QuotationStatus;
use crate::core::money::{display_amount, display_rate};
use crate::modules::customers::models::{Customer, CustomerResponse};
use crate::modules::documents::LineItemResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationResponse {
    pub id: String,
    pub number: String,
    pub customer_id: String,
    /// `null` once the customer has been deleted
    pub customer: Option<CustomerResponse>,
    pub issue_date: NaiveDate,
    pub valid_until: NaiveDate,
    pub items: Vec<LineItemResponse>,
    pub subtotal: String,
    pub vat_rate: String,
    pub vat_amount: String,
    pub total: String,
    pub notes: Option<String>,
    pub status: QuotationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuotationResponse {
    pub fn new(quotation: &Quotation, customer: Option<&Customer>) -> Self {
        Self {
            id: quotation.id.clone(),
            number: quotation.number.clone(),
            customer_id: quotation.customer_id.clone(),
            customer: customer.map(CustomerResponse::from),
            issue_date: quotation.issue_date,
            valid_until: quotation.valid_until,
            items: quotation.items.iter().map(LineItemResponse::from).collect(),
            subtotal: display_amount(quotation.subtotal),
            vat_rate: display_rate(quotation.vat_rate),
            vat_amount: display_amount(quotation.vat_amount),
            total: display_amount(quotation.total),
            notes: quotation.notes.clone(),
            status: quotation.status,
            created_at: quotation.created_at,
            updated_at: quotation.updated_at,
        }
    }
}
