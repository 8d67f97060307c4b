// Customer record of an owner's address book.
//
// Optional text fields submitted as empty strings are stored as NULL. A
// partial update only touches the fields present in the request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::validation::{optional_email, optional_text, required_text};
use crate::core::{Owner, Result};
use crate::modules::documents::DocumentSummaryResponse;

const MAX_NAME_LEN: usize = 200;
const MAX_TAX_ID_LEN: usize = 20;
const MAX_ADDRESS_LEN: usize = 500;
const MAX_PHONE_LEN: usize = 20;
const MAX_EMAIL_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: String,
    pub owner: Owner,
    pub name: String,
    /// Thai taxpayer identification number
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[serde(default)]
    pub name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Partial update; `None` keeps the stored value, `""` clears it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Customer {
    /// Validate a create request. The owner comes from the caller's scope,
    /// never from the request body.
    pub fn new(owner: Owner, request: CreateCustomerRequest, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            owner,
            name: required_text("Customer name", &request.name, MAX_NAME_LEN)?,
            tax_id: optional_text("Tax ID", request.tax_id.as_deref(), MAX_TAX_ID_LEN)?,
            address: optional_text("Address", request.address.as_deref(), MAX_ADDRESS_LEN)?,
            phone: optional_text("Phone", request.phone.as_deref(), MAX_PHONE_LEN)?,
            email: optional_email("Email", request.email.as_deref(), MAX_EMAIL_LEN)?,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update, validating only the supplied fields
    pub fn apply(mut self, request: UpdateCustomerRequest, now: DateTime<Utc>) -> Result<Self> {
        if let Some(name) = request.name {
            self.name = required_text("Customer name", &name, MAX_NAME_LEN)?;
        }
        if let Some(tax_id) = request.tax_id {
            self.tax_id = optional_text("Tax ID", Some(&tax_id), MAX_TAX_ID_LEN)?;
        }
        if let Some(address) = request.address {
            self.address = optional_text("Address", Some(&address), MAX_ADDRESS_LEN)?;
        }
        if let Some(phone) = request.phone {
            self.phone = optional_text("Phone", Some(&phone), MAX_PHONE_LEN)?;
        }
        if let Some(email) = request.email {
            self.email = optional_email("Email", Some(&email), MAX_EMAIL_LEN)?;
        }
        self.updated_at = now;
        Ok(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quotation_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_count: Option<u64>,
}

impl From<&Customer> for CustomerResponse {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            tax_id: customer.tax_id.clone(),
            address: customer.address.clone(),
            phone: customer.phone.clone(),
            email: customer.email.clone(),
            created_at: customer.created_at,
            updated_at: customer.updated_at,
            quotation_count: None,
            invoice_count: None,
        }
    }
}

impl CustomerResponse {
    pub fn with_counts(mut self, quotations: u64, invoices: u64) -> Self {
        self.quotation_count = Some(quotations);
        self.invoice_count = Some(invoices);
        self
    }
}

/// Single customer with the latest documents issued to them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailResponse {
    #[serde(flatten)]
    pub customer: CustomerResponse,
    pub recent_quotations: Vec<DocumentSummaryResponse>,
    pub recent_invoices: Vec<DocumentSummaryResponse>,
}
