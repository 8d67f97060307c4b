use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::status::QuotationStatus;
use crate::modules::documents::LineItemInput;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotationRequest {
    #[serde(default)]
    pub customer_id: String,
    /// Defaults to today (Bangkok)
    pub issue_date: Option<NaiveDate>,
    /// Defaults to the issue date plus the configured validity period
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<LineItemInput>,
    pub vat_rate: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuotationRequest {
    pub customer_id: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    /// Replaces every stored item when present
    pub items: Option<Vec<LineItemInput>>,
    pub vat_rate: Option<Decimal>,
    pub notes: Option<String>,
    pub status: Option<QuotationStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotationStatusRequest {
    pub status: QuotationStatus,
}

/// Query parameters for listing quotations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationFilter {
    pub status: Option<QuotationStatus>,
    pub customer_id: Option<String>,
}
