use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Short form of a quotation or invoice, used in customer details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummaryResponse {
    pub id: String,
    pub number: String,
    /// Display status (`overdue` included for invoices)
    pub status: String,
    pub issue_date: NaiveDate,
    pub total: String,
}
