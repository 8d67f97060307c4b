// Quotation: a priced offer to a customer, prior to invoicing.
//
// Totals are derived from the items and the VAT rate and recomputed
// whenever either changes. Status moves along `QuotationStatus`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::requests::{CreateQuotationRequest, UpdateQuotationRequest};
use super::status::QuotationStatus;
use crate::core::money::display_amount;
use crate::core::{AppError, Owner, Result};
use crate::modules::documents::{
    build_line_items, check_date_order, normalize_notes, DocumentSettings,
    DocumentSummaryResponse, LineItem, Revision,
};
use crate::modules::taxes::TaxCalculator;

const VALID_UNTIL_LABEL: &str = "Valid until date";

#[derive(Debug, Clone, PartialEq)]
pub struct Quotation {
    pub id: String,
    pub owner: Owner,
    /// `QT-{year}-{seq}`, unique per owner
    pub number: String,
    pub customer_id: String,
    pub issue_date: NaiveDate,
    pub valid_until: NaiveDate,
    pub items: Vec<LineItem>,
    pub vat_rate: Decimal,
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    pub status: QuotationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated content of a new quotation, before a number is assigned
#[derive(Debug, Clone)]
pub struct QuotationDraft {
    pub customer_id: String,
    pub issue_date: NaiveDate,
    pub valid_until: NaiveDate,
    pub items: Vec<LineItem>,
    pub vat_rate: Decimal,
    pub notes: Option<String>,
}

impl QuotationDraft {
    pub fn from_request(
        request: CreateQuotationRequest,
        settings: &DocumentSettings,
        calculator: &TaxCalculator,
        today: NaiveDate,
    ) -> Result<Self> {
        let customer_id = request.customer_id.trim().to_string();
        if customer_id.is_empty() {
            return Err(AppError::validation("Customer is required"));
        }

        let items = build_line_items(&request.items, settings)?;

        let vat_rate = request.vat_rate.unwrap_or(settings.default_vat_rate);
        calculator.validate_rate("VAT rate", vat_rate)?;
        // Rejected here so a failed create never reserves a number
        calculator.compute_quotation_totals(&items, vat_rate)?;

        let issue_date = request.issue_date.unwrap_or(today);
        let valid_until = request
            .valid_until
            .unwrap_or_else(|| settings.default_valid_until(issue_date));
        check_date_order(issue_date, valid_until, VALID_UNTIL_LABEL)?;

        Ok(Self {
            customer_id,
            issue_date,
            valid_until,
            items,
            vat_rate,
            notes: normalize_notes(request.notes.as_deref())?,
        })
    }
}

/// Validated partial update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct QuotationPatch {
    pub customer_id: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub items: Option<Vec<LineItem>>,
    pub vat_rate: Option<Decimal>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
    pub status: Option<QuotationStatus>,
}

impl QuotationPatch {
    pub fn from_request(
        request: UpdateQuotationRequest,
        settings: &DocumentSettings,
        calculator: &TaxCalculator,
    ) -> Result<Self> {
        let items = match request.items {
            Some(inputs) => Some(build_line_items(&inputs, settings)?),
            None => None,
        };

        if let Some(rate) = request.vat_rate {
            calculator.validate_rate("VAT rate", rate)?;
        }

        let notes = match request.notes {
            Some(notes) => Some(normalize_notes(Some(&notes))?),
            None => None,
        };

        Ok(Self {
            customer_id: request
                .customer_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
            issue_date: request.issue_date,
            valid_until: request.valid_until,
            items,
            vat_rate: request.vat_rate,
            notes,
            status: request.status,
        })
    }

    pub fn status_only(status: QuotationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Quotation {
    pub fn issue(
        owner: Owner,
        number: String,
        draft: QuotationDraft,
        calculator: &TaxCalculator,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let mut quotation = Self {
            id: Uuid::new_v4().to_string(),
            owner,
            number,
            customer_id: draft.customer_id,
            issue_date: draft.issue_date,
            valid_until: draft.valid_until,
            items: draft.items,
            vat_rate: draft.vat_rate,
            subtotal: Decimal::ZERO,
            vat_amount: Decimal::ZERO,
            total: Decimal::ZERO,
            notes: draft.notes,
            status: QuotationStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        quotation.recompute(calculator)?;
        Ok(quotation)
    }

    /// Merge a patch into the stored quotation. Pure; runs under the row lock.
    pub fn apply(
        mut self,
        patch: QuotationPatch,
        calculator: &TaxCalculator,
        now: DateTime<Utc>,
    ) -> Result<Revision<Quotation>> {
        if let Some(status) = patch.status {
            self.status = self.status.transition(status)?;
        }

        if let Some(customer_id) = patch.customer_id {
            self.customer_id = customer_id;
        }
        if let Some(issue_date) = patch.issue_date {
            self.issue_date = issue_date;
        }
        if let Some(valid_until) = patch.valid_until {
            self.valid_until = valid_until;
        }
        check_date_order(self.issue_date, self.valid_until, VALID_UNTIL_LABEL)?;

        if let Some(notes) = patch.notes {
            self.notes = notes;
        }

        let items_replaced = patch.items.is_some();
        let needs_recompute = items_replaced || patch.vat_rate.is_some();
        if let Some(items) = patch.items {
            self.items = items;
        }
        if let Some(vat_rate) = patch.vat_rate {
            self.vat_rate = vat_rate;
        }
        if needs_recompute {
            self.recompute(calculator)?;
        }

        self.updated_at = now;
        Ok(Revision::new(self, items_replaced))
    }

    fn recompute(&mut self, calculator: &TaxCalculator) -> Result<()> {
        let totals = calculator.compute_quotation_totals(&self.items, self.vat_rate)?;
        self.subtotal = totals.subtotal;
        self.vat_amount = totals.vat_amount;
        self.total = totals.total;
        Ok(())
    }
}

/// Header-only view used for counts, dashboards and customer details
#[derive(Debug, Clone, PartialEq)]
pub struct QuotationSummary {
    pub id: String,
    pub number: String,
    pub customer_id: String,
    pub status: QuotationStatus,
    pub issue_date: NaiveDate,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<&Quotation> for QuotationSummary {
    fn from(quotation: &Quotation) -> Self {
        Self {
            id: quotation.id.clone(),
            number: quotation.number.clone(),
            customer_id: quotation.customer_id.clone(),
            status: quotation.status,
            issue_date: quotation.issue_date,
            total: quotation.total,
            created_at: quotation.created_at,
        }
    }
}

impl QuotationSummary {
    pub fn to_response(&self) -> DocumentSummaryResponse {
        DocumentSummaryResponse {
            id: self.id.clone(),
            number: self.number.clone(),
            status: self.status.to_string(),
            issue_date: self.issue_date,
            total: display_amount(self.total),
        }
    }
}
