// Invoice: a billing document, optionally derived from an accepted quotation.
//
// Totals follow the items, the VAT rate and the withholding rate; a change
// to any of them recomputes all derived figures. `paid_date` is set when
// the invoice becomes paid and cleared when the payment is reversed.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::requests::{CreateInvoiceRequest, UpdateInvoiceRequest};
use super::status::InvoiceStatus;
use crate::core::money::display_amount;
use crate::core::{AppError, Owner, Result};
use crate::modules::documents::{
    build_line_items, check_date_order, normalize_notes, DocumentSettings,
    DocumentSummaryResponse, LineItem, Revision,
};
use crate::modules::quotations::{Quotation, QuotationStatus};
use crate::modules::taxes::TaxCalculator;

const DUE_DATE_LABEL: &str = "Due date";

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: String,
    pub owner: Owner,
    /// `INV-{year}-{seq}`, unique per owner
    pub number: String,
    pub customer_id: String,
    pub quotation_id: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub items: Vec<LineItem>,
    pub vat_rate: Decimal,
    pub withholding_tax_rate: Decimal,
    pub subtotal: Decimal,
    pub vat_amount: Decimal,
    pub withholding_tax: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    /// Stored status; never `Overdue`
    pub status: InvoiceStatus,
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated content of a new invoice, before a number is assigned
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    pub customer_id: String,
    pub quotation_id: Option<String>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub items: Vec<LineItem>,
    pub vat_rate: Decimal,
    pub withholding_tax_rate: Decimal,
    pub notes: Option<String>,
}

impl InvoiceDraft {
    /// Validate a create request. `quotation` is the already owner-scoped
    /// quotation named by `quotationId`, if any.
    pub fn from_request(
        request: CreateInvoiceRequest,
        quotation: Option<&Quotation>,
        settings: &DocumentSettings,
        calculator: &TaxCalculator,
        today: NaiveDate,
    ) -> Result<Self> {
        let requested_customer = request
            .customer_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let (customer_id, item_inputs, vat_rate, notes) = match quotation {
            Some(quotation) => {
                if quotation.status != QuotationStatus::Accepted {
                    return Err(AppError::validation(format!(
                        "Quotation {} must be accepted before it can be invoiced",
                        quotation.number
                    )));
                }
                if let Some(customer_id) = &requested_customer {
                    if customer_id != &quotation.customer_id {
                        return Err(AppError::validation(
                            "Customer does not match the quotation's customer",
                        ));
                    }
                }

                let items = request.items.unwrap_or_else(|| {
                    quotation.items.iter().map(LineItem::to_input).collect()
                });
                let notes = request
                    .notes
                    .or_else(|| Some(format!("Ref. quotation {}", quotation.number)));

                (
                    quotation.customer_id.clone(),
                    items,
                    request.vat_rate.unwrap_or(quotation.vat_rate),
                    notes,
                )
            }
            None => (
                requested_customer.ok_or_else(|| AppError::validation("Customer is required"))?,
                request.items.unwrap_or_default(),
                request.vat_rate.unwrap_or(settings.default_vat_rate),
                request.notes,
            ),
        };

        let items = build_line_items(&item_inputs, settings)?;

        calculator.validate_rate("VAT rate", vat_rate)?;
        let withholding_tax_rate = request.withholding_tax_rate.unwrap_or(Decimal::ZERO);
        calculator.validate_rate("Withholding tax rate", withholding_tax_rate)?;
        calculator.compute_invoice_totals(&items, vat_rate, withholding_tax_rate)?;

        let issue_date = request.issue_date.unwrap_or(today);
        let due_date = request
            .due_date
            .unwrap_or_else(|| settings.default_due_date(issue_date));
        check_date_order(issue_date, due_date, DUE_DATE_LABEL)?;

        Ok(Self {
            customer_id,
            quotation_id: quotation.map(|q| q.id.clone()),
            issue_date,
            due_date,
            items,
            vat_rate,
            withholding_tax_rate,
            notes: normalize_notes(notes.as_deref())?,
        })
    }
}

/// Validated partial update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct InvoicePatch {
    pub customer_id: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub items: Option<Vec<LineItem>>,
    pub vat_rate: Option<Decimal>,
    pub withholding_tax_rate: Option<Decimal>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
    pub status: Option<InvoiceStatus>,
    pub paid_date: Option<DateTime<Utc>>,
}

impl InvoicePatch {
    pub fn from_request(
        request: UpdateInvoiceRequest,
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
        if let Some(rate) = request.withholding_tax_rate {
            calculator.validate_rate("Withholding tax rate", rate)?;
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
            due_date: request.due_date,
            items,
            vat_rate: request.vat_rate,
            withholding_tax_rate: request.withholding_tax_rate,
            notes,
            status: request.status,
            paid_date: request.paid_date,
        })
    }

    pub fn status_only(status: InvoiceStatus, paid_date: Option<DateTime<Utc>>) -> Self {
        Self {
            status: Some(status),
            paid_date,
            ..Self::default()
        }
    }
}

impl Invoice {
    pub fn issue(
        owner: Owner,
        number: String,
        draft: InvoiceDraft,
        calculator: &TaxCalculator,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let mut invoice = Self {
            id: Uuid::new_v4().to_string(),
            owner,
            number,
            customer_id: draft.customer_id,
            quotation_id: draft.quotation_id,
            issue_date: draft.issue_date,
            due_date: draft.due_date,
            items: draft.items,
            vat_rate: draft.vat_rate,
            withholding_tax_rate: draft.withholding_tax_rate,
            subtotal: Decimal::ZERO,
            vat_amount: Decimal::ZERO,
            withholding_tax: Decimal::ZERO,
            total: Decimal::ZERO,
            notes: draft.notes,
            status: InvoiceStatus::Unpaid,
            paid_date: None,
            created_at: now,
            updated_at: now,
        };
        invoice.recompute(calculator)?;
        Ok(invoice)
    }

    pub fn display_status(&self, today: NaiveDate) -> InvoiceStatus {
        InvoiceStatus::display(self.status, self.due_date, today)
    }

    /// Merge a patch into the stored invoice. Pure; runs under the row lock.
    pub fn apply(
        mut self,
        patch: InvoicePatch,
        calculator: &TaxCalculator,
        now: DateTime<Utc>,
    ) -> Result<Revision<Invoice>> {
        self.apply_status(patch.status, patch.paid_date, now)?;

        if let Some(customer_id) = patch.customer_id {
            self.customer_id = customer_id;
        }
        if let Some(issue_date) = patch.issue_date {
            self.issue_date = issue_date;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        check_date_order(self.issue_date, self.due_date, DUE_DATE_LABEL)?;

        if let Some(notes) = patch.notes {
            self.notes = notes;
        }

        let items_replaced = patch.items.is_some();
        let needs_recompute = items_replaced
            || patch.vat_rate.is_some()
            || patch.withholding_tax_rate.is_some();
        if let Some(items) = patch.items {
            self.items = items;
        }
        if let Some(vat_rate) = patch.vat_rate {
            self.vat_rate = vat_rate;
        }
        if let Some(rate) = patch.withholding_tax_rate {
            self.withholding_tax_rate = rate;
        }
        if needs_recompute {
            self.recompute(calculator)?;
        }

        self.updated_at = now;
        Ok(Revision::new(self, items_replaced))
    }

    fn apply_status(
        &mut self,
        target: Option<InvoiceStatus>,
        paid_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let previous = self.status;
        if let Some(target) = target {
            self.status = previous.transition(target)?;
        }

        match (previous, self.status) {
            (InvoiceStatus::Paid, InvoiceStatus::Paid) => {
                if let Some(paid_date) = paid_date {
                    self.paid_date = Some(paid_date);
                }
            }
            (_, InvoiceStatus::Paid) => {
                self.paid_date = Some(paid_date.unwrap_or(now));
            }
            (InvoiceStatus::Paid, _) => {
                self.paid_date = None;
            }
            _ if paid_date.is_some() => {
                return Err(AppError::validation(
                    "Paid date can only be set on a paid invoice",
                ));
            }
            _ => {}
        }

        Ok(())
    }

    fn recompute(&mut self, calculator: &TaxCalculator) -> Result<()> {
        let totals = calculator.compute_invoice_totals(
            &self.items,
            self.vat_rate,
            self.withholding_tax_rate,
        )?;
        self.subtotal = totals.subtotal;
        self.vat_amount = totals.vat_amount;
        self.withholding_tax = totals.withholding_tax;
        self.total = totals.total;
        Ok(())
    }
}

/// Header-only view used for counts, dashboards and customer details
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSummary {
    pub id: String,
    pub number: String,
    pub customer_id: String,
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub total: Decimal,
    pub paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&Invoice> for InvoiceSummary {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id.clone(),
            number: invoice.number.clone(),
            customer_id: invoice.customer_id.clone(),
            status: invoice.status,
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            total: invoice.total,
            paid_date: invoice.paid_date,
            created_at: invoice.created_at,
        }
    }
}

impl InvoiceSummary {
    pub fn display_status(&self, today: NaiveDate) -> InvoiceStatus {
        InvoiceStatus::display(self.status, self.due_date, today)
    }

    pub fn to_response(&self, today: NaiveDate) -> DocumentSummaryResponse {
        DocumentSummaryResponse {
            id: self.id.clone(),
            number: self.number.clone(),
            status: self.display_status(today).to_string(),
            issue_date: self.issue_date,
            total: display_amount(self.total),
        }
    }
}
