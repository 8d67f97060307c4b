use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::{AppError, BusinessCalendar, Owner, Result};
use crate::modules::customers::services::{load_customers, require_customer};
use crate::modules::customers::CustomerRepository;
use crate::modules::documents::DocumentSettings;
use crate::modules::invoices::models::{
    CreateInvoiceRequest, Invoice, InvoiceDraft, InvoiceFilter, InvoicePatch, InvoiceResponse,
    InvoiceStatus, UpdateInvoiceRequest,
};
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::numbering::{DocumentKind, NumberingService};
use crate::modules::quotations::QuotationRepository;
use crate::modules::taxes::TaxCalculator;

/// Invoice lifecycle, always within the caller's owner scope
pub struct InvoiceService {
    invoices: Arc<dyn InvoiceRepository>,
    quotations: Arc<dyn QuotationRepository>,
    customers: Arc<dyn CustomerRepository>,
    numbering: Arc<NumberingService>,
    calculator: TaxCalculator,
    settings: DocumentSettings,
}

impl InvoiceService {
    pub fn new(
        invoices: Arc<dyn InvoiceRepository>,
        quotations: Arc<dyn QuotationRepository>,
        customers: Arc<dyn CustomerRepository>,
        numbering: Arc<NumberingService>,
        settings: DocumentSettings,
    ) -> Self {
        Self {
            invoices,
            quotations,
            customers,
            numbering,
            calculator: TaxCalculator::new(),
            settings,
        }
    }

    /// Create an invoice, directly or from an accepted quotation
    pub async fn create(
        &self,
        owner: &Owner,
        request: CreateInvoiceRequest,
    ) -> Result<InvoiceResponse> {
        let now = Utc::now();
        let today = BusinessCalendar::today(now);

        let quotation = match request.quotation_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Some(
                self.quotations
                    .find_by_id(owner, id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Quotation"))?,
            ),
            _ => None,
        };

        let draft = InvoiceDraft::from_request(
            request,
            quotation.as_ref(),
            &self.settings,
            &self.calculator,
            today,
        )?;
        let customer = require_customer(self.customers.as_ref(), owner, &draft.customer_id).await?;

        let number = self
            .numbering
            .next_number(DocumentKind::Invoice, owner, now)
            .await?;
        let invoice = Invoice::issue(owner.clone(), number, draft, &self.calculator, now)?;
        self.invoices.create(&invoice).await?;

        tracing::info!(
            %owner,
            invoice_id = %invoice.id,
            number = %invoice.number,
            quotation_id = ?invoice.quotation_id,
            total = %invoice.total,
            "Invoice created"
        );

        Ok(InvoiceResponse::new(&invoice, Some(&customer), today))
    }

    pub async fn get(&self, owner: &Owner, id: &str) -> Result<InvoiceResponse> {
        let invoice = self
            .invoices
            .find_by_id(owner, id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))?;

        self.respond(owner, &invoice).await
    }

    pub async fn list(&self, owner: &Owner, filter: &InvoiceFilter) -> Result<Vec<InvoiceResponse>> {
        let today = BusinessCalendar::today(Utc::now());
        let invoices = self.invoices.list(owner, filter, today).await?;

        let customer_ids: Vec<String> = invoices.iter().map(|i| i.customer_id.clone()).collect();
        let customers = load_customers(self.customers.as_ref(), owner, &customer_ids).await?;

        Ok(invoices
            .iter()
            .map(|i| InvoiceResponse::new(i, customers.get(&i.customer_id), today))
            .collect())
    }

    pub async fn update(
        &self,
        owner: &Owner,
        id: &str,
        request: UpdateInvoiceRequest,
    ) -> Result<InvoiceResponse> {
        let patch = InvoicePatch::from_request(request, &self.settings, &self.calculator)?;
        if let Some(customer_id) = &patch.customer_id {
            require_customer(self.customers.as_ref(), owner, customer_id).await?;
        }

        let invoice = self.modify(owner, id, patch).await?;
        tracing::info!(%owner, invoice_id = %id, "Invoice updated");

        self.respond(owner, &invoice).await
    }

    /// Status change; becoming paid records `paid_date` (default now),
    /// leaving paid clears it
    pub async fn change_status(
        &self,
        owner: &Owner,
        id: &str,
        status: InvoiceStatus,
        paid_date: Option<DateTime<Utc>>,
    ) -> Result<InvoiceResponse> {
        let invoice = self
            .modify(owner, id, InvoicePatch::status_only(status, paid_date))
            .await?;
        tracing::info!(
            %owner,
            invoice_id = %id,
            status = %invoice.status,
            paid_date = ?invoice.paid_date,
            "Invoice status changed"
        );

        self.respond(owner, &invoice).await
    }

    pub async fn delete(&self, owner: &Owner, id: &str) -> Result<()> {
        if !self.invoices.delete(owner, id).await? {
            return Err(AppError::not_found("Invoice"));
        }

        tracing::info!(%owner, invoice_id = %id, "Invoice deleted");
        Ok(())
    }

    async fn modify(&self, owner: &Owner, id: &str, patch: InvoicePatch) -> Result<Invoice> {
        let calculator = self.calculator;
        let now = Utc::now();

        self.invoices
            .modify(
                owner,
                id,
                Box::new(move |invoice: Invoice| invoice.apply(patch, &calculator, now)),
            )
            .await?
            .ok_or_else(|| AppError::not_found("Invoice"))
    }

    async fn respond(&self, owner: &Owner, invoice: &Invoice) -> Result<InvoiceResponse> {
        let customer = self.customers.find_by_id(owner, &invoice.customer_id).await?;
        Ok(InvoiceResponse::new(
            invoice,
            customer.as_ref(),
            BusinessCalendar::today(Utc::now()),
        ))
    }
}
