use std::sync::Arc;

use chrono::Utc;

use crate::core::{AppError, BusinessCalendar, Owner, Result};
use crate::modules::customers::services::{load_customers, require_customer};
use crate::modules::customers::CustomerRepository;
use crate::modules::documents::DocumentSettings;
use crate::modules::numbering::{DocumentKind, NumberingService};
use crate::modules::quotations::models::{
    CreateQuotationRequest, Quotation, QuotationDraft, QuotationFilter, QuotationPatch,
    QuotationResponse, QuotationStatus, UpdateQuotationRequest,
};
use crate::modules::quotations::repositories::QuotationRepository;
use crate::modules::taxes::TaxCalculator;

/// Quotation lifecycle: creation, edits, status changes and removal,
/// always within the caller's owner scope.
pub struct QuotationService {
    quotations: Arc<dyn QuotationRepository>,
    customers: Arc<dyn CustomerRepository>,
    numbering: Arc<NumberingService>,
    calculator: TaxCalculator,
    settings: DocumentSettings,
}

impl QuotationService {
    pub fn new(
        quotations: Arc<dyn QuotationRepository>,
        customers: Arc<dyn CustomerRepository>,
        numbering: Arc<NumberingService>,
        settings: DocumentSettings,
    ) -> Self {
        Self {
            quotations,
            customers,
            numbering,
            calculator: TaxCalculator::new(),
            settings,
        }
    }

    pub async fn create(
        &self,
        owner: &Owner,
        request: CreateQuotationRequest,
    ) -> Result<QuotationResponse> {
        let now = Utc::now();
        let draft = QuotationDraft::from_request(
            request,
            &self.settings,
            &self.calculator,
            BusinessCalendar::today(now),
        )?;
        let customer = require_customer(self.customers.as_ref(), owner, &draft.customer_id).await?;

        let number = self
            .numbering
            .next_number(DocumentKind::Quotation, owner, now)
            .await?;
        let quotation = Quotation::issue(owner.clone(), number, draft, &self.calculator, now)?;
        self.quotations.create(&quotation).await?;

        tracing::info!(
            %owner,
            quotation_id = %quotation.id,
            number = %quotation.number,
            total = %quotation.total,
            "Quotation created"
        );

        Ok(QuotationResponse::new(&quotation, Some(&customer)))
    }

    pub async fn get(&self, owner: &Owner, id: &str) -> Result<QuotationResponse> {
        let quotation = self
            .quotations
            .find_by_id(owner, id)
            .await?
            .ok_or_else(|| AppError::not_found("Quotation"))?;

        self.respond(owner, &quotation).await
    }

    pub async fn list(
        &self,
        owner: &Owner,
        filter: &QuotationFilter,
    ) -> Result<Vec<QuotationResponse>> {
        let quotations = self.quotations.list(owner, filter).await?;

        let customer_ids: Vec<String> = quotations.iter().map(|q| q.customer_id.clone()).collect();
        let customers = load_customers(self.customers.as_ref(), owner, &customer_ids).await?;

        Ok(quotations
            .iter()
            .map(|q| QuotationResponse::new(q, customers.get(&q.customer_id)))
            .collect())
    }

    pub async fn update(
        &self,
        owner: &Owner,
        id: &str,
        request: UpdateQuotationRequest,
    ) -> Result<QuotationResponse> {
        let patch = QuotationPatch::from_request(request, &self.settings, &self.calculator)?;
        if let Some(customer_id) = &patch.customer_id {
            require_customer(self.customers.as_ref(), owner, customer_id).await?;
        }

        let quotation = self.modify(owner, id, patch).await?;
        tracing::info!(%owner, quotation_id = %id, "Quotation updated");

        self.respond(owner, &quotation).await
    }

    pub async fn change_status(
        &self,
        owner: &Owner,
        id: &str,
        status: QuotationStatus,
    ) -> Result<QuotationResponse> {
        let quotation = self
            .modify(owner, id, QuotationPatch::status_only(status))
            .await?;
        tracing::info!(%owner, quotation_id = %id, status = %quotation.status, "Quotation status changed");

        self.respond(owner, &quotation).await
    }

    pub async fn delete(&self, owner: &Owner, id: &str) -> Result<()> {
        if !self.quotations.delete(owner, id).await? {
            return Err(AppError::not_found("Quotation"));
        }

        tracing::info!(%owner, quotation_id = %id, "Quotation deleted");
        Ok(())
    }

    async fn modify(&self, owner: &Owner, id: &str, patch: QuotationPatch) -> Result<Quotation> {
        let calculator = self.calculator;
        let now = Utc::now();

        self.quotations
            .modify(
                owner,
                id,
                Box::new(move |quotation: Quotation| quotation.apply(patch, &calculator, now)),
            )
            .await?
            .ok_or_else(|| AppError::not_found("Quotation"))
    }

    async fn respond(&self, owner: &Owner, quotation: &Quotation) -> Result<QuotationResponse> {
        let customer = self
            .customers
            .find_by_id(owner, &quotation.customer_id)
            .await?;
        Ok(QuotationResponse::new(quotation, customer.as_ref()))
    }
}
