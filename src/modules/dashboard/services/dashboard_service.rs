use std::sync::Arc;

use chrono::Utc;

use crate::core::{Owner, Result};
use crate::modules::dashboard::models::{DashboardStats, DashboardStatsResponse};
use crate::modules::invoices::InvoiceRepository;
use crate::modules::quotations::QuotationRepository;

/// Aggregates the owner's documents into dashboard figures
pub struct DashboardService {
    quotations: Arc<dyn QuotationRepository>,
    invoices: Arc<dyn InvoiceRepository>,
}

impl DashboardService {
    pub fn new(
        quotations: Arc<dyn QuotationRepository>,
        invoices: Arc<dyn InvoiceRepository>,
    ) -> Self {
        Self {
            quotations,
            invoices,
        }
    }

    pub async fn stats(&self, owner: &Owner) -> Result<DashboardStatsResponse> {
        let quotations = self.quotations.summaries(owner, None).await?;
        let invoices = self.invoices.summaries(owner, None).await?;

        let stats = DashboardStats::compute(&quotations, &invoices, Utc::now());
        tracing::debug!(
            %owner,
            quotations = quotations.len(),
            invoices = invoices.len(),
            "Dashboard computed"
        );

        Ok(DashboardStatsResponse::from(&stats))
    }
}
