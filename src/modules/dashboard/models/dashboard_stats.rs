use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::display_amount;
use crate::core::BusinessCalendar;
use crate::modules::invoices::models::{InvoiceStatus, InvoiceSummary};
use crate::modules::quotations::models::QuotationSummary;

/// Headline figures of an owner's billing. Months are Bangkok calendar
/// months.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardStats {
    /// Sum of totals of paid invoices, all time
    pub total_revenue: Decimal,
    /// Sum of totals of invoices paid during the current month
    pub paid_this_month: Decimal,
    /// Stored-unpaid invoices, overdue ones included
    pub pending_invoices: u64,
    pub pending_amount: Decimal,
    pub overdue_invoices: u64,
    pub overdue_amount: Decimal,
    pub quotations_this_month: u64,
    pub invoices_this_month: u64,
}

impl DashboardStats {
    pub fn compute(
        quotations: &[QuotationSummary],
        invoices: &[InvoiceSummary],
        now: DateTime<Utc>,
    ) -> Self {
        let month_start = BusinessCalendar::start_of_month(now);
        let next_month = BusinessCalendar::start_of_next_month(now);
        let in_month = |at: DateTime<Utc>| at >= month_start && at < next_month;
        let today = BusinessCalendar::today(now);

        let mut stats = Self {
            quotations_this_month: quotations.iter().filter(|q| in_month(q.created_at)).count()
                as u64,
            invoices_this_month: invoices.iter().filter(|i| in_month(i.created_at)).count() as u64,
            ..Self::default()
        };

        for invoice in invoices {
            match invoice.status {
                InvoiceStatus::Paid => {
                    stats.total_revenue += invoice.total;
                    if invoice.paid_date.is_some_and(in_month) {
                        stats.paid_this_month += invoice.total;
                    }
                }
                InvoiceStatus::Unpaid => {
                    stats.pending_invoices += 1;
                    stats.pending_amount += invoice.total;
                    if invoice.display_status(today) == InvoiceStatus::Overdue {
                        stats.overdue_invoices += 1;
                        stats.overdue_amount += invoice.total;
                    }
                }
                _ => {}
            }
        }

        stats
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub total_revenue: String,
    pub paid_this_month: String,
    pub pending_invoices: u64,
    pub pending_amount: String,
    pub overdue_invoices: u64,
    pub overdue_amount: String,
    pub quotations_this_month: u64,
    pub invoices_this_month: u64,
}

impl From<&DashboardStats> for DashboardStatsResponse {
    fn from(stats: &DashboardStats) -> Self {
        Self {
            total_revenue: display_amount(stats.total_revenue),
            paid_this_month: display_amount(stats.paid_this_month),
            pending_invoices: stats.pending_invoices,
            pending_amount: display_amount(stats.pending_amount),
            overdue_invoices: stats.overdue_invoices,
            overdue_amount: display_amount(stats.overdue_amount),
            quotations_this_month: stats.quotations_this_month,
            invoices_this_month: stats.invoices_this_month,
        }
    }
}
