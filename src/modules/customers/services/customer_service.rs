use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::core::{AppError, BusinessCalendar, Owner, Result};
use crate::modules::customers::models::{
    CreateCustomerRequest, Customer, CustomerDetailResponse, CustomerResponse,
    UpdateCustomerRequest,
};
use crate::modules::customers::repositories::CustomerRepository;
use crate::modules::invoices::InvoiceRepository;
use crate::modules::quotations::QuotationRepository;

/// Documents listed in a customer's detail view, per kind
const RECENT_DOCUMENTS: usize = 5;

/// Customer of `owner`, or `NotFound` when absent or foreign
pub async fn require_customer(
    customers: &dyn CustomerRepository,
    owner: &Owner,
    id: &str,
) -> Result<Customer> {
    customers
        .find_by_id(owner, id)
        .await?
        .ok_or_else(|| AppError::not_found("Customer"))
}

/// Customers referenced by a page of documents, keyed by id
pub async fn load_customers(
    customers: &dyn CustomerRepository,
    owner: &Owner,
    ids: &[String],
) -> Result<HashMap<String, Customer>> {
    let mut unique: Vec<String> = ids.to_vec();
    unique.sort();
    unique.dedup();

    Ok(customers
        .find_many(owner, &unique)
        .await?
        .into_iter()
        .map(|customer| (customer.id.clone(), customer))
        .collect())
}

/// Customer registry of an owner
pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
    quotations: Arc<dyn QuotationRepository>,
    invoices: Arc<dyn InvoiceRepository>,
}

impl CustomerService {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        quotations: Arc<dyn QuotationRepository>,
        invoices: Arc<dyn InvoiceRepository>,
    ) -> Self {
        Self {
            customers,
            quotations,
            invoices,
        }
    }

    pub async fn create(
        &self,
        owner: &Owner,
        request: CreateCustomerRequest,
    ) -> Result<CustomerResponse> {
        let customer = Customer::new(owner.clone(), request, Utc::now())?;
        self.customers.create(&customer).await?;

        tracing::info!(%owner, customer_id = %customer.id, "Customer created");
        Ok(CustomerResponse::from(&customer).with_counts(0, 0))
    }

    /// All customers, newest first, with their document counts
    pub async fn list(&self, owner: &Owner) -> Result<Vec<CustomerResponse>> {
        let customers = self.customers.list(owner).await?;
        let quotation_counts = self.quotations.count_by_customer(owner).await?;
        let invoice_counts = self.invoices.count_by_customer(owner).await?;

        Ok(customers
            .iter()
            .map(|customer| {
                CustomerResponse::from(customer).with_counts(
                    quotation_counts.get(&customer.id).copied().unwrap_or(0),
                    invoice_counts.get(&customer.id).copied().unwrap_or(0),
                )
            })
            .collect())
    }

    /// One customer with their most recent quotations and invoices
    pub async fn get(&self, owner: &Owner, id: &str) -> Result<CustomerDetailResponse> {
        let customer = require_customer(self.customers.as_ref(), owner, id).await?;
        let quotations = self.quotations.summaries(owner, Some(id)).await?;
        let invoices = self.invoices.summaries(owner, Some(id)).await?;
        let today = BusinessCalendar::today(Utc::now());

        Ok(CustomerDetailResponse {
            customer: CustomerResponse::from(&customer)
                .with_counts(quotations.len() as u64, invoices.len() as u64),
            recent_quotations: quotations
                .iter()
                .take(RECENT_DOCUMENTS)
                .map(|q| q.to_response())
                .collect(),
            recent_invoices: invoices
                .iter()
                .take(RECENT_DOCUMENTS)
                .map(|i| i.to_response(today))
                .collect(),
        })
    }

    pub async fn update(
        &self,
        owner: &Owner,
        id: &str,
        request: UpdateCustomerRequest,
    ) -> Result<CustomerResponse> {
        let now = Utc::now();
        let customer = self
            .customers
            .modify(
                owner,
                id,
                Box::new(move |customer: Customer| customer.apply(request, now)),
            )
            .await?
            .ok_or_else(|| AppError::not_found("Customer"))?;

        tracing::info!(%owner, customer_id = %id, "Customer updated");
        Ok(CustomerResponse::from(&customer))
    }

    /// Unconditional: documents keep their `customer_id` and render the
    /// customer as `null` afterwards
    pub async fn delete(&self, owner: &Owner, id: &str) -> Result<()> {
        if !self.customers.delete(owner, id).await? {
            return Err(AppError::not_found("Customer"));
        }

        tracing::info!(%owner, customer_id = %id, "Customer deleted");
        Ok(())
    }
}
