//! Application wiring: repositories, then services, then routes

use std::sync::Arc;

use actix_web::web;
use sqlx::MySqlPool;

use crate::config::BillingConfig;
use crate::core::AccessPolicy;
use crate::middleware::{error_handler, ApiKeyAuth, IdentityResolver, MySqlApiKeyResolver};
use crate::modules::business::{
    self, BusinessProfileRepository, BusinessService, MySqlBusinessProfileRepository,
};
use crate::modules::customers::{
    self, CustomerRepository, CustomerService, MySqlCustomerRepository,
};
use crate::modules::dashboard::{self, DashboardService};
use crate::modules::health::{self, MySqlStorageProbe, StorageProbe};
use crate::modules::invoices::{self, InvoiceRepository, InvoiceService, MySqlInvoiceRepository};
use crate::modules::numbering::{MySqlSequenceRepository, NumberingService, SequenceRepository};
use crate::modules::quotations::{
    self, MySqlQuotationRepository, QuotationRepository, QuotationService,
};
use crate::modules::taxes;

/// Storage bindings of every service
#[derive(Clone)]
pub struct Repositories {
    pub customers: Arc<dyn CustomerRepository>,
    pub quotations: Arc<dyn QuotationRepository>,
    pub invoices: Arc<dyn InvoiceRepository>,
    pub sequences: Arc<dyn SequenceRepository>,
    pub business_profiles: Arc<dyn BusinessProfileRepository>,
    pub identities: Arc<dyn IdentityResolver>,
    pub probe: Arc<dyn StorageProbe>,
}

impl Repositories {
    pub fn mysql(pool: MySqlPool) -> Self {
        Self {
            customers: Arc::new(MySqlCustomerRepository::new(pool.clone())),
            quotations: Arc::new(MySqlQuotationRepository::new(pool.clone())),
            invoices: Arc::new(MySqlInvoiceRepository::new(pool.clone())),
            sequences: Arc::new(MySqlSequenceRepository::new(pool.clone())),
            business_profiles: Arc::new(MySqlBusinessProfileRepository::new(pool.clone())),
            identities: Arc::new(MySqlApiKeyResolver::new(pool.clone())),
            probe: Arc::new(MySqlStorageProbe::new(pool)),
        }
    }
}

/// Services shared by all workers
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<CustomerService>,
    pub quotations: Arc<QuotationService>,
    pub invoices: Arc<InvoiceService>,
    pub business: Arc<BusinessService>,
    pub dashboard: Arc<DashboardService>,
    pub access_policy: AccessPolicy,
    identities: Arc<dyn IdentityResolver>,
    probe: Arc<dyn StorageProbe>,
}

impl AppState {
    pub fn new(repos: Repositories, billing: &BillingConfig) -> Self {
        let settings = billing.document_settings();
        let numbering = Arc::new(NumberingService::new(repos.sequences.clone()));

        Self {
            customers: Arc::new(CustomerService::new(
                repos.customers.clone(),
                repos.quotations.clone(),
                repos.invoices.clone(),
            )),
            quotations: Arc::new(QuotationService::new(
                repos.quotations.clone(),
                repos.customers.clone(),
                numbering.clone(),
                settings.clone(),
            )),
            invoices: Arc::new(InvoiceService::new(
                repos.invoices.clone(),
                repos.quotations.clone(),
                repos.customers.clone(),
                numbering,
                settings,
            )),
            business: Arc::new(BusinessService::new(repos.business_profiles.clone())),
            dashboard: Arc::new(DashboardService::new(repos.quotations, repos.invoices)),
            access_policy: billing.access_policy,
            identities: repos.identities,
            probe: repos.probe,
        }
    }

    /// Register shared data, probes and the `/api` scope
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.customers.clone()))
            .app_data(web::Data::new(self.quotations.clone()))
            .app_data(web::Data::new(self.invoices.clone()))
            .app_data(web::Data::new(self.business.clone()))
            .app_data(web::Data::new(self.dashboard.clone()))
            .app_data(web::Data::new(self.probe.clone()))
            .app_data(web::Data::new(self.access_policy))
            .configure(error_handler::configure)
            .configure(health::controllers::configure)
            .service(
                web::scope("/api")
                    .wrap(ApiKeyAuth::new(self.identities.clone()))
                    .configure(customers::controllers::configure)
                    .configure(quotations::controllers::configure)
                    .configure(invoices::controllers::configure)
                    .configure(business::controllers::configure)
                    .configure(dashboard::controllers::configure)
                    .configure(taxes::controllers::configure),
            );
    }
}
