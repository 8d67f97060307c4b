// MySQL storage bindings
//
// Needs a MySQL database: TEST_DATABASE_URL=mysql://... cargo test -- --ignored

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use chrono::Utc;
use futures_util::future::join_all;
use rust_decimal_macros::dec;

use helpers::*;
use thaibill::config::BillingConfig;
use thaibill::core::{Identity, Owner};
use thaibill::modules::customers::models::UpdateCustomerRequest;
use thaibill::middleware::{hash_api_key, IdentityResolver, MySqlApiKeyResolver};
use thaibill::modules::invoices::models::{CreateInvoiceRequest, InvoiceFilter};
use thaibill::modules::invoices::InvoiceStatus;
use thaibill::modules::numbering::{DocumentKind, MySqlSequenceRepository, NumberingService};
use thaibill::modules::quotations::models::QuotationFilter;
use thaibill::modules::quotations::QuotationStatus;
use thaibill::{AppState, Repositories};

async fn mysql_state() -> (AppState, sqlx::MySqlPool, Owner) {
    let pool = create_test_pool().await;
    let state = AppState::new(Repositories::mysql(pool.clone()), &BillingConfig::default());
    let owner = Owner::Tenant(Identity::new(unique_owner_id()).unwrap());
    (state, pool, owner)
}

#[tokio::test]
#[ignore]
async fn test_quotation_to_invoice_round_trip() {
    let (state, _pool, owner) = mysql_state().await;
    let customer_id = seed_customer(&state, &owner, "Chiang Mai Crafts").await;

    let quotation = state
        .quotations
        .create(&owner, TestDataFactory::quotation_request(&customer_id))
        .await
        .unwrap();
    assert_eq!(quotation.total, "2140.00");

    let reloaded = state.quotations.get(&owner, &quotation.id).await.unwrap();
    assert_eq!(reloaded.items.len(), 1);
    assert_eq!(reloaded.items[0].amount, "2000.00");
    assert_eq!(reloaded.customer.unwrap().name, "Chiang Mai Crafts");

    state
        .quotations
        .change_status(&owner, &quotation.id, QuotationStatus::Accepted)
        .await
        .unwrap();
    let accepted = state
        .quotations
        .list(
            &owner,
            &QuotationFilter {
                status: Some(QuotationStatus::Accepted),
                ..QuotationFilter::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(accepted.len(), 1);

    let invoice = state
        .invoices
        .create(
            &owner,
            CreateInvoiceRequest {
                quotation_id: Some(quotation.id.clone()),
                withholding_tax_rate: Some(dec!(3)),
                ..CreateInvoiceRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(invoice.quotation_id.as_deref(), Some(quotation.id.as_str()));
    assert_eq!(invoice.total, "2080.00");

    let paid = state
        .invoices
        .change_status(&owner, &invoice.id, InvoiceStatus::Paid, None)
        .await
        .unwrap();
    assert!(paid.paid_date.is_some());

    let detail = state.customers.get(&owner, &customer_id).await.unwrap();
    assert_eq!(detail.recent_quotations.len(), 1);
    assert_eq!(detail.recent_invoices.len(), 1);

    let stats = state.dashboard.stats(&owner).await.unwrap();
    assert_eq!(stats.total_revenue, "2080.00");

    state.invoices.delete(&owner, &invoice.id).await.unwrap();
    state.quotations.delete(&owner, &quotation.id).await.unwrap();
    state.customers.delete(&owner, &customer_id).await.unwrap();

    let remaining = state
        .invoices
        .list(&owner, &InvoiceFilter::default())
        .await
        .unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_item_replacement_is_atomic() {
    let (state, _pool, owner) = mysql_state().await;
    let customer_id = seed_customer(&state, &owner, "Hat Yai Supply").await;
    let invoice = state
        .invoices
        .create(
            &owner,
            CreateInvoiceRequest {
                customer_id: Some(customer_id),
                items: Some(vec![
                    TestDataFactory::item("Setup", 1, dec!(500)),
                    TestDataFactory::item("Support", 2, dec!(250)),
                ]),
                ..CreateInvoiceRequest::default()
            },
        )
        .await
        .unwrap();

    let updated = state
        .invoices
        .update(
            &owner,
            &invoice.id,
            thaibill::modules::invoices::models::UpdateInvoiceRequest {
                items: Some(vec![TestDataFactory::item("Retainer", 1, dec!(3000))]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.items.len(), 1);
    assert_eq!(updated.subtotal, "3000.00");
    let reloaded = state.invoices.get(&owner, &invoice.id).await.unwrap();
    assert_eq!(reloaded.items.len(), 1);
    assert_eq!(reloaded.items[0].description, "Retainer");
}

#[tokio::test]
#[ignore]
async fn test_concurrent_sequence_reservations() {
    let pool = create_test_pool().await;
    let numbering = Arc::new(NumberingService::new(Arc::new(MySqlSequenceRepository::new(
        pool,
    ))));
    let owner = Owner::Tenant(Identity::new(unique_owner_id()).unwrap());
    let now = Utc::now();

    let tasks = (0..10).map(|_| {
        let numbering = numbering.clone();
        let owner = owner.clone();
        tokio::spawn(async move {
            numbering
                .next_number(DocumentKind::Invoice, &owner, now)
                .await
        })
    });

    let mut numbers: Vec<String> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();
    numbers.sort();
    numbers.dedup();

    assert_eq!(numbers.len(), 10);
    assert!(numbers[0].ends_with("-0001"));
    assert!(numbers[9].ends_with("-0010"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn test_concurrent_customer_edits_are_serialised() {
    let (state, _pool, owner) = mysql_state().await;
    let id = seed_customer(&state, &owner, "Chiang Mai Crafts").await;

    let tasks = (0..10).map(|n| {
        let service = state.customers.clone();
        let owner = owner.clone();
        let id = id.clone();
        let request = if n % 2 == 0 {
            UpdateCustomerRequest {
                phone: Some("053111222".to_string()),
                ..UpdateCustomerRequest::default()
            }
        } else {
            UpdateCustomerRequest {
                address: Some("12 Nimman Road, Chiang Mai".to_string()),
                ..UpdateCustomerRequest::default()
            }
        };
        tokio::spawn(async move { service.update(&owner, &id, request).await })
    });
    for joined in join_all(tasks).await {
        joined.unwrap().unwrap();
    }

    let detail = state.customers.get(&owner, &id).await.unwrap();
    assert_eq!(detail.customer.phone.as_deref(), Some("053111222"));
    assert_eq!(
        detail.customer.address.as_deref(),
        Some("12 Nimman Road, Chiang Mai")
    );
}

#[tokio::test]
#[ignore]
async fn test_api_key_resolution() {
    let pool = create_test_pool().await;
    let owner_id = unique_owner_id();
    let api_key = format!("key-{}", uuid::Uuid::new_v4());

    sqlx::query("INSERT INTO api_keys (id, owner_id, key_hash, label) VALUES (?, ?, ?, ?)")
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(&owner_id)
        .bind(hash_api_key(&api_key))
        .bind("integration test")
        .execute(&pool)
        .await
        .unwrap();

    let resolver = MySqlApiKeyResolver::new(pool.clone());
    let identity = resolver.resolve(&api_key).await.unwrap().unwrap();
    assert_eq!(identity.as_str(), owner_id);
    assert!(resolver.resolve("not-a-key").await.unwrap().is_none());

    sqlx::query("UPDATE api_keys SET is_active = FALSE WHERE owner_id = ?")
        .bind(&owner_id)
        .execute(&pool)
        .await
        .unwrap();
    assert!(resolver.resolve(&api_key).await.unwrap().is_none());
}
