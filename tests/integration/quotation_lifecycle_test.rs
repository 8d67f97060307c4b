// Quotation lifecycle: creation, edits, status transitions and invoicing

#[path = "../helpers/mod.rs"]
mod helpers;

use chrono::Utc;
use rust_decimal_macros::dec;

use helpers::*;
use thaibill::core::{AppError, BusinessCalendar};
use thaibill::modules::invoices::models::CreateInvoiceRequest;
use thaibill::modules::quotations::models::UpdateQuotationRequest;
use thaibill::modules::quotations::QuotationStatus;

#[tokio::test]
async fn test_create_quotation_totals_and_number() {
    let ctx = test_context();
    let a = owner_a();
    let customer_id = seed_customer(&ctx.state, &a, "ACME Co").await;

    let mut request = TestDataFactory::quotation_request(&customer_id);
    request.items[0].amount = Some(dec!(2000));
    request.vat_rate = Some(dec!(7));
    let quotation = ctx.state.quotations.create(&a, request).await.unwrap();

    let year = BusinessCalendar::year(Utc::now());
    assert_eq!(quotation.number, format!("QT-{}-0001", year));
    assert_eq!(quotation.status, QuotationStatus::Draft);
    assert_eq!(quotation.subtotal, "2000.00");
    assert_eq!(quotation.vat_amount, "140.00");
    assert_eq!(quotation.total, "2140.00");
}

#[tokio::test]
async fn test_get_is_idempotent() {
    let ctx = test_context();
    let a = owner_a();
    let customer_id = seed_customer(&ctx.state, &a, "ACME Co").await;
    let created = ctx
        .state
        .quotations
        .create(&a, TestDataFactory::quotation_request(&customer_id))
        .await
        .unwrap();

    let first = serde_json::to_value(ctx.state.quotations.get(&a, &created.id).await.unwrap()).unwrap();
    let second = serde_json::to_value(ctx.state.quotations.get(&a, &created.id).await.unwrap()).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_vat_only_update_recomputes_totals() {
    let ctx = test_context();
    let a = owner_a();
    let customer_id = seed_customer(&ctx.state, &a, "ACME Co").await;
    let created = ctx
        .state
        .quotations
        .create(&a, TestDataFactory::quotation_request(&customer_id))
        .await
        .unwrap();

    let updated = ctx
        .state
        .quotations
        .update(
            &a,
            &created.id,
            UpdateQuotationRequest {
                vat_rate: Some(dec!(0)),
                ..UpdateQuotationRequest::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.vat_amount, "0.00");
    assert_eq!(updated.total, "2000.00");
    assert_eq!(updated.items[0].id, created.items[0].id);
    assert_eq!(updated.number, created.number);
}

#[tokio::test]
async fn test_status_transitions() {
    let ctx = test_context();
    let a = owner_a();
    let customer_id = seed_customer(&ctx.state, &a, "ACME Co").await;
    let q = ctx
        .state
        .quotations
        .create(&a, TestDataFactory::quotation_request(&customer_id))
        .await
        .unwrap();

    let sent = ctx.state.quotations.change_status(&a, &q.id, QuotationStatus::Sent).await.unwrap();
    assert_eq!(sent.status, QuotationStatus::Sent);

    // sent -> draft is not a valid move
    let err = ctx
        .state
        .quotations
        .change_status(&a, &q.id, QuotationStatus::Draft)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let rejected = ctx
        .state
        .quotations
        .change_status(&a, &q.id, QuotationStatus::Rejected)
        .await
        .unwrap();
    assert_eq!(rejected.status, QuotationStatus::Rejected);

    // Terminal
    assert!(ctx
        .state
        .quotations
        .change_status(&a, &q.id, QuotationStatus::Accepted)
        .await
        .is_err());

    // Same state is a no-op
    let again = ctx
        .state
        .quotations
        .change_status(&a, &q.id, QuotationStatus::Rejected)
        .await
        .unwrap();
    assert_eq!(again.status, QuotationStatus::Rejected);
}

#[tokio::test]
async fn test_invoice_from_accepted_quotation_inherits_content() {
    let ctx = test_context();
    let a = owner_a();
    let customer_id = seed_customer(&ctx.state, &a, "ACME Co").await;
    let q = ctx
        .state
        .quotations
        .create(&a, TestDataFactory::quotation_request(&customer_id))
        .await
        .unwrap();
    ctx.state
        .quotations
        .change_status(&a, &q.id, QuotationStatus::Accepted)
        .await
        .unwrap();

    let invoice = ctx
        .state
        .invoices
        .create(
            &a,
            CreateInvoiceRequest {
                quotation_id: Some(q.id.clone()),
                ..CreateInvoiceRequest::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(invoice.quotation_id.as_deref(), Some(q.id.as_str()));
    assert_eq!(invoice.customer_id, customer_id);
    assert_eq!(invoice.vat_rate, q.vat_rate);
    assert_eq!(invoice.items.len(), q.items.len());
    assert_eq!(invoice.items[0].description, q.items[0].description);
    assert_eq!(invoice.items[0].amount, q.items[0].amount);
    assert_eq!(invoice.subtotal, q.subtotal);
    assert_eq!(invoice.notes, Some(format!("Ref. quotation {}", q.number)));
}

#[tokio::test]
async fn test_customer_mismatch_rejected() {
    let ctx = test_context();
    let a = owner_a();
    let customer_id = seed_customer(&ctx.state, &a, "ACME Co").await;
    let other_customer = seed_customer(&ctx.state, &a, "Other Co").await;
    let q = ctx
        .state
        .quotations
        .create(&a, TestDataFactory::quotation_request(&customer_id))
        .await
        .unwrap();
    ctx.state
        .quotations
        .change_status(&a, &q.id, QuotationStatus::Accepted)
        .await
        .unwrap();

    let err = ctx
        .state
        .invoices
        .create(
            &a,
            CreateInvoiceRequest {
                quotation_id: Some(q.id.clone()),
                customer_id: Some(other_customer),
                ..CreateInvoiceRequest::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(ctx.store.invoice_count(), 0);
}

#[tokio::test]
async fn test_deleted_customer_leaves_quotation_with_null_customer() {
    let ctx = test_context();
    let a = owner_a();
    let customer_id = seed_customer(&ctx.state, &a, "Gone Co").await;
    let q = ctx
        .state
        .quotations
        .create(&a, TestDataFactory::quotation_request(&customer_id))
        .await
        .unwrap();

    ctx.state.customers.delete(&a, &customer_id).await.unwrap();

    let reloaded = ctx.state.quotations.get(&a, &q.id).await.unwrap();
    assert_eq!(reloaded.customer_id, customer_id);
    assert!(reloaded.customer.is_none());
}

#[tokio::test]
async fn test_failed_update_leaves_quotation_untouched() {
    let ctx = test_context();
    let a = owner_a();
    let customer_id = seed_customer(&ctx.state, &a, "ACME Co").await;
    let q = ctx
        .state
        .quotations
        .create(&a, TestDataFactory::quotation_request(&customer_id))
        .await
        .unwrap();

    let result = ctx
        .state
        .quotations
        .update(
            &a,
            &q.id,
            UpdateQuotationRequest {
                vat_rate: Some(dec!(0)),
                valid_until: Some(TestDataFactory::date(2000, 1, 1)),
                ..UpdateQuotationRequest::default()
            },
        )
        .await;
    assert!(result.is_err());

    let reloaded = ctx.state.quotations.get(&a, &q.id).await.unwrap();
    assert_eq!(reloaded.total, "2140.00");
    assert_eq!(reloaded.valid_until, q.valid_until);
}

#[tokio::test]
async fn test_unstorable_total_rejected_without_using_a_number() {
    let ctx = test_context();
    let a = owner_a();
    let customer_id = seed_customer(&ctx.state, &a, "ACME Co").await;

    // 11 × 9,999,989,000,001 overflows the 14 integer digits of a total
    let mut request = TestDataFactory::quotation_request(&customer_id);
    request.items = vec![TestDataFactory::item("Plant", 999_999, dec!(9999999)); 11];
    let err = ctx.state.quotations.create(&a, request).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "{:?}", err);
    assert_eq!(ctx.store.quotation_count(), 0);

    let q = ctx
        .state
        .quotations
        .create(&a, TestDataFactory::quotation_request(&customer_id))
        .await
        .unwrap();
    assert!(q.number.ends_with("-0001"), "{}", q.number);

    let err = ctx
        .state
        .quotations
        .update(
            &a,
            &q.id,
            UpdateQuotationRequest {
                items: Some(vec![
                    TestDataFactory::item("Plant", 999_999, dec!(9999999));
                    11
                ]),
                ..UpdateQuotationRequest::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "{:?}", err);
    assert_eq!(ctx.state.quotations.get(&a, &q.id).await.unwrap().total, "2140.00");
}
