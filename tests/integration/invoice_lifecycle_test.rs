// Invoice lifecycle: withholding, payment, reversal, cancellation, overdue

#[path = "../helpers/mod.rs"]
mod helpers;

use chrono::{Duration, TimeZone, Utc};
use rust_decimal_macros::dec;

use helpers::*;
use thaibill::core::{AppError, BusinessCalendar, Owner};
use thaibill::modules::invoices::models::{CreateInvoiceRequest, InvoiceFilter, UpdateInvoiceRequest};
use thaibill::modules::invoices::InvoiceStatus;
use thaibill::AppState;

async fn create_invoice(state: &AppState, owner: &Owner) -> thaibill::modules::invoices::models::InvoiceResponse {
    let customer_id = seed_customer(state, owner, "Krabi Resort").await;
    state
        .invoices
        .create(
            owner,
            CreateInvoiceRequest {
                customer_id: Some(customer_id),
                items: Some(vec![TestDataFactory::item("Consulting", 1, dec!(2000))]),
                vat_rate: Some(dec!(7)),
                withholding_tax_rate: Some(dec!(3)),
                ..CreateInvoiceRequest::default()
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_withholding_scenario() {
    let ctx = test_context();
    let invoice = create_invoice(&ctx.state, &owner_a()).await;

    assert_eq!(invoice.subtotal, "2000.00");
    assert_eq!(invoice.vat_amount, "140.00");
    assert_eq!(invoice.withholding_tax, "60.00");
    assert_eq!(invoice.total, "2080.00");
    assert_eq!(invoice.status, InvoiceStatus::Unpaid);
    assert!(invoice.paid_date.is_none());
}

#[tokio::test]
async fn test_default_dates() {
    let ctx = test_context();
    let invoice = create_invoice(&ctx.state, &owner_a()).await;

    let today = BusinessCalendar::today(Utc::now());
    assert_eq!(invoice.issue_date, today);
    assert_eq!(invoice.due_date, today + Duration::days(30));
}

#[tokio::test]
async fn test_paying_sets_paid_date_and_get_reflects_it() {
    let ctx = test_context();
    let a = owner_a();
    let invoice = create_invoice(&ctx.state, &a).await;

    let before = Utc::now();
    let paid = ctx
        .state
        .invoices
        .change_status(&a, &invoice.id, InvoiceStatus::Paid, None)
        .await
        .unwrap();
    assert_eq!(paid.status, InvoiceStatus::Paid);
    assert!(paid.paid_date.unwrap() >= before);

    let reloaded = ctx.state.invoices.get(&a, &invoice.id).await.unwrap();
    assert_eq!(reloaded.status, InvoiceStatus::Paid);
    assert_eq!(reloaded.paid_date, paid.paid_date);
}

#[tokio::test]
async fn test_paid_date_can_be_corrected_and_reversed() {
    let ctx = test_context();
    let a = owner_a();
    let invoice = create_invoice(&ctx.state, &a).await;
    let first = Utc.with_ymd_and_hms(2025, 3, 1, 2, 0, 0).unwrap();
    let corrected = Utc.with_ymd_and_hms(2025, 3, 2, 2, 0, 0).unwrap();

    ctx.state
        .invoices
        .change_status(&a, &invoice.id, InvoiceStatus::Paid, Some(first))
        .await
        .unwrap();
    let paid = ctx
        .state
        .invoices
        .change_status(&a, &invoice.id, InvoiceStatus::Paid, Some(corrected))
        .await
        .unwrap();
    assert_eq!(paid.paid_date, Some(corrected));

    let reversed = ctx
        .state
        .invoices
        .change_status(&a, &invoice.id, InvoiceStatus::Unpaid, None)
        .await
        .unwrap();
    assert_eq!(reversed.status, InvoiceStatus::Unpaid);
    assert!(reversed.paid_date.is_none());
}

#[tokio::test]
async fn test_cancelled_is_terminal() {
    let ctx = test_context();
    let a = owner_a();
    let invoice = create_invoice(&ctx.state, &a).await;

    ctx.state
        .invoices
        .change_status(&a, &invoice.id, InvoiceStatus::Cancelled, None)
        .await
        .unwrap();

    for target in [InvoiceStatus::Unpaid, InvoiceStatus::Paid] {
        let err = ctx
            .state
            .invoices
            .change_status(&a, &invoice.id, target, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

#[tokio::test]
async fn test_paid_date_on_unpaid_invoice_rejected() {
    let ctx = test_context();
    let a = owner_a();
    let invoice = create_invoice(&ctx.state, &a).await;

    let result = ctx
        .state
        .invoices
        .update(
            &a,
            &invoice.id,
            UpdateInvoiceRequest {
                paid_date: Some(Utc::now()),
                ..UpdateInvoiceRequest::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_overdue_is_derived_on_read() {
    let ctx = test_context();
    let a = owner_a();
    let invoice = create_invoice(&ctx.state, &a).await;

    let yesterday = BusinessCalendar::today(Utc::now()) - Duration::days(1);
    ctx.store.edit_invoice(&invoice.id, |stored| {
        stored.issue_date = yesterday - Duration::days(30);
        stored.due_date = yesterday;
    });

    let reloaded = ctx.state.invoices.get(&a, &invoice.id).await.unwrap();
    assert_eq!(reloaded.status, InvoiceStatus::Overdue);
    assert_eq!(reloaded.stored_status, InvoiceStatus::Unpaid);

    let overdue = ctx
        .state
        .invoices
        .list(
            &a,
            &InvoiceFilter {
                status: Some(InvoiceStatus::Overdue),
                ..InvoiceFilter::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(overdue.len(), 1);

    // Paying an overdue invoice is allowed; it is stored as unpaid
    let paid = ctx
        .state
        .invoices
        .change_status(&a, &invoice.id, InvoiceStatus::Paid, None)
        .await
        .unwrap();
    assert_eq!(paid.status, InvoiceStatus::Paid);
}

#[tokio::test]
async fn test_rate_change_recomputes_with_stored_items() {
    let ctx = test_context();
    let a = owner_a();
    let invoice = create_invoice(&ctx.state, &a).await;

    let updated = ctx
        .state
        .invoices
        .update(
            &a,
            &invoice.id,
            UpdateInvoiceRequest {
                withholding_tax_rate: Some(dec!(5)),
                ..UpdateInvoiceRequest::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.vat_amount, "140.00");
    assert_eq!(updated.withholding_tax, "100.00");
    assert_eq!(updated.total, "2040.00");
}

#[tokio::test]
async fn test_invoice_without_customer_rejected() {
    let ctx = test_context();
    let err = ctx
        .state
        .invoices
        .create(
            &owner_a(),
            CreateInvoiceRequest {
                items: Some(vec![TestDataFactory::item("Consulting", 1, dec!(2000))]),
                ..CreateInvoiceRequest::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
