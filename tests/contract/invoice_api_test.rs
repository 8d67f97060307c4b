// Contract tests for /api/invoices

#[path = "../helpers/mod.rs"]
mod helpers;

use chrono::{Duration, Utc};
use serde_json::{json, Value};

use helpers::*;
use thaibill::core::BusinessCalendar;
use thaibill::middleware::API_KEY_HEADER;

async fn create_invoice(srv: &TestServer) -> Value {
    let mut res = srv
        .post("/api/customers")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&TestDataFactory::customer_json("Krabi Resort"))
        .await
        .unwrap();
    let customer: Value = res.json().await.unwrap();

    let mut res = srv
        .post("/api/invoices")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&TestDataFactory::invoice_json(customer["id"].as_str().unwrap()))
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    res.json().await.unwrap()
}

#[actix_web::test]
async fn test_create_invoice_response_shape() {
    let (srv, _store) = spawn_test_server();
    let body = create_invoice(&srv).await;

    assert!(body["number"].as_str().unwrap().starts_with("INV-"));
    assert_eq!(body["status"], "unpaid");
    assert_eq!(body["storedStatus"], "unpaid");
    assert_eq!(body["subtotal"], "2000.00");
    assert_eq!(body["vatAmount"], "140.00");
    assert_eq!(body["withholdingTaxRate"], "3");
    assert_eq!(body["withholdingTax"], "60.00");
    assert_eq!(body["total"], "2080.00");
    assert_eq!(body["paidDate"], Value::Null);
    assert_eq!(body["quotationId"], Value::Null);
    assert_eq!(body["customer"]["name"], "Krabi Resort");
}

#[actix_web::test]
async fn test_due_date_before_issue_date_is_400() {
    let (srv, _store) = spawn_test_server();

    let mut res = srv
        .post("/api/customers")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&TestDataFactory::customer_json("Dates"))
        .await
        .unwrap();
    let customer: Value = res.json().await.unwrap();

    let mut payload = TestDataFactory::invoice_json(customer["id"].as_str().unwrap());
    payload["issueDate"] = json!("2025-03-10");
    payload["dueDate"] = json!("2025-03-01");

    let res = srv
        .post("/api/invoices")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&payload)
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}

#[actix_web::test]
async fn test_pay_and_reverse_through_status_endpoint() {
    let (srv, _store) = spawn_test_server();
    let invoice = create_invoice(&srv).await;
    let path = format!("/api/invoices/{}/status", invoice["id"].as_str().unwrap());

    let mut res = srv
        .post(&path)
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&json!({ "status": "paid", "paidDate": "2025-03-15T03:00:00Z" }))
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let paid: Value = res.json().await.unwrap();
    assert_eq!(paid["status"], "paid");
    assert!(paid["paidDate"].as_str().unwrap().starts_with("2025-03-15T03:00:00"));

    let mut res = srv
        .post(&path)
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&json!({ "status": "unpaid" }))
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let reversed: Value = res.json().await.unwrap();
    assert_eq!(reversed["status"], "unpaid");
    assert_eq!(reversed["paidDate"], Value::Null);
}

#[actix_web::test]
async fn test_overdue_cannot_be_written() {
    let (srv, _store) = spawn_test_server();
    let invoice = create_invoice(&srv).await;

    let mut res = srv
        .post(format!("/api/invoices/{}/status", invoice["id"].as_str().unwrap()))
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&json!({ "status": "overdue" }))
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], 400);
}

#[actix_web::test]
async fn test_overdue_is_reported_and_filterable() {
    let (srv, store) = spawn_test_server();
    let invoice = create_invoice(&srv).await;
    let id = invoice["id"].as_str().unwrap().to_string();

    let yesterday = BusinessCalendar::today(Utc::now()) - Duration::days(1);
    store.edit_invoice(&id, |invoice| {
        invoice.issue_date = yesterday - Duration::days(30);
        invoice.due_date = yesterday;
    });

    let mut res = srv
        .get(format!("/api/invoices/{}", id))
        .insert_header((API_KEY_HEADER, KEY_A))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "overdue");
    assert_eq!(body["storedStatus"], "unpaid");

    let mut res = srv
        .get("/api/invoices?status=overdue")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send()
        .await
        .unwrap();
    let list: Value = res.json().await.unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    let mut res = srv
        .get("/api/invoices?status=unpaid")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send()
        .await
        .unwrap();
    let list: Value = res.json().await.unwrap();
    assert!(list.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_update_recomputes_with_stored_rates() {
    let (srv, _store) = spawn_test_server();
    let invoice = create_invoice(&srv).await;

    let mut res = srv
        .put(format!("/api/invoices/{}", invoice["id"].as_str().unwrap()))
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&json!({
            "items": [{ "description": "Consulting", "quantity": 2, "unitPrice": 2000 }]
        }))
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["subtotal"], "4000.00");
    assert_eq!(body["vatAmount"], "280.00");
    assert_eq!(body["withholdingTax"], "120.00");
    assert_eq!(body["total"], "4160.00");
    assert_eq!(body["number"], invoice["number"]);
}

#[actix_web::test]
async fn test_withholding_presets() {
    let (srv, _store) = spawn_test_server();

    let mut res = srv
        .get("/api/taxes/withholding-rates")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["rates"].as_array().unwrap().len(), 5);
}
