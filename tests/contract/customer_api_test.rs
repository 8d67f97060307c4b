// Contract tests for /api/customers
//
// Real HTTP against the production routes, backed by in-memory storage.
// Checks status codes, camelCase field names and the error envelope.

#[path = "../helpers/mod.rs"]
mod helpers;

use serde_json::{json, Value};

use helpers::*;
use thaibill::middleware::API_KEY_HEADER;

#[actix_web::test]
async fn test_create_customer_returns_201_with_camel_case_body() {
    let (srv, _store) = spawn_test_server();

    let mut res = srv
        .post("/api/customers")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&TestDataFactory::customer_json("Siam Trading Co., Ltd."))
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    let body: Value = res.json().await.unwrap();
    assert!(body["id"].is_string());
    assert_eq!(body["name"], "Siam Trading Co., Ltd.");
    assert_eq!(body["taxId"], "0105558000001");
    assert!(body["createdAt"].is_string());
    assert!(body.get("owner").is_none());
    assert!(body.get("ownerId").is_none());
}

#[actix_web::test]
async fn test_missing_name_is_400_with_error_envelope() {
    let (srv, _store) = spawn_test_server();

    let mut res = srv
        .post("/api/customers")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&json!({ "email": "a@example.com" }))
        .await
        .unwrap();
    assert_eq!(res.status(), 400);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], 400);
    assert!(body["error"]["message"].as_str().unwrap().contains("name"));
}

#[actix_web::test]
async fn test_invalid_email_rejected() {
    let (srv, _store) = spawn_test_server();

    let res = srv
        .post("/api/customers")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&json!({ "name": "Somchai", "email": "not-an-email" }))
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}

#[actix_web::test]
async fn test_list_carries_document_counts() {
    let (srv, _store) = spawn_test_server();

    let mut created = srv
        .post("/api/customers")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&TestDataFactory::customer_json("Chiang Mai Crafts"))
        .await
        .unwrap();
    let customer: Value = created.json().await.unwrap();
    let customer_id = customer["id"].as_str().unwrap();

    let res = srv
        .post("/api/quotations")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&TestDataFactory::quotation_json(customer_id))
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    let mut res = srv
        .get("/api/customers")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let list: Value = res.json().await.unwrap();
    assert_eq!(list[0]["quotationCount"], 1);
    assert_eq!(list[0]["invoiceCount"], 0);
}

#[actix_web::test]
async fn test_detail_includes_recent_documents() {
    let (srv, _store) = spawn_test_server();

    let mut created = srv
        .post("/api/customers")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&TestDataFactory::customer_json("Phuket Dive"))
        .await
        .unwrap();
    let customer: Value = created.json().await.unwrap();
    let customer_id = customer["id"].as_str().unwrap();

    srv.post("/api/invoices")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&TestDataFactory::invoice_json(customer_id))
        .await
        .unwrap();

    let mut res = srv
        .get(format!("/api/customers/{}", customer_id))
        .insert_header((API_KEY_HEADER, KEY_A))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let detail: Value = res.json().await.unwrap();
    assert_eq!(detail["name"], "Phuket Dive");
    assert_eq!(detail["recentQuotations"], json!([]));
    assert_eq!(detail["recentInvoices"][0]["number"].as_str().unwrap().len(), 13);
    assert_eq!(detail["recentInvoices"][0]["total"], "2080.00");
}

#[actix_web::test]
async fn test_update_and_delete() {
    let (srv, _store) = spawn_test_server();

    let mut created = srv
        .post("/api/customers")
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&TestDataFactory::customer_json("Old Name"))
        .await
        .unwrap();
    let customer: Value = created.json().await.unwrap();
    let path = format!("/api/customers/{}", customer["id"].as_str().unwrap());

    let mut res = srv
        .put(&path)
        .insert_header((API_KEY_HEADER, KEY_A))
        .send_json(&json!({ "name": "New Name", "email": "" }))
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["name"], "New Name");
    assert_eq!(updated["email"], Value::Null);
    assert_eq!(updated["taxId"], "0105558000001");

    let mut res = srv
        .delete(&path)
        .insert_header((API_KEY_HEADER, KEY_A))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Customer deleted");

    let res = srv
        .get(&path)
        .insert_header((API_KEY_HEADER, KEY_A))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[actix_web::test]
async fn test_requests_without_key_are_401() {
    let (srv, _store) = spawn_test_server();

    let mut res = srv.get("/api/customers").send().await.unwrap();
    assert_eq!(res.status(), 401);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"]["code"], 401);
}

#[actix_web::test]
async fn test_malformed_json_is_400() {
    let (srv, _store) = spawn_test_server();

    let res = srv
        .post("/api/customers")
        .insert_header((API_KEY_HEADER, KEY_A))
        .insert_header(("content-type", "application/json"))
        .send_body("{\"name\": ")
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}

#[actix_web::test]
async fn test_probes_need_no_identity() {
    let (srv, _store) = spawn_test_server();

    let res = srv.get("/health").send().await.unwrap();
    assert_eq!(res.status(), 200);

    let res = srv.get("/ready").send().await.unwrap();
    assert_eq!(res.status(), 200);
}
