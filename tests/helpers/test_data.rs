// Test Data Factory
//
// Request payloads with realistic Thai billing values. Typed builders feed
// the services; `json` builders feed the HTTP tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use thaibill::core::Owner;
use thaibill::modules::customers::models::CreateCustomerRequest;
use thaibill::modules::documents::LineItemInput;
use thaibill::modules::quotations::models::CreateQuotationRequest;
use thaibill::AppState;

pub struct TestDataFactory;

impl TestDataFactory {
    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn item(description: &str, quantity: i64, unit_price: Decimal) -> LineItemInput {
        LineItemInput {
            description: description.to_string(),
            quantity: Decimal::from(quantity),
            unit: None,
            unit_price,
            amount: None,
        }
    }

    pub fn customer_request(name: &str) -> CreateCustomerRequest {
        CreateCustomerRequest {
            name: name.to_string(),
            tax_id: Some("0105558000001".to_string()),
            address: Some("99 Sukhumvit Road, Bangkok".to_string()),
            phone: Some("021234567".to_string()),
            email: Some("billing@example.co.th".to_string()),
        }
    }

    /// 2 × 1,000 THB: subtotal 2,000, VAT 7% = 140, total 2,140
    pub fn quotation_request(customer_id: &str) -> CreateQuotationRequest {
        CreateQuotationRequest {
            customer_id: customer_id.to_string(),
            issue_date: None,
            valid_until: None,
            items: vec![Self::item("Website design", 2, Decimal::from(1000))],
            vat_rate: None,
            notes: None,
        }
    }

    pub fn customer_json(name: &str) -> Value {
        json!({
            "name": name,
            "taxId": "0105558000001",
            "email": "billing@example.co.th",
        })
    }

    pub fn quotation_json(customer_id: &str) -> Value {
        json!({
            "customerId": customer_id,
            "items": [
                { "description": "Website design", "quantity": 2, "unitPrice": 1000 }
            ],
        })
    }

    pub fn invoice_json(customer_id: &str) -> Value {
        json!({
            "customerId": customer_id,
            "items": [
                { "description": "Consulting", "quantity": 1, "unitPrice": 2000 }
            ],
            "vatRate": 7,
            "withholdingTaxRate": 3,
        })
    }
}

/// Create a customer through the service and return its id
pub async fn seed_customer(state: &AppState, owner: &Owner, name: &str) -> String {
    state
        .customers
        .create(owner, TestDataFactory::customer_request(name))
        .await
        .unwrap()
        .id
}
