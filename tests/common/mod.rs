#![allow(dead_code)]

use rust_prospect_api::config::{Config, Credentials};
use rust_prospect_api::models::InboundProspect;

pub const ACCOUNT_ID: &str = "1234567_SB1";
pub const CUSTOMER_PATH: &str = "/services/rest/record/v1/customer";

/// Helper function to create test config pointing at a mock NetSuite host
pub fn create_test_config(netsuite_base_url: String) -> Config {
    Config {
        port: 3000,
        credentials: Credentials {
            account_id: ACCOUNT_ID.to_string(),
            consumer_key: "test_consumer_key".to_string(),
            consumer_secret: "test_consumer_secret".to_string(),
            token_id: "test_token_id".to_string(),
            token_secret: "test_token_secret".to_string(),
        },
        netsuite_base_url,
        propagate_remote_failures: false,
    }
}

pub fn acme_json() -> serde_json::Value {
    serde_json::json!({
        "companyName": "Acme",
        "firstName": "Jane",
        "lastName": "Smith",
        "title": "CTO",
        "businessEmails": ["jane@acme.com", "j.smith@acme.com"],
        "personalEmails": ["jane@example.com"],
        "mobilePhones": ["+1 555 0100"],
        "companyPhone": "+1 555 0199",
        "companyAddress": "1 Main St",
        "companyCity": "Springfield",
        "companyState": "IL",
        "companyZip": "62701",
        "companySummary": "Makes anvils.",
        "relevanceDescription": "Buys in bulk.",
        "sourceUuid": "3f2c9a",
        "relevanceScore": 87,
        "completenessScore": 0.75
    })
}

pub fn acme() -> InboundProspect {
    InboundProspect::from_value(acme_json()).unwrap()
}
