use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;

// ============ Inbound Models ============

/// Prospect record posted to `/api/create-prospect`.
///
/// Every field is optional; `null` is treated the same as a missing field.
/// Fields with the wrong JSON type are rejected instead of being coerced.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundProspect {
    pub company_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Job title of the contact.
    pub title: Option<String>,

    pub business_emails: Option<Vec<String>>,
    pub personal_emails: Option<Vec<String>>,
    pub mobile_phones: Option<Vec<String>>,
    pub company_phone: Option<String>,

    /// Street line of the company headquarters.
    pub company_address: Option<String>,
    pub company_city: Option<String>,
    pub company_state: Option<String>,
    pub company_zip: Option<String>,

    pub company_summary: Option<String>,
    pub relevance_description: Option<String>,

    /// Identifier of the prospect in the system that produced it.
    #[serde(alias = "uuid")]
    pub source_uuid: Option<String>,
    pub relevance_score: Option<f64>,
    pub completeness_score: Option<f64>,

    /// Anything else the producer sends; kept for logging, never mapped.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InboundProspect {
    /// Validates a raw request body.
    ///
    /// Non-object bodies get the generic 400; objects with mistyped fields get
    /// the same error plus the offending field path.
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        if !value.is_object() {
            return Err(AppError::invalid_payload());
        }

        serde_path_to_error::deserialize(value).map_err(|err| AppError::InvalidPayload {
            details: Some(format!("{}: {}", err.path(), err.inner())),
        })
    }
}

// ============ Outbound Models (NetSuite customer record) ============

/// Reference to another NetSuite record by internal id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRef {
    pub id: String,
}

impl RecordRef {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

/// Body of `POST /services/rest/record/v1/customer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub company_name: String,
    pub is_person: bool,
    pub entity_id: String,
    pub subsidiary: RecordRef,
    pub entity_status: RecordRef,
    pub email: String,
    pub alt_email: String,
    pub mobile_phone: String,
    pub phone: String,
    pub comments: String,
    pub addressbook: AddressBook,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressBook {
    pub items: Vec<AddressBookEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBookEntry {
    pub default_shipping: bool,
    pub default_billing: bool,
    pub label: String,
    pub addressbook_address: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub addressee: String,
    pub attention: String,
    pub addr1: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub addr_phone: String,
    pub country: RecordRef,
}

// ============ Response Models ============

/// Body returned to callers of `/api/create-prospect` on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProspectResponse {
    pub status: String,
    pub message: String,
}

impl CreateProspectResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
            message: "Record created successfully".to_string(),
        }
    }
}
