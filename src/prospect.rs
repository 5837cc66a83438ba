//! Prospect → NetSuite customer mapping.
//!
//! Pure functions only: no I/O and no logging, so every rule here can be
//! checked without a server or a subscriber.

use crate::models::{
    Address, AddressBook, AddressBookEntry, CustomerPayload, InboundProspect, RecordRef,
};

/// Subsidiary every prospect is filed under.
pub const SUBSIDIARY_ID: &str = "17";
/// Customer status assigned to new prospects.
pub const ENTITY_STATUS_ID: &str = "8";
pub const COUNTRY_ID: &str = "US";
pub const ADDRESS_LABEL: &str = "Company HQ";

/// Builds the NetSuite customer body for a prospect.
///
/// Missing inbound fields become empty strings; nothing here can fail.
pub fn build_customer_payload(prospect: &InboundProspect) -> CustomerPayload {
    let company_name = text(&prospect.company_name);
    let last_name = text(&prospect.last_name);
    let company_phone = text(&prospect.company_phone);

    CustomerPayload {
        company_name: company_name.clone(),
        is_person: true,
        entity_id: format!("{} - {}", company_name, last_name),
        subsidiary: RecordRef::new(SUBSIDIARY_ID),
        entity_status: RecordRef::new(ENTITY_STATUS_ID),
        email: first(&prospect.business_emails),
        alt_email: first(&prospect.personal_emails),
        mobile_phone: first(&prospect.mobile_phones),
        phone: company_phone.clone(),
        comments: format_comments(prospect),
        addressbook: AddressBook {
            items: vec![AddressBookEntry {
                default_shipping: true,
                default_billing: true,
                label: ADDRESS_LABEL.to_string(),
                addressbook_address: Address {
                    addressee: company_name,
                    attention: format!("{} {}", text(&prospect.first_name), last_name),
                    addr1: text(&prospect.company_address),
                    city: text(&prospect.company_city),
                    state: text(&prospect.company_state),
                    zip: text(&prospect.company_zip),
                    addr_phone: company_phone,
                    country: RecordRef::new(COUNTRY_ID),
                },
            }],
        },
    }
}

/// Free-text notes stored on the customer record.
pub fn format_comments(prospect: &InboundProspect) -> String {
    format!(
        "Source UUID: {}\n\
         Relevance Score: {}\n\
         Completeness Score: {}\n\
         Company Summary: {}\n\
         Relevance Description: {}",
        text(&prospect.source_uuid),
        score(prospect.relevance_score),
        score(prospect.completeness_score),
        text(&prospect.company_summary),
        text(&prospect.relevance_description),
    )
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn first(values: &Option<Vec<String>>) -> String {
    values
        .as_ref()
        .and_then(|v| v.first())
        .cloned()
        .unwrap_or_default()
}

fn score(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
