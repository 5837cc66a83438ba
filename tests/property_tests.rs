/// Property-based tests using proptest
/// Tests invariants of the prospect → customer mapping that should hold for all inputs
use proptest::prelude::*;
use rust_prospect_api::models::InboundProspect;
use rust_prospect_api::core::prospect::build_customer_payload;
use rust_prospect_api::signer::{with_realm, OAuthSigner, SigningParams};
use rust_prospect_api::config::Credentials;

fn optional_text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("\\PC{0,20}")
}

fn optional_list() -> impl Strategy<Value = Option<Vec<String>>> {
    proptest::option::of(proptest::collection::vec("\\PC{0,20}", 0..4))
}

prop_compose! {
    fn any_prospect()(
        company_name in optional_text(),
        first_name in optional_text(),
        last_name in optional_text(),
        business_emails in optional_list(),
        personal_emails in optional_list(),
        mobile_phones in optional_list(),
        company_phone in optional_text(),
        company_city in optional_text(),
        relevance_score in proptest::option::of(0.0f64..100.0),
    ) -> InboundProspect {
        InboundProspect {
            company_name,
            first_name,
            last_name,
            business_emails,
            personal_emails,
            mobile_phones,
            company_phone,
            company_city,
            relevance_score,
            ..Default::default()
        }
    }
}

// Property: mapping never leaks nulls into the outbound payload
proptest! {
    #[test]
    fn payload_has_no_nulls(prospect in any_prospect()) {
        let value = serde_json::to_value(build_customer_payload(&prospect)).unwrap();
        let rendered = value.to_string();
        prop_assert!(!contains_null(&value), "null in {}", rendered);
    }

    #[test]
    fn entity_id_is_concatenation(company in "\\PC{0,20}", last in "\\PC{0,20}") {
        let prospect = InboundProspect {
            company_name: Some(company.clone()),
            last_name: Some(last.clone()),
            ..Default::default()
        };
        let payload = build_customer_payload(&prospect);
        prop_assert_eq!(payload.entity_id, format!("{} - {}", company, last));
    }

    #[test]
    fn email_is_first_business_email(emails in proptest::collection::vec("[a-z]{1,8}@[a-z]{1,8}\\.com", 1..5)) {
        let prospect = InboundProspect {
            business_emails: Some(emails.clone()),
            ..Default::default()
        };
        let payload = build_customer_payload(&prospect);
        prop_assert_eq!(&payload.email, &emails[0]);
    }

    #[test]
    fn always_exactly_one_default_address(prospect in any_prospect()) {
        let payload = build_customer_payload(&prospect);
        prop_assert_eq!(payload.addressbook.items.len(), 1);
        prop_assert!(payload.addressbook.items[0].default_billing);
        prop_assert!(payload.addressbook.items[0].default_shipping);
    }
}

// Property: the realm is always the trailing attribute of the header
proptest! {
    #[test]
    fn realm_is_appended(account in "[0-9]{6,8}(_SB[0-9])?", nonce in "[a-z0-9]{8,32}", ts in 0i64..4_000_000_000) {
        let signer = OAuthSigner::new(&Credentials {
            account_id: account.clone(),
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
            token_id: "tk".to_string(),
            token_secret: "ts".to_string(),
        });
        let header = signer
            .sign_with(
                "POST",
                "https://example.com/services/rest/record/v1/customer",
                &SigningParams { nonce, timestamp: ts },
            )
            .unwrap();
        let full = with_realm(&header, &account);
        let expected_suffix = format!(", realm=\"{}\"", account);
        prop_assert!(full.ends_with(&expected_suffix));
    }
}

fn contains_null(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Array(items) => items.iter().any(contains_null),
        serde_json::Value::Object(map) => map.values().any(contains_null),
        _ => false,
    }
}
