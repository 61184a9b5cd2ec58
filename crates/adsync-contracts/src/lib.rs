//! # adsync-contracts
//!
//! Shared types, schemas, and contracts for the ADSYNC classification engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod ad;
pub mod ad_type;
pub mod error;
pub mod field;
pub mod platform;
pub mod preview;
pub mod request;
pub mod validation;

#[cfg(test)]
mod tests {
    use super::*;
    use ad::FieldValue;
    use error::AdsyncError;
    use platform::Platform;
    use preview::{Breakdown, ErrorCode, SkippedAd};
    use request::PreviewRequest;
    use validation::{ValidationResult, ViolationKind};

    // ── FieldValue ───────────────────────────────────────────────────────────

    #[test]
    fn field_value_decodes_untagged_json() {
        let v: FieldValue = serde_json::from_str(r#""Summer {product}""#).unwrap();
        assert_eq!(v, FieldValue::Text("Summer {product}".to_string()));

        let v: FieldValue = serde_json::from_str("42").unwrap();
        assert_eq!(v, FieldValue::Number(42.0));

        let v: FieldValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(v.item_count(), 2);

        let v: FieldValue = serde_json::from_str("null").unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn field_value_emptiness() {
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(FieldValue::List(vec![]).is_empty());
        assert!(!FieldValue::Text("x".to_string()).is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
    }

    #[test]
    fn field_value_display_drops_integer_fraction() {
        assert_eq!(FieldValue::Number(19.0).to_string(), "19");
        assert_eq!(FieldValue::Number(19.5).to_string(), "19.5");
        assert_eq!(
            FieldValue::from(vec!["red", "blue"]).to_string(),
            "red, blue"
        );
    }

    // ── Platform ─────────────────────────────────────────────────────────────

    #[test]
    fn platform_parses_case_insensitively() {
        assert_eq!("Google".parse::<Platform>().unwrap(), Platform::Google);
        assert_eq!("facebook".parse::<Platform>().unwrap(), Platform::Meta);
        assert!(matches!(
            "myspace".parse::<Platform>(),
            Err(AdsyncError::ConfigError { .. })
        ));
    }

    // ── ErrorCode wire form ──────────────────────────────────────────────────

    #[test]
    fn error_code_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&ErrorCode::RequiredField).unwrap();
        assert_eq!(json, r#""REQUIRED_FIELD""#);
        let decoded: ErrorCode = serde_json::from_str(r#""MISSING_DEPENDENCY""#).unwrap();
        assert_eq!(decoded, ErrorCode::MissingDependency);
    }

    #[test]
    fn violation_kinds_map_to_reason_codes() {
        assert_eq!(ViolationKind::Required.error_code(), ErrorCode::RequiredField);
        assert_eq!(ViolationKind::TooLong.error_code(), ErrorCode::FieldTooLong);
        assert_eq!(ViolationKind::InvalidOption.error_code(), ErrorCode::InvalidEnumValue);
        assert_eq!(ViolationKind::AboveMaximum.error_code(), ErrorCode::ValueOutOfRange);
        assert_eq!(ViolationKind::UnknownVariable.error_code(), ErrorCode::MissingDependency);
        assert_eq!(ViolationKind::PatternMismatch.error_code(), ErrorCode::ConstraintViolation);
        assert_eq!(
            ViolationKind::VariablesNotSupported.error_code(),
            ErrorCode::ConstraintViolation
        );
    }

    // ── Skipped entry wire shape ─────────────────────────────────────────────

    #[test]
    fn skipped_ad_serializes_camel_case_and_omits_absent_optionals() {
        let entry = SkippedAd {
            ad_id: "ad-1".to_string(),
            ad_group_id: "ag-1".to_string(),
            campaign_id: "c-1".to_string(),
            name: "Shoes / ad-1".to_string(),
            product_name: None,
            reason: "Final URL is required".to_string(),
            error_code: ErrorCode::RequiredField,
            field: "final_url".to_string(),
            value: None,
            expected: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["adGroupId"], "ag-1");
        assert_eq!(json["errorCode"], "REQUIRED_FIELD");
        assert!(json.get("productName").is_none());
        assert!(json.get("value").is_none());
    }

    // ── ValidationResult ─────────────────────────────────────────────────────

    #[test]
    fn validation_result_merge_recomputes_valid() {
        let mut result = ValidationResult::ok();
        result.merge(ValidationResult::from_parts(vec![], vec!["advisory".to_string()]));
        assert!(result.valid);
        result.merge(ValidationResult::error("blocking"));
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["blocking".to_string()]);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn breakdown_total_sums_counters() {
        let b = Breakdown { valid: 8, fallback: 1, skipped: 1 };
        assert_eq!(b.total(), 10);
    }

    // ── PreviewRequest decoding ──────────────────────────────────────────────

    #[test]
    fn preview_request_decodes_from_json() {
        let json = r#"{
            "campaignSetId": "set-1",
            "hierarchy": { "campaigns": [ {
                "id": "c-1",
                "nameTemplate": "{brand} Summer",
                "adGroups": [ {
                    "id": "ag-1",
                    "nameTemplate": "{category}",
                    "ads": [ {
                        "id": "ad-1",
                        "fields": { "headline": "{title}", "final_url": "{url}" },
                        "fallbacks": { "headline": "truncate_word" }
                    } ]
                } ]
            } ] },
            "columns": [ { "name": "title" }, { "name": "url", "type": "url" } ],
            "sampleRows": [ { "title": "Trail Runner", "url": "https://shop.example/p/1" } ],
            "platforms": ["google", "tiktok"]
        }"#;

        let request = PreviewRequest::from_json_str(json).unwrap();
        assert_eq!(request.hierarchy.ad_count(), 1);
        assert_eq!(request.platforms, vec![Platform::Google, Platform::Tiktok]);
        assert_eq!(request.columns[1].column_type, request::ColumnType::Url);
    }

    #[test]
    fn preview_request_decode_error_is_reported() {
        match PreviewRequest::from_json_str("{ not json") {
            Err(AdsyncError::RequestDecode { reason }) => assert!(!reason.is_empty()),
            other => panic!("expected RequestDecode, got {:?}", other),
        }
    }

    // ── AdsyncError display messages ─────────────────────────────────────────

    #[test]
    fn error_unknown_ad_type_display() {
        let err = AdsyncError::UnknownAdType {
            platform: "google".to_string(),
            ad_type: "hologram".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("hologram"));
        assert!(msg.contains("google"));
    }

    #[test]
    fn error_config_error_display() {
        let err = AdsyncError::ConfigError {
            reason: "missing limits table".to_string(),
        };
        assert!(err.to_string().contains("configuration error"));
    }
}
