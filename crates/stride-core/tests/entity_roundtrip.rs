//! Serde roundtrip and JsonSchema validation tests for record and input types.

use chrono::Utc;
use schemars::schema_for;
use stride_core::entities::*;
use stride_core::inputs::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    task_roundtrip,
    Task,
    Task {
        id: 12,
        published_id: 3,
        initiative_id: Some(4),
        capability_id: None,
        category_id: Some(1),
        title: "Add CSV export".into(),
        short_description: Some("Export listings".into()),
        description: "Users need to export task listings as CSV.".into(),
        status: 2,
        priority: 1,
        reviewer_id: Some(5),
        video_url: None,
        contribution_guide: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    product_roundtrip,
    Product,
    Product {
        id: 1,
        name: "Acme".into(),
        slug: "acme".into(),
        short_description: "Widgets".into(),
        full_description: None,
        website: "https://acme.example".into(),
        video_url: Some("https://youtu.be/dQw4w9WgXcQ".into()),
        is_private: false,
        owner_id: Some(2),
        capability_start_id: Some(10),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    capability_roundtrip,
    Capability,
    Capability {
        id: 10,
        parent_id: None,
        name: "Root".into(),
        description: None,
        video_link: None,
    }
);

roundtrip_and_validate!(
    initiative_roundtrip,
    Initiative,
    Initiative {
        id: 4,
        product_id: Some(1),
        name: "Onboarding".into(),
        description: Some("First-run experience".into()),
        status: 1,
        video_url: None,
    }
);

roundtrip_and_validate!(
    listing_roundtrip,
    TaskListing,
    TaskListing {
        id: 1,
        task_id: 12,
        title: "Add CSV export".into(),
        short_description: None,
        description: None,
        status: 2,
        priority: 0,
        in_review: false,
        tags: vec!["export".into(), "csv".into()],
        initiative_data: Some(serde_json::json!({"id": 4, "name": "Onboarding"})),
        product_data: None,
        assigned_to_data: None,
        reviewer_data: Some(serde_json::json!({"username": "ada", "first_name": "Ada"})),
        video_url: None,
    }
);

roundtrip_and_validate!(
    claim_roundtrip,
    TaskClaim,
    TaskClaim {
        id: 1,
        task_id: 12,
        person_id: 5,
        kind: 1,
    }
);

roundtrip_and_validate!(
    attachment_input_roundtrip,
    AttachmentInput,
    AttachmentInput {
        task_id: Some(12),
        capability_id: None,
        name: Some("mockup".into()),
        path: "/uploads/mockup.png".into(),
        file_type: Some("image/png".into()),
    }
);

#[test]
fn code_repository_token_is_not_serialized() {
    let repo = CodeRepository {
        id: 1,
        product_id: 1,
        repository: Some("https://github.com/acme/app".into()),
        access_token: "secret-token".into(),
    };
    let json = serde_json::to_string(&repo).unwrap();
    assert!(!json.contains("secret-token"));
    assert!(!json.contains("access_token"));
}
