//! JSON Schemas for the input types and resolved nodes.
//!
//! The `SchemaRegistry` builds schemas from the Rust types at construction
//! time using [`schemars::schema_for!`] and validates JSON payloads against
//! them with `jsonschema`, e.g. an input document before it is deserialized.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    /// Build a registry holding every input and node schema.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Input types (6) ---
        register!(schemas, "task_input", stride_core::inputs::TaskInput);
        register!(schemas, "initiative_input", stride_core::inputs::InitiativeInput);
        register!(schemas, "product_input", stride_core::inputs::ProductInput);
        register!(schemas, "capability_input", stride_core::inputs::CapabilityInput);
        register!(
            schemas,
            "code_repository_input",
            stride_core::inputs::CodeRepositoryInput
        );
        register!(schemas, "attachment_input", stride_core::inputs::AttachmentInput);

        // --- Resolved nodes (7) ---
        register!(schemas, "task", crate::types::TaskNode);
        register!(schemas, "initiative", crate::types::InitiativeNode);
        register!(schemas, "product", crate::types::ProductNode);
        register!(schemas, "capability", crate::types::CapabilityNode);
        register!(schemas, "task_listing", crate::types::TaskListingNode);
        register!(schemas, "initiative_tasks", crate::types::InitiativeTaskType);
        register!(schemas, "capability_tasks", crate::types::CapabilityTaskType);

        Self { schemas }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// All registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::identity::Viewer;
    use stride_db::test_support::fixtures::{seed_task, test_service};

    use crate::context::ResolveContext;
    use crate::types::TaskType;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    #[test]
    fn registry_has_expected_count() {
        // 6 inputs + 7 nodes
        assert_eq!(registry().schema_count(), 13);
    }

    #[test]
    fn registry_list_is_sorted() {
        let names = registry().list();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn validate_valid_task_input() {
        let input = serde_json::json!({
            "title": "Fix login",
            "description": "Reject nothing valid",
            "product_slug": "acme",
            "reviewer": "ada",
            "tags": ["auth"],
        });
        registry().validate("task_input", &input).unwrap();
    }

    #[test]
    fn validate_rejects_missing_required_field() {
        let invalid = serde_json::json!({
            "description": "No title",
            "product_slug": "acme",
            "reviewer": "ada",
        });
        let result = registry().validate("task_input", &invalid);
        if let Err(SchemaError::ValidationFailed { errors }) = result {
            assert!(!errors.is_empty());
        } else {
            panic!("Expected ValidationFailed");
        }
    }

    #[test]
    fn validate_rejects_unknown_field() {
        let invalid = serde_json::json!({
            "product_slug": "acme",
            "access_token": "t",
            "branch": "main",
        });
        assert!(registry().validate("code_repository_input", &invalid).is_err());
    }

    #[test]
    fn validate_nonexistent_schema_returns_not_found() {
        let result = registry().validate("bogus", &serde_json::json!({}));
        assert!(matches!(result, Err(SchemaError::NotFound(_))));
    }

    #[tokio::test]
    async fn resolved_task_matches_its_schema() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Fix login").await;
        let ctx = ResolveContext::new(&svc, Viewer::anonymous());
        let node = TaskType::from(task).resolve(&ctx, None).await.unwrap();

        let json = serde_json::to_value(&node).unwrap();
        registry().validate("task", &json).unwrap();
    }
}
