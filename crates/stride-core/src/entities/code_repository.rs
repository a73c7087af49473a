use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A source repository connected to a product.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CodeRepository {
    pub id: i64,
    pub product_id: i64,
    pub repository: Option<String>,
    /// Never serialized; the object type does not expose it either.
    #[serde(skip_serializing, default)]
    pub access_token: String,
}
