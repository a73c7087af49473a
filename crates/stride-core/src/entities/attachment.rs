use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A file attached to a task or a capability.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Attachment {
    pub id: i64,
    pub name: Option<String>,
    pub path: String,
    pub file_type: Option<String>,
}
