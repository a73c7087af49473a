use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A node in a product's capability tree.
///
/// Roots have no `parent_id`; a product points at its root through
/// `Product::capability_start_id`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Capability {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub video_link: Option<String>,
}

impl Capability {
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
