use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A product initiative grouping tasks. `status` is an `InitiativeStatus` code.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Initiative {
    pub id: i64,
    pub product_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub status: i64,
    pub video_url: Option<String>,
}
