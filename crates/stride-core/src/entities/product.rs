use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A product that owns initiatives, a capability tree, and tasks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub full_description: Option<String>,
    pub website: String,
    pub video_url: Option<String>,
    pub is_private: bool,
    pub owner_id: Option<i64>,
    /// Root of the product's capability tree.
    pub capability_start_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
