use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Denormalised read row used by task listings.
///
/// The `*_data` columns hold JSON snapshots of the related records taken when
/// the listing row was written; they are projected as-is.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TaskListing {
    pub id: i64,
    pub task_id: i64,
    pub title: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub status: i64,
    pub priority: i64,
    pub in_review: bool,
    pub tags: Vec<String>,
    pub initiative_data: Option<serde_json::Value>,
    pub product_data: Option<serde_json::Value>,
    pub assigned_to_data: Option<serde_json::Value>,
    pub reviewer_data: Option<serde_json::Value>,
    pub video_url: Option<String>,
}
