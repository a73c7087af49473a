use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A unit of work, optionally grouped under an initiative and a capability.
///
/// `status` is a `TaskStatus` code and `priority` a `TaskPriority` code.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    /// Per-product sequence number used in public links.
    pub published_id: i64,
    pub initiative_id: Option<i64>,
    pub capability_id: Option<i64>,
    pub category_id: Option<i64>,
    pub title: String,
    pub short_description: Option<String>,
    pub description: String,
    pub status: i64,
    pub priority: i64,
    pub reviewer_id: Option<i64>,
    pub video_url: Option<String>,
    pub contribution_guide: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
