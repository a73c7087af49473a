use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A registered person: contributor, reviewer, or product member.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Person {
    pub id: i64,
    pub username: String,
    pub first_name: Option<String>,
    pub slug: String,
}
