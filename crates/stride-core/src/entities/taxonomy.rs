use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Category a task belongs to. Categories nest through `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskCategory {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub selectable: bool,
}

/// A skill required by a task, filed under a category.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Expertise {
    pub id: i64,
    pub name: String,
    pub category_id: Option<i64>,
    pub selectable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}
