use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A person's claim on a task. `kind` is a `ClaimKind` code.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskClaim {
    pub id: i64,
    pub task_id: i64,
    pub person_id: i64,
    pub kind: i64,
}

/// Dependency edge: `task_id` cannot finish before `depends_by_id` is done.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskDepend {
    pub id: i64,
    pub task_id: i64,
    pub depends_by_id: i64,
}
