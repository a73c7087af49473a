use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Binds a task to the product it is published under.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProductTask {
    pub id: i64,
    pub product_id: i64,
    pub task_id: i64,
}

/// A person's right on a product. `right` is a `ProductRight` code.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProductPerson {
    pub id: i64,
    pub product_id: i64,
    pub person_id: i64,
    pub right: i64,
}
