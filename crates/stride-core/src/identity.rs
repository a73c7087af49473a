use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The person on whose behalf fields are resolved.
///
/// Produced by whatever authenticates the request; resolvers only read it.
/// `person_id == None` means an anonymous viewer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Viewer {
    pub person_id: Option<i64>,
}

impl Viewer {
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { person_id: None }
    }

    #[must_use]
    pub const fn person(person_id: i64) -> Self {
        Self {
            person_id: Some(person_id),
        }
    }

    /// The person a field acts for: an explicit `user_id` argument wins over
    /// the authenticated viewer.
    #[must_use]
    pub fn acting_as(&self, user_id: Option<i64>) -> Option<i64> {
        user_id.or(self.person_id)
    }
}
