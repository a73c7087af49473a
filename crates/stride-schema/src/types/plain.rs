//! Object types that project a record, or a JSON snapshot, field for field.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use stride_core::entities::{
    Attachment, CodeRepository, Expertise, Person, ProductTask, Tag, TaskCategory,
};

use crate::video::embed_video_link;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExpertiseType {
    pub id: i64,
    pub name: String,
    pub category_id: Option<i64>,
    pub selectable: bool,
}

impl From<Expertise> for ExpertiseType {
    fn from(e: Expertise) -> Self {
        Self {
            id: e.id,
            name: e.name,
            category_id: e.category_id,
            selectable: e.selectable,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskCategoryType {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub selectable: bool,
}

impl From<TaskCategory> for TaskCategoryType {
    fn from(c: TaskCategory) -> Self {
        Self {
            id: c.id,
            name: c.name,
            parent_id: c.parent_id,
            selectable: c.selectable,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TagType {
    pub id: i64,
    pub name: String,
}

impl From<Tag> for TagType {
    fn from(t: Tag) -> Self {
        Self {
            id: t.id,
            name: t.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttachmentType {
    pub id: i64,
    pub name: Option<String>,
    pub path: String,
    pub file_type: Option<String>,
}

impl From<Attachment> for AttachmentType {
    fn from(a: Attachment) -> Self {
        Self {
            id: a.id,
            name: a.name,
            path: a.path,
            file_type: a.file_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProductTaskType {
    pub id: i64,
    pub product_id: i64,
    pub task_id: i64,
}

impl From<ProductTask> for ProductTaskType {
    fn from(link: ProductTask) -> Self {
        Self {
            id: link.id,
            product_id: link.product_id,
            task_id: link.task_id,
        }
    }
}

/// A product's code repository. The access token has no field here.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CodeRepositoryType {
    pub id: i64,
    pub product_id: i64,
    pub repository: Option<String>,
}

impl From<CodeRepository> for CodeRepositoryType {
    fn from(repo: CodeRepository) -> Self {
        Self {
            id: repo.id,
            product_id: repo.product_id,
            repository: repo.repository,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PersonType {
    pub id: i64,
    pub username: String,
    pub first_name: Option<String>,
    pub slug: String,
}

impl From<Person> for PersonType {
    fn from(p: Person) -> Self {
        Self {
            id: p.id,
            username: p.username,
            first_name: p.first_name,
            slug: p.slug,
        }
    }
}

/// One step of a capability breadcrumb.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BreadcrumbType {
    pub id: i64,
    pub name: String,
}

/// Reviewer snapshot carried by a listing row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PersonJsonData {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}

/// Assignee snapshot carried by a listing row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssignedToPersonType {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}

/// Product snapshot carried by a listing row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProductDictType {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub detail_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Initiative snapshot carried by a listing row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InitiativeDictType {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

impl InitiativeDictType {
    /// Same snapshot with `video_url` turned into an embed link.
    #[must_use]
    pub fn with_embed_video(mut self) -> Self {
        self.video_url = embed_video_link(self.video_url.as_deref());
        self
    }
}

/// Read a JSON snapshot into its projection type.
///
/// A missing snapshot, or one that is not an object of the expected shape,
/// projects to `None`.
pub(crate) fn from_snapshot<T: serde::de::DeserializeOwned>(
    field: &'static str,
    value: Option<&serde_json::Value>,
) -> Option<T> {
    let value = value.filter(|v| !v.is_null())?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            tracing::warn!(field, %error, "ignoring malformed listing snapshot");
            None
        }
    }
}
