//! Input types accepted by the write side of the schema.
//!
//! Required fields are plain values, optional ones are `Option`. Deserializing
//! enforces presence; `validate()` additionally rejects blank required strings
//! and codes that fall outside their table.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{InitiativeStatus, TaskPriority, TaskStatus};
use crate::errors::CoreError;

fn require(input: &str, field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "{input}.{field} is required"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TaskInput {
    pub initiative: Option<i64>,
    pub capability: Option<i64>,
    pub title: String,
    pub short_description: Option<String>,
    pub description: String,
    pub status: Option<i64>,
    pub product_slug: String,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    pub expertise: Option<String>,
    pub depend_on: Option<Vec<i64>>,
    /// Username of the reviewing person.
    pub reviewer: String,
    pub video_url: Option<String>,
    /// Priority label (`High`, `Medium`, `Low`).
    pub priority: Option<String>,
    pub contribution_guide: Option<String>,
}

impl TaskInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("TaskInput", "title", &self.title)?;
        require("TaskInput", "description", &self.description)?;
        require("TaskInput", "product_slug", &self.product_slug)?;
        require("TaskInput", "reviewer", &self.reviewer)?;
        if let Some(status) = self.status {
            if TaskStatus::from_code(status).is_none() {
                return Err(CoreError::Validation(format!(
                    "TaskInput.status: unknown status code {status}"
                )));
            }
        }
        self.priority_code()?;
        Ok(())
    }

    /// Stored priority code. Missing priority defaults to `High`.
    pub fn priority_code(&self) -> Result<i64, CoreError> {
        match self.priority.as_deref() {
            None => Ok(TaskPriority::High.code()),
            Some(label) => TaskPriority::from_label(label)
                .map(TaskPriority::code)
                .ok_or_else(|| {
                    CoreError::Validation(format!("TaskInput.priority: unknown priority '{label}'"))
                }),
        }
    }

    /// Stored status code. Missing status defaults to `Draft`.
    #[must_use]
    pub fn status_code(&self) -> i64 {
        self.status.unwrap_or(TaskStatus::Draft.code())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InitiativeInput {
    /// Name of the initiative.
    pub name: String,
    pub product_slug: Option<String>,
    /// Description of the initiative.
    pub description: Option<String>,
    /// Status of the initiative.
    pub status: Option<i64>,
    pub video_url: Option<String>,
}

impl InitiativeInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("InitiativeInput", "name", &self.name)?;
        if let Some(status) = self.status {
            if InitiativeStatus::from_code(status).is_none() {
                return Err(CoreError::Validation(format!(
                    "InitiativeInput.status: unknown status code {status}"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn status_code(&self) -> i64 {
        self.status.unwrap_or(InitiativeStatus::Active.code())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProductInput {
    pub slug: Option<String>,
    pub name: String,
    pub short_description: String,
    pub full_description: Option<String>,
    pub website: String,
    pub video_url: Option<String>,
    pub is_private: Option<bool>,
}

impl ProductInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("ProductInput", "name", &self.name)?;
        require("ProductInput", "short_description", &self.short_description)?;
        require("ProductInput", "website", &self.website)?;
        if self.effective_slug().is_empty() {
            return Err(CoreError::Validation(
                "ProductInput.slug: cannot derive a slug from the name".into(),
            ));
        }
        Ok(())
    }

    /// The explicit slug, or one derived from the name.
    #[must_use]
    pub fn effective_slug(&self) -> String {
        match self.slug.as_deref() {
            Some(slug) if !slug.trim().is_empty() => slugify(slug),
            _ => slugify(&self.name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CapabilityInput {
    /// Parent capability. Without it the capability becomes the product's root.
    pub node_id: Option<i64>,
    pub product_slug: Option<String>,
    pub name: String,
    pub description: String,
    pub video_link: Option<String>,
    /// Ids of existing attachments to link.
    pub attachments: Option<Vec<i64>>,
}

impl CapabilityInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("CapabilityInput", "name", &self.name)?;
        require("CapabilityInput", "description", &self.description)?;
        if self.node_id.is_none() && self.product_slug.is_none() {
            return Err(CoreError::Validation(
                "CapabilityInput: either node_id or product_slug is required".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CodeRepositoryInput {
    pub product_slug: String,
    pub repository: Option<String>,
    pub access_token: String,
}

impl CodeRepositoryInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("CodeRepositoryInput", "product_slug", &self.product_slug)?;
        require("CodeRepositoryInput", "access_token", &self.access_token)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AttachmentInput {
    pub task_id: Option<i64>,
    pub capability_id: Option<i64>,
    pub name: Option<String>,
    pub path: String,
    pub file_type: Option<String>,
}

impl AttachmentInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("AttachmentInput", "path", &self.path)
    }
}

/// Lowercase ASCII slug: alphanumerics kept, every other run becomes one `-`.
#[must_use]
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for ch in value.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
