//! `TaskType`: a task record plus its computed fields.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use stride_core::entities::{Person, Product, Task};
use stride_core::enums::{ClaimKind, ProductRight, TaskPriority, TaskStatus};
use stride_db::error::OptionalExt;

use crate::context::ResolveContext;
use crate::error::SchemaError;
use crate::link::task_link;
use crate::status::derive_task_status;
use crate::types::plain::{AttachmentType, ExpertiseType, PersonType, TagType};
use crate::video::embed_video_link;

/// Short reference to a related task. `status` is derived, as on `TaskType`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskSummary {
    pub id: i64,
    pub published_id: i64,
    pub title: String,
    pub status: i64,
}

/// Every field of a `TaskType`, resolved.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TaskNode {
    pub id: i64,
    pub published_id: i64,
    pub title: String,
    pub short_description: Option<String>,
    pub description: String,
    pub status: i64,
    pub status_label: Option<String>,
    pub priority: Option<String>,
    pub initiative_id: Option<i64>,
    pub capability_id: Option<i64>,
    pub product: Option<Product>,
    pub reviewer: Option<PersonType>,
    pub assigned_to: Option<PersonType>,
    pub in_review: bool,
    pub can_edit: bool,
    pub task_category: Option<String>,
    pub task_expertise: Option<Vec<ExpertiseType>>,
    pub tags: Vec<TagType>,
    pub attachments: Vec<AttachmentType>,
    pub depend_on: Vec<TaskSummary>,
    pub relatives: Vec<TaskSummary>,
    pub has_active_depends: bool,
    pub link: Option<String>,
    pub video_url: Option<String>,
    pub preview_video_url: Option<String>,
    pub contribution_guide: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TaskType {
    task: Task,
}

impl From<Task> for TaskType {
    fn from(task: Task) -> Self {
        Self { task }
    }
}

impl TaskType {
    /// Load by id. `None` when there is no such task.
    pub async fn load(ctx: &ResolveContext<'_>, id: i64) -> Result<Option<Self>, SchemaError> {
        Ok(ctx.store().get_task(id).await.optional()?.map(Self::from))
    }

    #[must_use]
    pub const fn record(&self) -> &Task {
        &self.task
    }

    #[must_use]
    pub const fn id(&self) -> i64 {
        self.task.id
    }

    /// The product the task is published under.
    pub async fn product(&self, ctx: &ResolveContext<'_>) -> Result<Option<Product>, SchemaError> {
        let store = ctx.store();
        let Some(link) = store.get_product_task(self.task.id).await.optional()? else {
            return Ok(None);
        };
        Ok(store.get_product(link.product_id).await.optional()?)
    }

    #[must_use]
    pub fn priority(&self) -> Option<&'static str> {
        TaskPriority::label_for(self.task.priority)
    }

    /// Whether the acting person may edit this task.
    ///
    /// The acting person is `user_id` when given, else the viewer. They need
    /// an editing right on the product the task is published under.
    pub async fn can_edit(
        &self,
        ctx: &ResolveContext<'_>,
        user_id: Option<i64>,
    ) -> Result<bool, SchemaError> {
        let Some(person_id) = ctx.viewer().acting_as(user_id) else {
            return Ok(false);
        };
        let store = ctx.store();
        let Some(link) = store.get_product_task(self.task.id).await.optional()? else {
            return Ok(false);
        };
        let allowed = store
            .has_product_right(link.product_id, person_id, &ProductRight::EDITORS)
            .await?;
        tracing::debug!(task_id = self.task.id, person_id, allowed, "resolved can_edit");
        Ok(allowed)
    }

    /// Person on the earliest `Done` or `Active` claim.
    pub async fn assigned_to(&self, ctx: &ResolveContext<'_>) -> Result<Option<Person>, SchemaError> {
        let store = ctx.store();
        let Some(claim) = store
            .first_claim_of_kinds(self.task.id, &ClaimKind::ASSIGNING)
            .await
            .optional()?
        else {
            return Ok(None);
        };
        Ok(store.get_person(claim.person_id).await.optional()?)
    }

    pub async fn in_review(&self, ctx: &ResolveContext<'_>) -> Result<bool, SchemaError> {
        let count = ctx
            .store()
            .count_claims_of_kind(self.task.id, ClaimKind::InReview)
            .await?;
        Ok(count > 0)
    }

    pub async fn task_category(&self, ctx: &ResolveContext<'_>) -> Result<Option<String>, SchemaError> {
        let Some(category_id) = self.task.category_id else {
            return Ok(None);
        };
        Ok(ctx
            .store()
            .get_category(category_id)
            .await
            .optional()?
            .map(|c| c.name))
    }

    /// The task's expertise, `None` when it has none.
    pub async fn task_expertise(
        &self,
        ctx: &ResolveContext<'_>,
    ) -> Result<Option<Vec<ExpertiseType>>, SchemaError> {
        let expertise = ctx.store().list_task_expertise(self.task.id).await?;
        if expertise.is_empty() {
            return Ok(None);
        }
        Ok(Some(expertise.into_iter().map(ExpertiseType::from).collect()))
    }

    /// Tasks this task depends on.
    pub async fn depend_on(&self, ctx: &ResolveContext<'_>) -> Result<Vec<Self>, SchemaError> {
        let tasks = ctx.store().list_task_dependencies(self.task.id).await?;
        Ok(tasks.into_iter().map(Self::from).collect())
    }

    /// Tasks that depend on this task.
    pub async fn relatives(&self, ctx: &ResolveContext<'_>) -> Result<Vec<Self>, SchemaError> {
        let tasks = ctx.store().list_task_dependents(self.task.id).await?;
        Ok(tasks.into_iter().map(Self::from).collect())
    }

    pub async fn has_active_depends(&self, ctx: &ResolveContext<'_>) -> Result<bool, SchemaError> {
        Ok(ctx.store().has_active_dependencies(self.task.id).await?)
    }

    pub async fn status(&self, ctx: &ResolveContext<'_>) -> Result<i64, SchemaError> {
        derive_task_status(ctx, &self.task).await
    }

    /// Short reference carrying the derived status.
    pub async fn summary(&self, ctx: &ResolveContext<'_>) -> Result<TaskSummary, SchemaError> {
        Ok(TaskSummary {
            id: self.task.id,
            published_id: self.task.published_id,
            title: self.task.title.clone(),
            status: self.status(ctx).await?,
        })
    }

    /// Task path without the front-end domain.
    pub async fn link(&self, ctx: &ResolveContext<'_>) -> Result<Option<String>, SchemaError> {
        task_link(ctx, &self.task, false).await
    }

    #[must_use]
    pub fn preview_video_url(&self) -> Option<String> {
        embed_video_link(self.task.video_url.as_deref())
    }

    /// Resolve every field. `user_id` is passed through to `can_edit`.
    pub async fn resolve(
        &self,
        ctx: &ResolveContext<'_>,
        user_id: Option<i64>,
    ) -> Result<TaskNode, SchemaError> {
        let store = ctx.store();
        let task = &self.task;

        let status = self.status(ctx).await?;
        let reviewer = match task.reviewer_id {
            Some(id) => store.get_person(id).await.optional()?.map(PersonType::from),
            None => None,
        };
        let tags = store
            .list_task_tags(task.id)
            .await?
            .into_iter()
            .map(TagType::from)
            .collect();
        let attachments = store
            .list_task_attachments(task.id)
            .await?
            .into_iter()
            .map(AttachmentType::from)
            .collect();
        let depend_on = summarize(ctx, &self.depend_on(ctx).await?).await?;
        let relatives = summarize(ctx, &self.relatives(ctx).await?).await?;

        Ok(TaskNode {
            id: task.id,
            published_id: task.published_id,
            title: task.title.clone(),
            short_description: task.short_description.clone(),
            description: task.description.clone(),
            status,
            status_label: TaskStatus::from_code(status).map(|s| s.as_str().to_string()),
            priority: self.priority().map(String::from),
            initiative_id: task.initiative_id,
            capability_id: task.capability_id,
            product: self.product(ctx).await?,
            reviewer,
            assigned_to: self.assigned_to(ctx).await?.map(PersonType::from),
            in_review: self.in_review(ctx).await?,
            can_edit: self.can_edit(ctx, user_id).await?,
            task_category: self.task_category(ctx).await?,
            task_expertise: self.task_expertise(ctx).await?,
            tags,
            attachments,
            depend_on,
            relatives,
            has_active_depends: self.has_active_depends(ctx).await?,
            link: self.link(ctx).await?,
            video_url: task.video_url.clone(),
            preview_video_url: self.preview_video_url(),
            contribution_guide: task.contribution_guide.clone(),
            created_at: task.created_at,
            updated_at: task.updated_at,
        })
    }
}

/// Summaries of `tasks`, in order.
pub(crate) async fn summarize(
    ctx: &ResolveContext<'_>,
    tasks: &[TaskType],
) -> Result<Vec<TaskSummary>, SchemaError> {
    let mut summaries = Vec::with_capacity(tasks.len());
    for task in tasks {
        summaries.push(task.summary(ctx).await?);
    }
    Ok(summaries)
}
