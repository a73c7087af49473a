//! `InitiativeType`: an initiative and its task counts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use stride_core::entities::Initiative;
use stride_core::enums::TaskStatus;
use stride_db::error::OptionalExt;

use crate::context::ResolveContext;
use crate::error::SchemaError;
use crate::types::plain::TagType;
use crate::video::embed_video_link;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InitiativeNode {
    pub id: i64,
    pub product_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    /// Stored status code rendered as a string.
    pub status: String,
    pub video_url: Option<String>,
    pub preview_video_url: Option<String>,
    pub available_task_count: i64,
    pub completed_task_count: i64,
    pub task_tags: Vec<TagType>,
}

#[derive(Debug, Clone)]
pub struct InitiativeType {
    initiative: Initiative,
}

impl From<Initiative> for InitiativeType {
    fn from(initiative: Initiative) -> Self {
        Self { initiative }
    }
}

impl InitiativeType {
    pub async fn load(ctx: &ResolveContext<'_>, id: i64) -> Result<Option<Self>, SchemaError> {
        Ok(ctx.store().get_initiative(id).await.optional()?.map(Self::from))
    }

    #[must_use]
    pub const fn record(&self) -> &Initiative {
        &self.initiative
    }

    pub async fn available_task_count(&self, ctx: &ResolveContext<'_>) -> Result<i64, SchemaError> {
        Ok(ctx
            .store()
            .count_initiative_tasks(self.initiative.id, TaskStatus::Available)
            .await?)
    }

    pub async fn completed_task_count(&self, ctx: &ResolveContext<'_>) -> Result<i64, SchemaError> {
        Ok(ctx
            .store()
            .count_initiative_tasks(self.initiative.id, TaskStatus::Done)
            .await?)
    }

    /// Distinct tags over the initiative's tasks, by name.
    pub async fn task_tags(&self, ctx: &ResolveContext<'_>) -> Result<Vec<TagType>, SchemaError> {
        let tags = ctx.store().list_initiative_tags(self.initiative.id).await?;
        Ok(tags.into_iter().map(TagType::from).collect())
    }

    #[must_use]
    pub fn preview_video_url(&self) -> Option<String> {
        embed_video_link(self.initiative.video_url.as_deref())
    }

    #[must_use]
    pub fn status(&self) -> String {
        self.initiative.status.to_string()
    }

    pub async fn resolve(&self, ctx: &ResolveContext<'_>) -> Result<InitiativeNode, SchemaError> {
        let i = &self.initiative;
        Ok(InitiativeNode {
            id: i.id,
            product_id: i.product_id,
            name: i.name.clone(),
            description: i.description.clone(),
            status: self.status(),
            video_url: i.video_url.clone(),
            preview_video_url: self.preview_video_url(),
            available_task_count: self.available_task_count(ctx).await?,
            completed_task_count: self.completed_task_count(ctx).await?,
            task_tags: self.task_tags(ctx).await?,
        })
    }
}
