//! Listing views: `TaskListingType` over denormalised listing rows, and the
//! initiative and capability task lists built from them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use stride_core::entities::TaskListing;
use stride_core::enums::TaskPriority;
use stride_db::error::OptionalExt;

use crate::context::ResolveContext;
use crate::error::SchemaError;
use crate::types::capability::{CapabilityNode, CapabilityType};
use crate::types::initiative::{InitiativeNode, InitiativeType};
use crate::types::plain::{
    AssignedToPersonType, InitiativeDictType, PersonJsonData, ProductDictType, from_snapshot,
};
use crate::video::embed_video_link;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskListingNode {
    pub id: i64,
    pub task_id: i64,
    pub title: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub in_review: bool,
    pub status: i64,
    pub initiative: Option<InitiativeDictType>,
    pub product: Option<ProductDictType>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub expertise: Option<String>,
    pub assigned_to_person: Option<AssignedToPersonType>,
    pub reviewer: Option<PersonJsonData>,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TaskListingType {
    listing: TaskListing,
}

impl From<TaskListing> for TaskListingType {
    fn from(listing: TaskListing) -> Self {
        Self { listing }
    }
}

impl TaskListingType {
    #[must_use]
    pub const fn record(&self) -> &TaskListing {
        &self.listing
    }

    #[must_use]
    pub fn priority(&self) -> Option<&'static str> {
        TaskPriority::label_for(self.listing.priority)
    }

    #[must_use]
    pub fn initiative(&self) -> Option<InitiativeDictType> {
        from_snapshot::<InitiativeDictType>("initiative_data", self.listing.initiative_data.as_ref())
            .map(InitiativeDictType::with_embed_video)
    }

    #[must_use]
    pub fn product(&self) -> Option<ProductDictType> {
        from_snapshot("product_data", self.listing.product_data.as_ref())
    }

    #[must_use]
    pub fn assigned_to_person(&self) -> Option<AssignedToPersonType> {
        from_snapshot("assigned_to_data", self.listing.assigned_to_data.as_ref())
    }

    #[must_use]
    pub fn reviewer(&self) -> Option<PersonJsonData> {
        from_snapshot("reviewer_data", self.listing.reviewer_data.as_ref())
    }

    #[must_use]
    pub fn video_url(&self) -> Option<String> {
        embed_video_link(self.listing.video_url.as_deref())
    }

    /// Category name of the underlying task.
    pub async fn category(&self, ctx: &ResolveContext<'_>) -> Result<Option<String>, SchemaError> {
        let store = ctx.store();
        let Some(task) = store.get_task(self.listing.task_id).await.optional()? else {
            return Ok(None);
        };
        let Some(category_id) = task.category_id else {
            return Ok(None);
        };
        Ok(store.get_category(category_id).await.optional()?.map(|c| c.name))
    }

    /// Expertise names of the underlying task joined with `", "`.
    ///
    /// Only reported for tasks that have a category; uncategorised tasks get
    /// `None` whatever their expertise. A categorised task with no expertise
    /// is `None` too.
    pub async fn expertise(&self, ctx: &ResolveContext<'_>) -> Result<Option<String>, SchemaError> {
        let store = ctx.store();
        let Some(task) = store.get_task(self.listing.task_id).await.optional()? else {
            return Ok(None);
        };
        if task.category_id.is_none() {
            return Ok(None);
        }
        let names: Vec<String> = store
            .list_task_expertise(task.id)
            .await?
            .into_iter()
            .map(|e| e.name)
            .collect();
        if names.is_empty() {
            return Ok(None);
        }
        Ok(Some(names.join(", ")))
    }

    pub async fn resolve(&self, ctx: &ResolveContext<'_>) -> Result<TaskListingNode, SchemaError> {
        let l = &self.listing;
        Ok(TaskListingNode {
            id: l.id,
            task_id: l.task_id,
            title: l.title.clone(),
            short_description: l.short_description.clone(),
            description: l.description.clone(),
            priority: self.priority().map(String::from),
            in_review: l.in_review,
            status: l.status,
            initiative: self.initiative(),
            product: self.product(),
            tags: l.tags.clone(),
            category: self.category(ctx).await?,
            expertise: self.expertise(ctx).await?,
            assigned_to_person: self.assigned_to_person(),
            reviewer: self.reviewer(),
            video_url: self.video_url(),
        })
    }
}

async fn resolve_listings(
    ctx: &ResolveContext<'_>,
    listings: Vec<TaskListing>,
) -> Result<Vec<TaskListingNode>, SchemaError> {
    let mut nodes = Vec::with_capacity(listings.len());
    for listing in listings {
        nodes.push(TaskListingType::from(listing).resolve(ctx).await?);
    }
    Ok(nodes)
}

/// An initiative with the listing rows of its tasks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InitiativeTaskType {
    pub initiative: InitiativeNode,
    pub tasks: Vec<TaskListingNode>,
}

impl InitiativeTaskType {
    /// `None` when there is no such initiative.
    pub async fn load(ctx: &ResolveContext<'_>, initiative_id: i64) -> Result<Option<Self>, SchemaError> {
        let Some(initiative) = InitiativeType::load(ctx, initiative_id).await? else {
            return Ok(None);
        };
        let listings = ctx.store().list_initiative_listings(initiative_id).await?;
        Ok(Some(Self {
            initiative: initiative.resolve(ctx).await?,
            tasks: resolve_listings(ctx, listings).await?,
        }))
    }
}

/// A capability with the listing rows of its tasks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CapabilityTaskType {
    pub capability: CapabilityNode,
    pub tasks: Vec<TaskListingNode>,
}

impl CapabilityTaskType {
    /// `None` when there is no such capability.
    pub async fn load(ctx: &ResolveContext<'_>, capability_id: i64) -> Result<Option<Self>, SchemaError> {
        let Some(capability) = CapabilityType::load(ctx, capability_id).await? else {
            return Ok(None);
        };
        let listings = ctx.store().list_capability_listings(capability_id).await?;
        Ok(Some(Self {
            capability: capability.resolve(ctx).await?,
            tasks: resolve_listings(ctx, listings).await?,
        }))
    }
}
