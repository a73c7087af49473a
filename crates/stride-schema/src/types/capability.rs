//! `CapabilityType`: a node of a product's capability tree.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use stride_core::entities::{Capability, Product};
use stride_db::error::OptionalExt;

use crate::context::ResolveContext;
use crate::error::SchemaError;
use crate::types::plain::{AttachmentType, BreadcrumbType};
use crate::types::task::{TaskSummary, TaskType, summarize};
use crate::video::embed_video_link;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CapabilityNode {
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub video_link: Option<String>,
    pub preview_video_url: Option<String>,
    pub product: Option<Product>,
    pub tasks: Vec<TaskSummary>,
    pub attachments: Vec<AttachmentType>,
    pub breadcrumb: Vec<BreadcrumbType>,
}

#[derive(Debug, Clone)]
pub struct CapabilityType {
    capability: Capability,
}

impl From<Capability> for CapabilityType {
    fn from(capability: Capability) -> Self {
        Self { capability }
    }
}

impl CapabilityType {
    pub async fn load(ctx: &ResolveContext<'_>, id: i64) -> Result<Option<Self>, SchemaError> {
        Ok(ctx.store().get_capability(id).await.optional()?.map(Self::from))
    }

    #[must_use]
    pub const fn record(&self) -> &Capability {
        &self.capability
    }

    #[must_use]
    pub const fn id(&self) -> i64 {
        self.capability.id
    }

    /// Path from this capability up to its root, this capability first.
    ///
    /// A missing parent ends the walk at the last node found. A node seen
    /// twice ends it too, so a parent cycle cannot loop.
    pub async fn breadcrumb(&self, ctx: &ResolveContext<'_>) -> Result<Vec<BreadcrumbType>, SchemaError> {
        let mut path = vec![BreadcrumbType {
            id: self.capability.id,
            name: self.capability.name.clone(),
        }];
        let mut seen = HashSet::from([self.capability.id]);
        let mut parent_id = self.capability.parent_id;

        while let Some(id) = parent_id {
            if !seen.insert(id) {
                tracing::warn!(capability_id = self.capability.id, at = id, "capability parent cycle");
                break;
            }
            let Some(parent) = ctx.store().get_capability(id).await.optional()? else {
                break;
            };
            path.push(BreadcrumbType {
                id: parent.id,
                name: parent.name,
            });
            parent_id = parent.parent_id;
        }
        Ok(path)
    }

    /// The product whose capability tree has this capability's root.
    pub async fn product(&self, ctx: &ResolveContext<'_>) -> Result<Option<Product>, SchemaError> {
        let root_id = self
            .breadcrumb(ctx)
            .await?
            .last()
            .map_or(self.capability.id, |step| step.id);
        Ok(ctx
            .store()
            .get_product_by_capability_start(root_id)
            .await
            .optional()?)
    }

    pub async fn tasks(&self, ctx: &ResolveContext<'_>) -> Result<Vec<TaskType>, SchemaError> {
        let tasks = ctx.store().list_capability_tasks(self.capability.id).await?;
        Ok(tasks.into_iter().map(TaskType::from).collect())
    }

    pub async fn attachments(&self, ctx: &ResolveContext<'_>) -> Result<Vec<AttachmentType>, SchemaError> {
        let attachments = ctx
            .store()
            .list_capability_attachments(self.capability.id)
            .await?;
        Ok(attachments.into_iter().map(AttachmentType::from).collect())
    }

    #[must_use]
    pub fn preview_video_url(&self) -> Option<String> {
        embed_video_link(self.capability.video_link.as_deref())
    }

    pub async fn resolve(&self, ctx: &ResolveContext<'_>) -> Result<CapabilityNode, SchemaError> {
        let c = &self.capability;
        let tasks = summarize(ctx, &self.tasks(ctx).await?).await?;

        Ok(CapabilityNode {
            id: c.id,
            parent_id: c.parent_id,
            name: c.name.clone(),
            description: c.description.clone(),
            video_link: c.video_link.clone(),
            preview_video_url: self.preview_video_url(),
            product: self.product(ctx).await?,
            tasks,
            attachments: self.attachments(ctx).await?,
            breadcrumb: self.breadcrumb(ctx).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stride_core::enums::TaskStatus;
    use stride_core::identity::Viewer;
    use stride_db::test_support::fixtures::{capability_input, seed_product, task_input, test_service};

    async fn tree(svc: &stride_db::service::StrideService) -> (Capability, Capability, Capability) {
        seed_product(svc, "acme").await;
        let root = svc
            .create_capability(&capability_input(None, Some("acme"), "Acme"))
            .await
            .unwrap();
        let mid = svc
            .create_capability(&capability_input(Some(root.id), None, "Billing"))
            .await
            .unwrap();
        let leaf = svc
            .create_capability(&capability_input(Some(mid.id), None, "Invoices"))
            .await
            .unwrap();
        (root, mid, leaf)
    }

    #[tokio::test]
    async fn breadcrumb_runs_leaf_to_root() {
        let svc = test_service().await;
        let (root, mid, leaf) = tree(&svc).await;
        let ctx = ResolveContext::new(&svc, Viewer::anonymous());

        let crumbs = CapabilityType::from(leaf.clone()).breadcrumb(&ctx).await.unwrap();
        assert_eq!(
            crumbs,
            vec![
                BreadcrumbType { id: leaf.id, name: "Invoices".into() },
                BreadcrumbType { id: mid.id, name: "Billing".into() },
                BreadcrumbType { id: root.id, name: "Acme".into() },
            ]
        );

        let root_crumbs = CapabilityType::from(root.clone()).breadcrumb(&ctx).await.unwrap();
        assert_eq!(root_crumbs.len(), 1);
    }

    #[tokio::test]
    async fn breadcrumb_stops_on_cycle() {
        let svc = test_service().await;
        let (root, mid, _) = tree(&svc).await;
        svc.db()
            .conn()
            .execute(
                "UPDATE capabilities SET parent_id = ?1 WHERE id = ?2",
                [mid.id, root.id],
            )
            .await
            .unwrap();
        let ctx = ResolveContext::new(&svc, Viewer::anonymous());

        let mid = svc.get_capability(mid.id).await.unwrap();
        let crumbs = CapabilityType::from(mid).breadcrumb(&ctx).await.unwrap();
        assert_eq!(crumbs.len(), 2);
    }

    #[tokio::test]
    async fn product_found_through_root() {
        let svc = test_service().await;
        let (_, _, leaf) = tree(&svc).await;
        let ctx = ResolveContext::new(&svc, Viewer::anonymous());

        let product = CapabilityType::from(leaf).product(&ctx).await.unwrap().unwrap();
        assert_eq!(product.slug, "acme");
    }

    #[tokio::test]
    async fn detached_tree_has_no_product() {
        let svc = test_service().await;
        let (_, mid, _) = tree(&svc).await;
        svc.db()
            .conn()
            .execute("UPDATE products SET capability_start_id = NULL", ())
            .await
            .unwrap();
        let ctx = ResolveContext::new(&svc, Viewer::anonymous());

        assert_eq!(CapabilityType::from(mid).product(&ctx).await.unwrap(), None);
    }

    #[tokio::test]
    async fn resolve_lists_tasks() {
        let svc = test_service().await;
        let (_, mid, _) = tree(&svc).await;
        let mut input = task_input("acme", "Dunning");
        input.capability = Some(mid.id);
        let task = svc.create_task(&input).await.unwrap();
        svc.set_task_status(task.id, TaskStatus::Blocked).await.unwrap();
        let ctx = ResolveContext::new(&svc, Viewer::anonymous());

        let node = CapabilityType::from(mid).resolve(&ctx).await.unwrap();
        assert_eq!(node.tasks.len(), 1);
        assert_eq!(node.tasks[0].title, "Dunning");
        assert_eq!(node.tasks[0].status, TaskStatus::Available.code());
        assert_eq!(node.breadcrumb.len(), 2);
        assert!(node.product.is_some());
    }
}
