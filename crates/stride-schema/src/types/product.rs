//! `ProductType`: a product with its owner and task totals.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use stride_core::entities::Product;
use stride_db::error::OptionalExt;

use crate::context::ResolveContext;
use crate::error::SchemaError;
use crate::types::plain::CodeRepositoryType;
use crate::video::embed_video_link;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProductNode {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub full_description: Option<String>,
    pub website: String,
    pub video_url: Option<String>,
    pub preview_video_url: Option<String>,
    pub is_private: bool,
    pub owner: Option<String>,
    pub capability_start_id: Option<i64>,
    pub available_task_num: i64,
    pub total_task_num: i64,
    pub code_repositories: Vec<CodeRepositoryType>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProductType {
    product: Product,
}

impl From<Product> for ProductType {
    fn from(product: Product) -> Self {
        Self { product }
    }
}

impl ProductType {
    /// Load by slug. `None` when no product has that slug.
    pub async fn load_by_slug(
        ctx: &ResolveContext<'_>,
        slug: &str,
    ) -> Result<Option<Self>, SchemaError> {
        Ok(ctx
            .store()
            .get_product_by_slug(slug)
            .await
            .optional()?
            .map(Self::from))
    }

    #[must_use]
    pub const fn record(&self) -> &Product {
        &self.product
    }

    /// Tasks under the product's initiatives that are `Available`.
    pub async fn available_task_num(&self, ctx: &ResolveContext<'_>) -> Result<i64, SchemaError> {
        Ok(ctx.store().count_available_product_tasks(self.product.id).await?)
    }

    /// Tasks in the capability tree or the initiatives of the product.
    pub async fn total_task_num(&self, ctx: &ResolveContext<'_>) -> Result<i64, SchemaError> {
        Ok(ctx.store().count_total_product_tasks(self.product.id).await?)
    }

    /// Owner's username.
    pub async fn owner(&self, ctx: &ResolveContext<'_>) -> Result<Option<String>, SchemaError> {
        let Some(owner_id) = self.product.owner_id else {
            return Ok(None);
        };
        Ok(ctx
            .store()
            .get_person(owner_id)
            .await
            .optional()?
            .map(|p| p.username))
    }

    pub async fn resolve(&self, ctx: &ResolveContext<'_>) -> Result<ProductNode, SchemaError> {
        let p = &self.product;
        let code_repositories = ctx
            .store()
            .list_product_repositories(p.id)
            .await?
            .into_iter()
            .map(CodeRepositoryType::from)
            .collect();

        Ok(ProductNode {
            id: p.id,
            name: p.name.clone(),
            slug: p.slug.clone(),
            short_description: p.short_description.clone(),
            full_description: p.full_description.clone(),
            website: p.website.clone(),
            video_url: p.video_url.clone(),
            preview_video_url: embed_video_link(p.video_url.as_deref()),
            is_private: p.is_private,
            owner: self.owner(ctx).await?,
            capability_start_id: p.capability_start_id,
            available_task_num: self.available_task_num(ctx).await?,
            total_task_num: self.total_task_num(ctx).await?,
            code_repositories,
            created_at: p.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stride_core::enums::TaskStatus;
    use stride_core::identity::Viewer;
    use stride_core::inputs::CodeRepositoryInput;
    use stride_db::test_support::fixtures::{
        capability_input, initiative_input, product_input, seed_product, task_input, test_service,
    };

    #[tokio::test]
    async fn totals_count_each_task_once() {
        let svc = test_service().await;
        let (product, _) = seed_product(&svc, "acme").await;
        let root = svc
            .create_capability(&capability_input(None, Some("acme"), "Acme"))
            .await
            .unwrap();
        let leaf = svc
            .create_capability(&capability_input(Some(root.id), None, "Billing"))
            .await
            .unwrap();
        let initiative = svc
            .create_initiative(&initiative_input("Launch", Some("acme")))
            .await
            .unwrap();

        let mut both = task_input("acme", "Invoices");
        both.capability = Some(leaf.id);
        both.initiative = Some(initiative.id);
        both.status = Some(TaskStatus::Available.code());
        svc.create_task(&both).await.unwrap();

        let mut tree_only = task_input("acme", "Refunds");
        tree_only.capability = Some(root.id);
        tree_only.status = Some(TaskStatus::Available.code());
        svc.create_task(&tree_only).await.unwrap();

        svc.create_task(&task_input("acme", "Unfiled")).await.unwrap();

        let ctx = ResolveContext::new(&svc, Viewer::anonymous());
        let product = ProductType::from(svc.get_product(product.id).await.unwrap());
        assert_eq!(product.total_task_num(&ctx).await.unwrap(), 2);
        // Only initiative tasks count as available.
        assert_eq!(product.available_task_num(&ctx).await.unwrap(), 1);
        assert_eq!(product.owner(&ctx).await.unwrap().as_deref(), Some("ada"));
    }

    #[tokio::test]
    async fn resolve_hides_repository_tokens() {
        let svc = test_service().await;
        svc.create_product(&product_input("Solo"), None).await.unwrap();
        svc.create_code_repository(&CodeRepositoryInput {
            product_slug: "solo".into(),
            repository: Some("https://github.com/solo/app".into()),
            access_token: "ghp_secret".into(),
        })
        .await
        .unwrap();
        let ctx = ResolveContext::new(&svc, Viewer::anonymous());

        let node = ProductType::load_by_slug(&ctx, "solo")
            .await
            .unwrap()
            .unwrap()
            .resolve(&ctx)
            .await
            .unwrap();
        assert_eq!(node.owner, None);
        assert_eq!(node.total_task_num, 0);
        assert_eq!(node.code_repositories.len(), 1);
        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("ghp_secret"));
    }

    #[tokio::test]
    async fn unknown_slug_is_none() {
        let svc = test_service().await;
        let ctx = ResolveContext::new(&svc, Viewer::anonymous());
        assert!(ProductType::load_by_slug(&ctx, "ghost").await.unwrap().is_none());
    }
}
