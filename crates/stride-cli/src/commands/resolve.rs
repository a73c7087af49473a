use anyhow::Context;
use stride_schema::types::{
    CapabilityTaskType, CapabilityType, InitiativeTaskType, InitiativeType, ProductType,
    TaskListingType, TaskSummary, TaskType,
};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ListingArgs, TaskArgs};
use crate::context::AppContext;
use crate::output::output;

/// Handle `stride task`.
pub async fn task(args: &TaskArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let resolver = ctx.resolver();
    if args.listing {
        let listing = ctx
            .service
            .get_listing_for_task(args.id)
            .await
            .with_context(|| format!("no listing for task {}", args.id))?;
        let node = TaskListingType::from(listing).resolve(&resolver).await?;
        return output(&node, flags.format);
    }

    let task = TaskType::load(&resolver, args.id)
        .await?
        .with_context(|| format!("task {} not found", args.id))?;
    let node = task.resolve(&resolver, args.user_id).await?;
    output(&node, flags.format)
}

/// Handle `stride tasks`.
pub async fn tasks(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = flags.limit.unwrap_or_else(|| ctx.default_limit());
    output(&task_summaries(ctx, limit).await?, flags.format)
}

/// Up to `limit` tasks, each with its derived status.
async fn task_summaries(ctx: &AppContext, limit: u32) -> anyhow::Result<Vec<TaskSummary>> {
    let resolver = ctx.resolver();
    let mut summaries = Vec::new();
    for task in ctx.service.list_tasks(limit).await? {
        summaries.push(TaskType::from(task).summary(&resolver).await?);
    }
    Ok(summaries)
}

/// Handle `stride product`.
pub async fn product(slug: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let resolver = ctx.resolver();
    let product = ProductType::load_by_slug(&resolver, slug)
        .await?
        .with_context(|| format!("product '{slug}' not found"))?;
    output(&product.resolve(&resolver).await?, flags.format)
}

/// Handle `stride initiative`.
pub async fn initiative(args: &ListingArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let resolver = ctx.resolver();
    if args.tasks {
        let view = InitiativeTaskType::load(&resolver, args.id)
            .await?
            .with_context(|| format!("initiative {} not found", args.id))?;
        return output(&view, flags.format);
    }
    let initiative = InitiativeType::load(&resolver, args.id)
        .await?
        .with_context(|| format!("initiative {} not found", args.id))?;
    output(&initiative.resolve(&resolver).await?, flags.format)
}

/// Handle `stride capability`.
pub async fn capability(args: &ListingArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let resolver = ctx.resolver();
    if args.tasks {
        let view = CapabilityTaskType::load(&resolver, args.id)
            .await?
            .with_context(|| format!("capability {} not found", args.id))?;
        return output(&view, flags.format);
    }
    let capability = CapabilityType::load(&resolver, args.id)
        .await?
        .with_context(|| format!("capability {} not found", args.id))?;
    output(&capability.resolve(&resolver).await?, flags.format)
}

/// Handle `stride breadcrumb`.
pub async fn breadcrumb(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let resolver = ctx.resolver();
    let capability = CapabilityType::load(&resolver, id)
        .await?
        .with_context(|| format!("capability {id} not found"))?;
    output(&capability.breadcrumb(&resolver).await?, flags.format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stride_config::StrideConfig;
    use stride_core::enums::TaskStatus;
    use stride_db::test_support::fixtures::seed_task;

    use super::*;
    use crate::cli::OutputFormat;

    async fn memory_context() -> AppContext {
        let flags = GlobalFlags {
            format: OutputFormat::Json,
            limit: None,
            quiet: true,
            verbose: false,
            viewer: None,
            db: Some(":memory:".into()),
        };
        AppContext::init(StrideConfig::default(), &flags).await.unwrap()
    }

    #[tokio::test]
    async fn task_list_shows_derived_status() {
        let ctx = memory_context().await;
        let base = seed_task(&ctx.service, "Schema").await;
        let api = seed_task(&ctx.service, "API").await;
        ctx.service.set_task_status(base.id, TaskStatus::Blocked).await.unwrap();
        ctx.service.add_task_dependency(api.id, base.id).await.unwrap();

        let summaries = task_summaries(&ctx, 10).await.unwrap();
        let statuses: Vec<(i64, i64)> = summaries.iter().map(|s| (s.id, s.status)).collect();
        assert_eq!(
            statuses,
            vec![
                (base.id, TaskStatus::Available.code()),
                (api.id, TaskStatus::Blocked.code()),
            ]
        );
    }

    #[tokio::test]
    async fn task_list_respects_limit() {
        let ctx = memory_context().await;
        seed_task(&ctx.service, "One").await;
        seed_task(&ctx.service, "Two").await;
        assert_eq!(task_summaries(&ctx, 1).await.unwrap().len(), 1);
    }
}
