//! Public links to tasks.

use stride_core::entities::Task;
use stride_db::error::OptionalExt;

use crate::context::ResolveContext;
use crate::error::SchemaError;

/// `"{domain}/{owner}/{product_slug}/tasks/{published_id}"` for a published
/// task, `None` when the task is not linked to a product.
///
/// `domain` is the configured front-end URL when `show_domain` is set and
/// empty otherwise. `owner` is the product owner's username, or the product
/// slug when the product has no owner.
pub async fn task_link(
    ctx: &ResolveContext<'_>,
    task: &Task,
    show_domain: bool,
) -> Result<Option<String>, SchemaError> {
    let store = ctx.store();
    let Some(link) = store.get_product_task(task.id).await.optional()? else {
        return Ok(None);
    };
    let Some(product) = store.get_product(link.product_id).await.optional()? else {
        return Ok(None);
    };

    let owner = match product.owner_id {
        Some(owner_id) => store.get_person(owner_id).await.optional()?.map(|p| p.username),
        None => None,
    };
    let owner = owner.unwrap_or_else(|| product.slug.clone());
    let domain = if show_domain { ctx.frontend_base() } else { "" };

    Ok(Some(format!(
        "{domain}/{owner}/{}/tasks/{}",
        product.slug, task.published_id
    )))
}
