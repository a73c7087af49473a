use stride_core::enums::{ClaimKind, ProductRight};
use stride_schema::types::PersonType;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ClaimArg, RightArg};
use crate::context::AppContext;
use crate::output::output;

impl From<RightArg> for ProductRight {
    fn from(arg: RightArg) -> Self {
        match arg {
            RightArg::Follower => Self::Follower,
            RightArg::Admin => Self::Admin,
            RightArg::Manager => Self::Manager,
            RightArg::Contributor => Self::Contributor,
            RightArg::Owner => Self::Owner,
        }
    }
}

impl From<ClaimArg> for ClaimKind {
    fn from(arg: ClaimArg) -> Self {
        match arg {
            ClaimArg::Done => Self::Done,
            ClaimArg::Active => Self::Active,
            ClaimArg::Failed => Self::Failed,
            ClaimArg::PutOnHold => Self::PutOnHold,
            ClaimArg::Abandoned => Self::Abandoned,
            ClaimArg::InReview => Self::InReview,
        }
    }
}

/// Handle `stride person`.
pub async fn person(
    username: &str,
    first_name: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let person = ctx.service.create_person(username, first_name).await?;
    output(&PersonType::from(person), flags.format)
}

/// Handle `stride grant`.
pub async fn grant(
    product_slug: &str,
    username: &str,
    right: RightArg,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let product = ctx.service.get_product_by_slug(product_slug).await?;
    let person = ctx.service.get_person_by_username(username).await?;
    let membership = ctx
        .service
        .add_product_person(product.id, person.id, right.into())
        .await?;
    output(&membership, flags.format)
}

/// Handle `stride claim`.
pub async fn claim(
    task_id: i64,
    username: &str,
    kind: ClaimArg,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let person = ctx.service.get_person_by_username(username).await?;
    let claim = ctx.service.add_claim(task_id, person.id, kind.into()).await?;
    output(&claim, flags.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_args_map_to_codes() {
        assert_eq!(ProductRight::from(RightArg::Admin).code(), 1);
        assert_eq!(ProductRight::from(RightArg::Owner).code(), 4);
        assert!(ProductRight::from(RightArg::Manager).can_edit_tasks());
        assert!(!ProductRight::from(RightArg::Contributor).can_edit_tasks());
    }

    #[test]
    fn claim_args_map_to_codes() {
        assert_eq!(ClaimKind::from(ClaimArg::Done).code(), 0);
        assert_eq!(ClaimKind::from(ClaimArg::InReview).code(), 5);
    }
}
