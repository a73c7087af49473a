//! Task status as shown to readers.

use stride_core::entities::Task;
use stride_core::enums::TaskStatus;

use crate::context::ResolveContext;
use crate::error::SchemaError;

/// Status code shown for a task, given its stored code and whether any task
/// it depends on is unfinished.
///
/// An unfinished dependency always blocks. A stored `Blocked` whose
/// dependencies are all done reads as `Available`. Everything else, including
/// codes outside the table, is shown as stored.
#[must_use]
pub fn effective_status(stored: i64, has_active_dependency: bool) -> i64 {
    if has_active_dependency {
        return TaskStatus::Blocked.code();
    }
    if stored == TaskStatus::Blocked.code() {
        return TaskStatus::Available.code();
    }
    stored
}

/// Derive the status of `task` from its stored code and its live dependencies.
pub async fn derive_task_status(ctx: &ResolveContext<'_>, task: &Task) -> Result<i64, SchemaError> {
    let active = ctx.store().has_active_dependencies(task.id).await?;
    Ok(effective_status(task.status, active))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use stride_core::identity::Viewer;
    use stride_db::test_support::fixtures::{seed_task, test_service};

    #[rstest]
    #[case(TaskStatus::Available, true, TaskStatus::Blocked)]
    #[case(TaskStatus::Draft, true, TaskStatus::Blocked)]
    #[case(TaskStatus::Blocked, false, TaskStatus::Available)]
    #[case(TaskStatus::Claimed, false, TaskStatus::Claimed)]
    #[case(TaskStatus::Done, false, TaskStatus::Done)]
    fn status_table(
        #[case] stored: TaskStatus,
        #[case] active: bool,
        #[case] expected: TaskStatus,
    ) {
        assert_eq!(effective_status(stored.code(), active), expected.code());
    }

    #[test]
    fn unknown_codes_are_kept() {
        assert_eq!(effective_status(42, false), 42);
    }

    #[tokio::test]
    async fn blocked_until_dependency_done() {
        let svc = test_service().await;
        let base = seed_task(&svc, "Schema").await;
        let api = seed_task(&svc, "API").await;
        svc.add_task_dependency(api.id, base.id).await.unwrap();
        let ctx = ResolveContext::new(&svc, Viewer::anonymous());

        let api = svc.set_task_status(api.id, TaskStatus::Available).await.unwrap();
        assert_eq!(derive_task_status(&ctx, &api).await.unwrap(), TaskStatus::Blocked.code());

        svc.set_task_status(base.id, TaskStatus::Done).await.unwrap();
        assert_eq!(derive_task_status(&ctx, &api).await.unwrap(), TaskStatus::Available.code());
    }
}
