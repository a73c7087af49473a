//! Task repository: creation, lookups, dependency edges and status updates.

use chrono::Utc;

use stride_core::entities::Task;
use stride_core::enums::TaskStatus;
use stride_core::errors::CoreError;
use stride_core::inputs::TaskInput;

use crate::error::{DatabaseError, OptionalExt};
use crate::helpers::{get_opt_i64, get_opt_string, parse_datetime};
use crate::service::StrideService;

const SELECT_COLS: &str = "t.id, t.published_id, t.initiative_id, t.capability_id, t.category_id, \
     t.title, t.short_description, t.description, t.status, t.priority, t.reviewer_id, \
     t.video_url, t.contribution_guide, t.created_at, t.updated_at";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        published_id: row.get(1)?,
        initiative_id: get_opt_i64(row, 2)?,
        capability_id: get_opt_i64(row, 3)?,
        category_id: get_opt_i64(row, 4)?,
        title: row.get(5)?,
        short_description: get_opt_string(row, 6)?,
        description: row.get(7)?,
        status: row.get(8)?,
        priority: row.get(9)?,
        reviewer_id: get_opt_i64(row, 10)?,
        video_url: get_opt_string(row, 11)?,
        contribution_guide: get_opt_string(row, 12)?,
        created_at: parse_datetime(&row.get::<String>(13)?)?,
        updated_at: parse_datetime(&row.get::<String>(14)?)?,
    })
}

/// Ids resolved from a `TaskInput` before anything is written.
struct ResolvedTaskRefs {
    product_id: i64,
    reviewer_id: i64,
    category_id: Option<i64>,
    expertise_id: Option<i64>,
    priority: i64,
}

impl StrideService {
    /// Create a task from its input, publish it under the product, and write
    /// its listing row.
    pub async fn create_task(&self, input: &TaskInput) -> Result<Task, DatabaseError> {
        input.validate()?;
        let refs = self.resolve_task_refs(input).await?;

        let tx = self.begin().await?;
        let result = match self.insert_task_rows(input, &refs).await {
            Ok(id) => self.refresh_task_listing(id).await.map(|_| id),
            Err(error) => Err(error),
        };
        let id = match result {
            Ok(id) => {
                tx.commit().await?;
                id
            }
            Err(error) => {
                tx.rollback().await?;
                return Err(error);
            }
        };
        tracing::info!(id, product_id = refs.product_id, "created task");

        self.get_task(id).await
    }

    async fn resolve_task_refs(&self, input: &TaskInput) -> Result<ResolvedTaskRefs, DatabaseError> {
        let product_id = self.get_product_by_slug(&input.product_slug).await?.id;
        let reviewer_id = self.get_person_by_username(&input.reviewer).await?.id;
        let category_id = match input.category.as_deref() {
            Some(name) => Some(self.get_category_by_name(name).await?.id),
            None => None,
        };
        let expertise_id = match input.expertise.as_deref() {
            Some(name) => Some(self.get_expertise_by_name(name).await?.id),
            None => None,
        };
        if let Some(initiative_id) = input.initiative {
            if self.get_initiative(initiative_id).await.optional()?.is_none() {
                return Err(CoreError::not_found("initiative", initiative_id).into());
            }
        }
        if let Some(capability_id) = input.capability {
            if self.get_capability(capability_id).await.optional()?.is_none() {
                return Err(CoreError::not_found("capability", capability_id).into());
            }
        }
        for depend_id in input.depend_on.iter().flatten() {
            if self.get_task(*depend_id).await.optional()?.is_none() {
                return Err(CoreError::not_found("task", depend_id).into());
            }
        }

        Ok(ResolvedTaskRefs {
            product_id,
            reviewer_id,
            category_id,
            expertise_id,
            priority: input.priority_code()?,
        })
    }

    async fn insert_task_rows(
        &self,
        input: &TaskInput,
        refs: &ResolvedTaskRefs,
    ) -> Result<i64, DatabaseError> {
        let conn = self.db().conn();
        let now = Utc::now().to_rfc3339();

        let published_id = self
            .db()
            .query_i64(
                "SELECT COALESCE(MAX(t.published_id), 0) + 1 FROM tasks t
                 JOIN product_tasks pt ON pt.task_id = t.id
                 WHERE pt.product_id = ?1",
                [refs.product_id],
            )
            .await?;

        let mut rows = conn
            .query(
                "INSERT INTO tasks (published_id, initiative_id, capability_id, category_id, title, \
                 short_description, description, status, priority, reviewer_id, video_url, \
                 contribution_guide, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14) RETURNING id",
                libsql::params![
                    published_id,
                    input.initiative,
                    input.capability,
                    refs.category_id,
                    input.title.as_str(),
                    input.short_description.as_deref(),
                    input.description.as_str(),
                    input.status_code(),
                    refs.priority,
                    refs.reviewer_id,
                    input.video_url.as_deref(),
                    input.contribution_guide.as_deref(),
                    now.as_str(),
                    now.as_str()
                ],
            )
            .await?;
        let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;
        drop(rows);

        conn.execute(
            "INSERT INTO product_tasks (product_id, task_id) VALUES (?1, ?2)",
            libsql::params![refs.product_id, id],
        )
        .await?;

        for name in input.tags.iter().flatten() {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let tag = self.get_or_create_tag(name).await?;
            conn.execute(
                "INSERT OR IGNORE INTO task_tags (task_id, tag_id) VALUES (?1, ?2)",
                libsql::params![id, tag.id],
            )
            .await?;
        }

        if let Some(expertise_id) = refs.expertise_id {
            conn.execute(
                "INSERT INTO task_expertise (task_id, expertise_id) VALUES (?1, ?2)",
                libsql::params![id, expertise_id],
            )
            .await?;
        }

        for depend_id in input.depend_on.iter().flatten() {
            self.insert_dependency(id, *depend_id).await?;
        }
        Ok(id)
    }

    pub async fn get_task(&self, id: i64) -> Result<Task, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM tasks t WHERE t.id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_task(&row)
    }

    pub async fn list_tasks(&self, limit: u32) -> Result<Vec<Task>, DatabaseError> {
        self.query_tasks(
            &format!("SELECT {SELECT_COLS} FROM tasks t ORDER BY t.id LIMIT ?1"),
            [i64::from(limit)],
        )
        .await
    }

    pub async fn list_capability_tasks(&self, capability_id: i64) -> Result<Vec<Task>, DatabaseError> {
        self.query_tasks(
            &format!("SELECT {SELECT_COLS} FROM tasks t WHERE t.capability_id = ?1 ORDER BY t.id"),
            [capability_id],
        )
        .await
    }

    /// Tasks that `task_id` depends on.
    pub async fn list_task_dependencies(&self, task_id: i64) -> Result<Vec<Task>, DatabaseError> {
        self.query_tasks(
            &format!(
                "SELECT {SELECT_COLS} FROM tasks t
                 JOIN task_depends d ON d.depends_by_id = t.id
                 WHERE d.task_id = ?1
                 ORDER BY t.id"
            ),
            [task_id],
        )
        .await
    }

    /// Tasks that depend on `task_id`.
    pub async fn list_task_dependents(&self, task_id: i64) -> Result<Vec<Task>, DatabaseError> {
        self.query_tasks(
            &format!(
                "SELECT {SELECT_COLS} FROM tasks t
                 JOIN task_depends d ON d.task_id = t.id
                 WHERE d.depends_by_id = ?1
                 ORDER BY t.id"
            ),
            [task_id],
        )
        .await
    }

    /// Whether some task `task_id` depends on is not done yet.
    pub async fn has_active_dependencies(&self, task_id: i64) -> Result<bool, DatabaseError> {
        let found = self
            .db()
            .query_i64(
                "SELECT EXISTS (
                     SELECT 1 FROM task_depends d
                     JOIN tasks t ON t.id = d.depends_by_id
                     WHERE d.task_id = ?1 AND t.status != ?2
                 )",
                libsql::params![task_id, TaskStatus::Done.code()],
            )
            .await?;
        Ok(found != 0)
    }

    /// Record that `task_id` depends on `depends_by_id`.
    pub async fn add_task_dependency(
        &self,
        task_id: i64,
        depends_by_id: i64,
    ) -> Result<(), DatabaseError> {
        if task_id == depends_by_id {
            return Err(CoreError::Validation(format!("task {task_id} cannot depend on itself")).into());
        }
        self.insert_dependency(task_id, depends_by_id).await?;
        tracing::info!(task_id, depends_by_id, "added task dependency");
        Ok(())
    }

    async fn insert_dependency(&self, task_id: i64, depends_by_id: i64) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT OR IGNORE INTO task_depends (task_id, depends_by_id) VALUES (?1, ?2)",
                libsql::params![task_id, depends_by_id],
            )
            .await?;
        Ok(())
    }

    /// Set the stored status of a task and refresh its listing row.
    pub async fn set_task_status(
        &self,
        task_id: i64,
        status: TaskStatus,
    ) -> Result<Task, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![status.code(), Utc::now().to_rfc3339(), task_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        tracing::info!(task_id, status = %status, "set task status");

        self.refresh_task_listing(task_id).await?;
        self.get_task(task_id).await
    }

    async fn query_tasks(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<Task>, DatabaseError> {
        let mut rows = self.db().conn().query(sql, params).await?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{seed_product, task_input, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_task_publishes_under_product() {
        let svc = test_service().await;
        let (product, _) = seed_product(&svc, "acme").await;

        let first = svc.create_task(&task_input("acme", "First")).await.unwrap();
        let second = svc.create_task(&task_input("acme", "Second")).await.unwrap();

        assert_eq!(first.published_id, 1);
        assert_eq!(second.published_id, 2);
        assert_eq!(first.status, TaskStatus::Draft.code());

        let link = svc.get_product_task(first.id).await.unwrap();
        assert_eq!(link.product_id, product.id);
    }

    #[tokio::test]
    async fn create_task_attaches_tags_and_expertise() {
        let svc = test_service().await;
        seed_product(&svc, "acme").await;
        let category = svc.create_category("Engineering", None).await.unwrap();
        svc.create_expertise("Rust", Some(category.id)).await.unwrap();

        let mut input = task_input("acme", "Port parser");
        input.tags = Some(vec!["parser".into(), "rust".into(), "  ".into()]);
        input.category = Some("Engineering".into());
        input.expertise = Some("Rust".into());
        input.priority = Some("Low".into());
        let task = svc.create_task(&input).await.unwrap();

        assert_eq!(task.category_id, Some(category.id));
        assert_eq!(task.priority, 2);
        let tags: Vec<String> = svc
            .list_task_tags(task.id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(tags, vec!["parser".to_string(), "rust".to_string()]);
        assert_eq!(svc.list_task_expertise(task.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_task_with_unknown_reviewer_writes_nothing() {
        let svc = test_service().await;
        seed_product(&svc, "acme").await;
        let mut input = task_input("acme", "Orphan");
        input.reviewer = "nobody".into();

        assert!(svc.create_task(&input).await.unwrap_err().is_not_found());
        assert!(svc.list_tasks(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_task_writes_listing_row() {
        let svc = test_service().await;
        seed_product(&svc, "acme").await;
        let task = svc.create_task(&task_input("acme", "Listed")).await.unwrap();

        let listing = svc.get_listing_for_task(task.id).await.unwrap();
        assert_eq!(listing.title, "Listed");
    }

    #[tokio::test]
    async fn failed_listing_refresh_rolls_back_task() {
        let svc = test_service().await;
        seed_product(&svc, "acme").await;
        svc.db()
            .conn()
            .execute("DROP TABLE task_listings", ())
            .await
            .unwrap();

        assert!(svc.create_task(&task_input("acme", "Unlisted")).await.is_err());
        assert!(svc.list_tasks(10).await.unwrap().is_empty());
        let links = svc
            .db()
            .query_i64("SELECT COUNT(*) FROM product_tasks", ())
            .await
            .unwrap();
        assert_eq!(links, 0);
    }

    #[tokio::test]
    async fn dependencies_and_dependents() {
        let svc = test_service().await;
        seed_product(&svc, "acme").await;
        let base = svc.create_task(&task_input("acme", "Schema")).await.unwrap();
        let mut input = task_input("acme", "API");
        input.depend_on = Some(vec![base.id]);
        let api = svc.create_task(&input).await.unwrap();

        let deps = svc.list_task_dependencies(api.id).await.unwrap();
        assert_eq!(deps.iter().map(|t| t.id).collect::<Vec<_>>(), vec![base.id]);
        let dependents = svc.list_task_dependents(base.id).await.unwrap();
        assert_eq!(dependents.iter().map(|t| t.id).collect::<Vec<_>>(), vec![api.id]);

        assert!(svc.has_active_dependencies(api.id).await.unwrap());
        svc.set_task_status(base.id, TaskStatus::Done).await.unwrap();
        assert!(!svc.has_active_dependencies(api.id).await.unwrap());
    }

    #[tokio::test]
    async fn self_dependency_is_rejected() {
        let svc = test_service().await;
        seed_product(&svc, "acme").await;
        let task = svc.create_task(&task_input("acme", "Loop")).await.unwrap();
        assert!(svc.add_task_dependency(task.id, task.id).await.is_err());
    }

    #[tokio::test]
    async fn status_of_missing_task_is_no_result() {
        let svc = test_service().await;
        assert!(matches!(
            svc.set_task_status(99, TaskStatus::Done).await,
            Err(DatabaseError::NoResult)
        ));
    }
}
