//! Category, expertise, and tag repository.

use stride_core::entities::{Expertise, Tag, TaskCategory};
use stride_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_i64};
use crate::service::StrideService;

fn row_to_category(row: &libsql::Row) -> Result<TaskCategory, DatabaseError> {
    Ok(TaskCategory {
        id: row.get(0)?,
        name: row.get(1)?,
        parent_id: get_opt_i64(row, 2)?,
        selectable: get_bool(row, 3)?,
    })
}

fn row_to_expertise(row: &libsql::Row) -> Result<Expertise, DatabaseError> {
    Ok(Expertise {
        id: row.get(0)?,
        name: row.get(1)?,
        category_id: get_opt_i64(row, 2)?,
        selectable: get_bool(row, 3)?,
    })
}

impl StrideService {
    pub async fn create_category(
        &self,
        name: &str,
        parent_id: Option<i64>,
    ) -> Result<TaskCategory, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO task_categories (name, parent_id) VALUES (?1, ?2) RETURNING id",
                libsql::params![name, parent_id],
            )
            .await?;
        let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;
        tracing::info!(id, name, "created task category");
        Ok(TaskCategory {
            id,
            name: name.to_string(),
            parent_id,
            selectable: true,
        })
    }

    pub async fn get_category(&self, id: i64) -> Result<TaskCategory, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, name, parent_id, selectable FROM task_categories WHERE id = ?1",
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_category(&row)
    }

    pub async fn get_category_by_name(&self, name: &str) -> Result<TaskCategory, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, name, parent_id, selectable FROM task_categories WHERE name = ?1",
                [name],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("category", name))?;
        row_to_category(&row)
    }

    pub async fn create_expertise(
        &self,
        name: &str,
        category_id: Option<i64>,
    ) -> Result<Expertise, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO expertise (name, category_id) VALUES (?1, ?2) RETURNING id",
                libsql::params![name, category_id],
            )
            .await?;
        let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;
        tracing::info!(id, name, "created expertise");
        Ok(Expertise {
            id,
            name: name.to_string(),
            category_id,
            selectable: true,
        })
    }

    pub async fn get_expertise_by_name(&self, name: &str) -> Result<Expertise, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, name, category_id, selectable FROM expertise WHERE name = ?1 \
                 ORDER BY id LIMIT 1",
                [name],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("expertise", name))?;
        row_to_expertise(&row)
    }

    pub async fn list_task_expertise(&self, task_id: i64) -> Result<Vec<Expertise>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT e.id, e.name, e.category_id, e.selectable FROM expertise e
                 JOIN task_expertise te ON te.expertise_id = e.id
                 WHERE te.task_id = ?1
                 ORDER BY e.id",
                [task_id],
            )
            .await?;

        let mut expertise = Vec::new();
        while let Some(row) = rows.next().await? {
            expertise.push(row_to_expertise(&row)?);
        }
        Ok(expertise)
    }

    /// Look a tag up by name, creating it when missing.
    pub async fn get_or_create_tag(&self, name: &str) -> Result<Tag, DatabaseError> {
        let conn = self.db().conn();
        conn.execute("INSERT OR IGNORE INTO tags (name) VALUES (?1)", [name])
            .await?;
        let id = self
            .db()
            .query_i64("SELECT id FROM tags WHERE name = ?1", [name])
            .await?;
        Ok(Tag {
            id,
            name: name.to_string(),
        })
    }

    pub async fn list_task_tags(&self, task_id: i64) -> Result<Vec<Tag>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT g.id, g.name FROM tags g
                 JOIN task_tags tt ON tt.tag_id = g.id
                 WHERE tt.task_id = ?1
                 ORDER BY g.name",
                [task_id],
            )
            .await?;

        let mut tags = Vec::new();
        while let Some(row) = rows.next().await? {
            tags.push(Tag {
                id: row.get(0)?,
                name: row.get(1)?,
            });
        }
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::fixtures::test_service;

    #[tokio::test]
    async fn tags_are_created_once() {
        let svc = test_service().await;
        let first = svc.get_or_create_tag("backend").await.unwrap();
        let second = svc.get_or_create_tag("backend").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn category_and_expertise_lookup() {
        let svc = test_service().await;
        let category = svc.create_category("Engineering", None).await.unwrap();
        let expertise = svc
            .create_expertise("Rust", Some(category.id))
            .await
            .unwrap();

        assert_eq!(svc.get_category_by_name("Engineering").await.unwrap(), category);
        assert_eq!(svc.get_category(category.id).await.unwrap(), category);
        assert_eq!(svc.get_expertise_by_name("Rust").await.unwrap(), expertise);
        assert!(svc.get_expertise_by_name("Cobol").await.unwrap_err().is_not_found());
    }
}
