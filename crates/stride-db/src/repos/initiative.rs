//! Initiative repository: creation, lookups and per-initiative task stats.

use stride_core::entities::{Initiative, Tag};
use stride_core::enums::TaskStatus;
use stride_core::inputs::InitiativeInput;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_i64, get_opt_string};
use crate::service::StrideService;

const SELECT_COLS: &str = "id, product_id, name, description, status, video_url";

fn row_to_initiative(row: &libsql::Row) -> Result<Initiative, DatabaseError> {
    Ok(Initiative {
        id: row.get(0)?,
        product_id: get_opt_i64(row, 1)?,
        name: row.get(2)?,
        description: get_opt_string(row, 3)?,
        status: row.get(4)?,
        video_url: get_opt_string(row, 5)?,
    })
}

impl StrideService {
    pub async fn create_initiative(
        &self,
        input: &InitiativeInput,
    ) -> Result<Initiative, DatabaseError> {
        input.validate()?;
        let product_id = match input.product_slug.as_deref() {
            Some(slug) => Some(self.get_product_by_slug(slug).await?.id),
            None => None,
        };
        let status = input.status_code();

        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO initiatives (product_id, name, description, status, video_url)
                 VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
                libsql::params![
                    product_id,
                    input.name.as_str(),
                    input.description.as_deref(),
                    status,
                    input.video_url.as_deref()
                ],
            )
            .await?;
        let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;
        tracing::info!(id, ?product_id, "created initiative");

        Ok(Initiative {
            id,
            product_id,
            name: input.name.clone(),
            description: input.description.clone(),
            status,
            video_url: input.video_url.clone(),
        })
    }

    pub async fn get_initiative(&self, id: i64) -> Result<Initiative, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM initiatives WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_initiative(&row)
    }

    pub async fn list_product_initiatives(
        &self,
        product_id: i64,
    ) -> Result<Vec<Initiative>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM initiatives WHERE product_id = ?1 ORDER BY id"),
                [product_id],
            )
            .await?;

        let mut initiatives = Vec::new();
        while let Some(row) = rows.next().await? {
            initiatives.push(row_to_initiative(&row)?);
        }
        Ok(initiatives)
    }

    pub async fn count_initiative_tasks(
        &self,
        initiative_id: i64,
        status: TaskStatus,
    ) -> Result<i64, DatabaseError> {
        self.db()
            .query_i64(
                "SELECT COUNT(*) FROM tasks WHERE initiative_id = ?1 AND status = ?2",
                libsql::params![initiative_id, status.code()],
            )
            .await
    }

    /// Distinct tags used by the initiative's tasks, by name.
    pub async fn list_initiative_tags(&self, initiative_id: i64) -> Result<Vec<Tag>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT DISTINCT g.id, g.name FROM tags g
                 JOIN task_tags tt ON tt.tag_id = g.id
                 JOIN tasks t ON t.id = tt.task_id
                 WHERE t.initiative_id = ?1
                 ORDER BY g.name",
                [initiative_id],
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
    use super::*;
    use crate::test_support::fixtures::{initiative_input, product_input, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_initiative_under_product() {
        let svc = test_service().await;
        let product = svc.create_product(&product_input("Acme"), None).await.unwrap();

        let initiative = svc
            .create_initiative(&initiative_input("Onboarding", Some("acme")))
            .await
            .unwrap();
        assert_eq!(initiative.product_id, Some(product.id));
        assert_eq!(initiative.status, 1);

        let listed = svc.list_product_initiatives(product.id).await.unwrap();
        assert_eq!(listed, vec![initiative]);
    }

    #[tokio::test]
    async fn initiative_for_unknown_product_fails() {
        let svc = test_service().await;
        let err = svc
            .create_initiative(&initiative_input("Onboarding", Some("ghost")))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn empty_initiative_has_no_counts_or_tags() {
        let svc = test_service().await;
        let initiative = svc
            .create_initiative(&initiative_input("Loose", None))
            .await
            .unwrap();
        assert_eq!(
            svc.count_initiative_tasks(initiative.id, TaskStatus::Available)
                .await
                .unwrap(),
            0
        );
        assert!(svc.list_initiative_tags(initiative.id).await.unwrap().is_empty());
    }
}
