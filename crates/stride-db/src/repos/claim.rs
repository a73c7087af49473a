//! Task claims: who took a task on, and how that ended.

use stride_core::entities::TaskClaim;
use stride_core::enums::ClaimKind;

use crate::error::DatabaseError;
use crate::helpers::placeholders;
use crate::service::StrideService;

const SELECT_COLS: &str = "id, task_id, person_id, kind";

fn row_to_claim(row: &libsql::Row) -> Result<TaskClaim, DatabaseError> {
    Ok(TaskClaim {
        id: row.get(0)?,
        task_id: row.get(1)?,
        person_id: row.get(2)?,
        kind: row.get(3)?,
    })
}

impl StrideService {
    /// Record a claim and refresh the task's listing row.
    pub async fn add_claim(
        &self,
        task_id: i64,
        person_id: i64,
        kind: ClaimKind,
    ) -> Result<TaskClaim, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO task_claims (task_id, person_id, kind) VALUES (?1, ?2, ?3) RETURNING id",
                libsql::params![task_id, person_id, kind.code()],
            )
            .await?;
        let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;
        drop(rows);
        tracing::info!(id, task_id, person_id, kind = %kind, "added task claim");

        self.refresh_task_listing(task_id).await?;
        Ok(TaskClaim {
            id,
            task_id,
            person_id,
            kind: kind.code(),
        })
    }

    pub async fn list_task_claims(&self, task_id: i64) -> Result<Vec<TaskClaim>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM task_claims WHERE task_id = ?1 ORDER BY id"),
                [task_id],
            )
            .await?;

        let mut claims = Vec::new();
        while let Some(row) = rows.next().await? {
            claims.push(row_to_claim(&row)?);
        }
        Ok(claims)
    }

    /// The earliest claim on `task_id` whose kind is one of `kinds`.
    ///
    /// Returns `DatabaseError::NoResult` when there is none.
    pub async fn first_claim_of_kinds(
        &self,
        task_id: i64,
        kinds: &[ClaimKind],
    ) -> Result<TaskClaim, DatabaseError> {
        if kinds.is_empty() {
            return Err(DatabaseError::NoResult);
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM task_claims
             WHERE task_id = ?1 AND kind IN ({})
             ORDER BY id LIMIT 1",
            placeholders(2, kinds.len())
        );
        let params = std::iter::once(task_id).chain(kinds.iter().map(|k| k.code()));

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_claim(&row)
    }

    pub async fn count_claims_of_kind(
        &self,
        task_id: i64,
        kind: ClaimKind,
    ) -> Result<i64, DatabaseError> {
        self.db()
            .query_i64(
                "SELECT COUNT(*) FROM task_claims WHERE task_id = ?1 AND kind = ?2",
                libsql::params![task_id, kind.code()],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{seed_task, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn first_assigning_claim_wins() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Fix login").await;
        let grace = svc.create_person("grace", Some("Grace")).await.unwrap();
        let linus = svc.create_person("linus", None).await.unwrap();

        svc.add_claim(task.id, linus.id, ClaimKind::Failed).await.unwrap();
        svc.add_claim(task.id, grace.id, ClaimKind::Active).await.unwrap();
        svc.add_claim(task.id, linus.id, ClaimKind::Active).await.unwrap();

        let claim = svc
            .first_claim_of_kinds(task.id, &ClaimKind::ASSIGNING)
            .await
            .unwrap();
        assert_eq!(claim.person_id, grace.id);
        assert_eq!(svc.list_task_claims(task.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn no_matching_claim_is_no_result() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Fix login").await;
        let result = svc.first_claim_of_kinds(task.id, &ClaimKind::ASSIGNING).await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
        assert!(matches!(
            svc.first_claim_of_kinds(task.id, &[]).await,
            Err(DatabaseError::NoResult)
        ));
    }

    #[tokio::test]
    async fn counts_review_claims() {
        let svc = test_service().await;
        let task = seed_task(&svc, "Fix login").await;
        let grace = svc.create_person("grace", None).await.unwrap();
        assert_eq!(svc.count_claims_of_kind(task.id, ClaimKind::InReview).await.unwrap(), 0);

        svc.add_claim(task.id, grace.id, ClaimKind::InReview).await.unwrap();
        assert_eq!(svc.count_claims_of_kind(task.id, ClaimKind::InReview).await.unwrap(), 1);
    }
}
