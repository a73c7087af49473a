//! # stride-db
//!
//! libSQL store for Stride: products, capabilities, initiatives, tasks,
//! claims, dependencies, memberships, attachments, code repositories, and
//! the denormalised task listing rows.
//!
//! Repository methods live on [`service::StrideService`] in `repos/*`, one
//! module per aggregate. Reads return `DatabaseError::NoResult` when a row is
//! missing; callers that want "absent means `None`" use
//! [`error::OptionalExt::optional`].

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all Stride state.
pub struct StrideDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl StrideDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let stride_db = Self { db, conn };
        stride_db.run_migrations().await?;
        tracing::debug!(path, "opened stride database");
        Ok(stride_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Run a single-column `COUNT`/`EXISTS` style query and return the integer.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn query_i64(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<i64, DatabaseError> {
        let mut rows = self.conn.query(sql, params).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> StrideDb {
        StrideDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "persons",
            "capabilities",
            "products",
            "initiatives",
            "task_categories",
            "expertise",
            "tags",
            "attachments",
            "tasks",
            "task_tags",
            "task_expertise",
            "task_attachments",
            "capability_attachments",
            "task_claims",
            "task_depends",
            "product_tasks",
            "product_persons",
            "code_repositories",
            "task_listings",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO task_claims (task_id, person_id, kind) VALUES (999, 999, 1)",
                (),
            )
            .await;
        assert!(result.is_err(), "claim on a missing task should be rejected");
    }

    #[tokio::test]
    async fn product_person_unique_per_product() {
        let db = test_db().await;
        db.conn()
            .execute_batch(
                "INSERT INTO persons (id, username, slug) VALUES (1, 'ada', 'ada');
                 INSERT INTO products (id, name, slug, short_description, website)
                     VALUES (1, 'Acme', 'acme', 'Widgets', 'https://acme.example');
                 INSERT INTO product_persons (product_id, person_id, person_right) VALUES (1, 1, 1);",
            )
            .await
            .unwrap();

        let result = db
            .conn()
            .execute(
                "INSERT INTO product_persons (product_id, person_id, person_right) VALUES (1, 1, 4)",
                (),
            )
            .await;
        assert!(result.is_err(), "duplicate membership should be rejected");
    }

    #[tokio::test]
    async fn query_i64_counts() {
        let db = test_db().await;
        let count = db.query_i64("SELECT COUNT(*) FROM tasks", ()).await.unwrap();
        assert_eq!(count, 0);
    }
}
