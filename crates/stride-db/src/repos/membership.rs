//! Product membership: which product a task is published under, and the
//! rights people hold on products.

use stride_core::entities::{ProductPerson, ProductTask};
use stride_core::enums::ProductRight;

use crate::error::DatabaseError;
use crate::helpers::placeholders;
use crate::service::StrideService;

impl StrideService {
    /// The product link of a task. `DatabaseError::NoResult` when unpublished.
    pub async fn get_product_task(&self, task_id: i64) -> Result<ProductTask, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, product_id, task_id FROM product_tasks WHERE task_id = ?1",
                [task_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(ProductTask {
            id: row.get(0)?,
            product_id: row.get(1)?,
            task_id: row.get(2)?,
        })
    }

    /// Grant `person_id` a right on `product_id`, replacing any earlier one.
    pub async fn add_product_person(
        &self,
        product_id: i64,
        person_id: i64,
        right: ProductRight,
    ) -> Result<ProductPerson, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO product_persons (product_id, person_id, person_right)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (product_id, person_id) DO UPDATE SET person_right = excluded.person_right
                 RETURNING id",
                libsql::params![product_id, person_id, right.code()],
            )
            .await?;

        let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;
        tracing::info!(product_id, person_id, right = %right, "granted product right");

        Ok(ProductPerson {
            id,
            product_id,
            person_id,
            right: right.code(),
        })
    }

    pub async fn list_product_persons(
        &self,
        product_id: i64,
    ) -> Result<Vec<ProductPerson>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, product_id, person_id, person_right FROM product_persons
                 WHERE product_id = ?1 ORDER BY id",
                [product_id],
            )
            .await?;

        let mut members = Vec::new();
        while let Some(row) = rows.next().await? {
            members.push(ProductPerson {
                id: row.get(0)?,
                product_id: row.get(1)?,
                person_id: row.get(2)?,
                right: row.get(3)?,
            });
        }
        Ok(members)
    }

    /// Whether `person_id` holds one of `rights` on `product_id`.
    pub async fn has_product_right(
        &self,
        product_id: i64,
        person_id: i64,
        rights: &[ProductRight],
    ) -> Result<bool, DatabaseError> {
        if rights.is_empty() {
            return Ok(false);
        }
        let sql = format!(
            "SELECT EXISTS (
                 SELECT 1 FROM product_persons
                 WHERE product_id = ?1 AND person_id = ?2 AND person_right IN ({})
             )",
            placeholders(3, rights.len())
        );
        let params = [product_id, person_id]
            .into_iter()
            .chain(rights.iter().map(|r| r.code()));
        let found = self
            .db()
            .query_i64(&sql, libsql::params_from_iter(params))
            .await?;
        Ok(found != 0)
    }
}
