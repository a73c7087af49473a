//! Product repository: creation, lookups and task counts.

use chrono::Utc;

use stride_core::entities::Product;
use stride_core::enums::TaskStatus;
use stride_core::errors::CoreError;
use stride_core::inputs::ProductInput;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_i64, get_opt_string, parse_datetime};
use crate::service::StrideService;

pub(crate) const SELECT_COLS: &str = "id, name, slug, short_description, full_description, website, \
     video_url, is_private, owner_id, capability_start_id, created_at";

pub(crate) fn row_to_product(row: &libsql::Row) -> Result<Product, DatabaseError> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        short_description: row.get(3)?,
        full_description: get_opt_string(row, 4)?,
        website: row.get(5)?,
        video_url: get_opt_string(row, 6)?,
        is_private: get_bool(row, 7)?,
        owner_id: get_opt_i64(row, 8)?,
        capability_start_id: get_opt_i64(row, 9)?,
        created_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

impl StrideService {
    pub async fn create_product(
        &self,
        input: &ProductInput,
        owner_id: Option<i64>,
    ) -> Result<Product, DatabaseError> {
        input.validate()?;
        let now = Utc::now();
        let slug = input.effective_slug();

        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO products (name, slug, short_description, full_description, website, \
                 video_url, is_private, owner_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) RETURNING id",
                libsql::params![
                    input.name.as_str(),
                    slug.as_str(),
                    input.short_description.as_str(),
                    input.full_description.as_deref(),
                    input.website.as_str(),
                    input.video_url.as_deref(),
                    i64::from(input.is_private.unwrap_or(false)),
                    owner_id,
                    now.to_rfc3339()
                ],
            )
            .await?;
        let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;
        tracing::info!(id, slug = %slug, "created product");

        Ok(Product {
            id,
            name: input.name.clone(),
            slug,
            short_description: input.short_description.clone(),
            full_description: input.full_description.clone(),
            website: input.website.clone(),
            video_url: input.video_url.clone(),
            is_private: input.is_private.unwrap_or(false),
            owner_id,
            capability_start_id: None,
            created_at: now,
        })
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM products WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_product(&row)
    }

    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Product, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM products WHERE slug = ?1"), [slug])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("product", slug))?;
        row_to_product(&row)
    }

    pub async fn list_products(&self, limit: u32) -> Result<Vec<Product>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM products ORDER BY name LIMIT ?1"),
                [i64::from(limit)],
            )
            .await?;

        let mut products = Vec::new();
        while let Some(row) = rows.next().await? {
            products.push(row_to_product(&row)?);
        }
        Ok(products)
    }

    /// The product whose capability tree starts at `root_id`.
    pub async fn get_product_by_capability_start(
        &self,
        root_id: i64,
    ) -> Result<Product, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM products WHERE capability_start_id = ?1 \
                     ORDER BY id LIMIT 1"
                ),
                [root_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_product(&row)
    }

    /// Tasks under the product's initiatives with status `Available`.
    pub async fn count_available_product_tasks(&self, product_id: i64) -> Result<i64, DatabaseError> {
        self.db()
            .query_i64(
                "SELECT COUNT(*) FROM tasks t
                 JOIN initiatives i ON i.id = t.initiative_id
                 WHERE i.product_id = ?1 AND t.status = ?2",
                libsql::params![product_id, TaskStatus::Available.code()],
            )
            .await
    }

    /// Tasks reachable from the product through its capability tree or its
    /// initiatives, each counted once.
    pub async fn count_total_product_tasks(&self, product_id: i64) -> Result<i64, DatabaseError> {
        self.db()
            .query_i64(
                "WITH RECURSIVE tree(id) AS (
                     SELECT capability_start_id FROM products
                     WHERE id = ?1 AND capability_start_id IS NOT NULL
                     UNION
                     SELECT c.id FROM capabilities c JOIN tree ON c.parent_id = tree.id
                 )
                 SELECT COUNT(*) FROM tasks
                 WHERE capability_id IN (SELECT id FROM tree)
                    OR initiative_id IN (SELECT id FROM initiatives WHERE product_id = ?1)",
                [product_id],
            )
            .await
    }
}
