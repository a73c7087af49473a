//! Task listing rows: denormalised snapshots used by listing views.
//!
//! A listing row is rewritten from the task and its related records whenever
//! the task, its claims, or its status change. The `*_data` columns carry
//! JSON snapshots shaped for direct projection:
//!
//! - `initiative_data`: `{ id, name, status, description, video_url }`
//! - `product_data`: `{ name, slug, owner, website, detail_url, video_url }`
//! - `assigned_to_data`: `{ slug, first_name }`
//! - `reviewer_data`: `{ username, first_name }`

use serde_json::json;

use stride_core::entities::TaskListing;
use stride_core::enums::ClaimKind;

use crate::error::{DatabaseError, OptionalExt};
use crate::helpers::{get_bool, get_opt_string, parse_optional_json, parse_string_list, to_json_text};
use crate::service::StrideService;

const SELECT_COLS: &str = "l.id, l.task_id, l.title, l.short_description, l.description, l.status, \
     l.priority, l.in_review, l.tags, l.initiative_data, l.product_data, l.assigned_to_data, \
     l.reviewer_data, l.video_url";

fn row_to_listing(row: &libsql::Row) -> Result<TaskListing, DatabaseError> {
    Ok(TaskListing {
        id: row.get(0)?,
        task_id: row.get(1)?,
        title: row.get(2)?,
        short_description: get_opt_string(row, 3)?,
        description: get_opt_string(row, 4)?,
        status: row.get(5)?,
        priority: row.get(6)?,
        in_review: get_bool(row, 7)?,
        tags: parse_string_list(&row.get::<String>(8)?)?,
        initiative_data: parse_optional_json(get_opt_string(row, 9)?.as_deref())?,
        product_data: parse_optional_json(get_opt_string(row, 10)?.as_deref())?,
        assigned_to_data: parse_optional_json(get_opt_string(row, 11)?.as_deref())?,
        reviewer_data: parse_optional_json(get_opt_string(row, 12)?.as_deref())?,
        video_url: get_opt_string(row, 13)?,
    })
}

fn optional_json_text(value: Option<&serde_json::Value>) -> Result<Option<String>, DatabaseError> {
    value.map(to_json_text).transpose()
}

impl StrideService {
    /// Rebuild the listing row of `task_id` from current records.
    pub async fn refresh_task_listing(&self, task_id: i64) -> Result<TaskListing, DatabaseError> {
        let task = self.get_task(task_id).await?;

        let tags: Vec<String> = self
            .list_task_tags(task_id)
            .await?
            .into_iter()
            .map(|tag| tag.name)
            .collect();

        let initiative_data = match task.initiative_id {
            Some(id) => self.get_initiative(id).await.optional()?.map(|i| {
                json!({
                    "id": i.id,
                    "name": i.name,
                    "status": i.status,
                    "description": i.description,
                    "video_url": i.video_url,
                })
            }),
            None => None,
        };

        let product_data = match self.get_product_task(task_id).await.optional()? {
            Some(link) => {
                let product = self.get_product(link.product_id).await?;
                let owner = match product.owner_id {
                    Some(owner_id) => self
                        .get_person(owner_id)
                        .await
                        .optional()?
                        .map(|p| p.username),
                    None => None,
                };
                let owner_segment = owner.as_deref().unwrap_or(&product.slug);
                Some(json!({
                    "name": product.name,
                    "slug": product.slug,
                    "owner": owner,
                    "website": product.website,
                    "detail_url": format!("/{owner_segment}/{}", product.slug),
                    "video_url": product.video_url,
                }))
            }
            None => None,
        };

        let assigned_to_data = match self
            .first_claim_of_kinds(task_id, &ClaimKind::ASSIGNING)
            .await
            .optional()?
        {
            Some(claim) => self
                .get_person(claim.person_id)
                .await
                .optional()?
                .map(|p| json!({ "slug": p.slug, "first_name": p.first_name })),
            None => None,
        };

        let reviewer_data = match task.reviewer_id {
            Some(id) => self
                .get_person(id)
                .await
                .optional()?
                .map(|p| json!({ "username": p.username, "first_name": p.first_name })),
            None => None,
        };

        let in_review = self.count_claims_of_kind(task_id, ClaimKind::InReview).await? > 0;

        self.db()
            .conn()
            .execute(
                "INSERT INTO task_listings (task_id, title, short_description, description, status, \
                 priority, in_review, tags, initiative_data, product_data, assigned_to_data, \
                 reviewer_data, video_url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
                 ON CONFLICT (task_id) DO UPDATE SET
                     title = excluded.title,
                     short_description = excluded.short_description,
                     description = excluded.description,
                     status = excluded.status,
                     priority = excluded.priority,
                     in_review = excluded.in_review,
                     tags = excluded.tags,
                     initiative_data = excluded.initiative_data,
                     product_data = excluded.product_data,
                     assigned_to_data = excluded.assigned_to_data,
                     reviewer_data = excluded.reviewer_data,
                     video_url = excluded.video_url",
                libsql::params![
                    task_id,
                    task.title.as_str(),
                    task.short_description.as_deref(),
                    task.description.as_str(),
                    task.status,
                    task.priority,
                    i64::from(in_review),
                    to_json_text(&tags)?,
                    optional_json_text(initiative_data.as_ref())?,
                    optional_json_text(product_data.as_ref())?,
                    optional_json_text(assigned_to_data.as_ref())?,
                    optional_json_text(reviewer_data.as_ref())?,
                    task.video_url.as_deref()
                ],
            )
            .await?;
        tracing::debug!(task_id, "refreshed task listing");

        self.get_listing_for_task(task_id).await
    }

    pub async fn get_task_listing(&self, id: i64) -> Result<TaskListing, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM task_listings l WHERE l.id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_listing(&row)
    }

    pub async fn get_listing_for_task(&self, task_id: i64) -> Result<TaskListing, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM task_listings l WHERE l.task_id = ?1"),
                [task_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_listing(&row)
    }

    pub async fn list_initiative_listings(
        &self,
        initiative_id: i64,
    ) -> Result<Vec<TaskListing>, DatabaseError> {
        self.query_listings(
            &format!(
                "SELECT {SELECT_COLS} FROM task_listings l
                 JOIN tasks t ON t.id = l.task_id
                 WHERE t.initiative_id = ?1
                 ORDER BY l.task_id"
            ),
            initiative_id,
        )
        .await
    }

    pub async fn list_capability_listings(
        &self,
        capability_id: i64,
    ) -> Result<Vec<TaskListing>, DatabaseError> {
        self.query_listings(
            &format!(
                "SELECT {SELECT_COLS} FROM task_listings l
                 JOIN tasks t ON t.id = l.task_id
                 WHERE t.capability_id = ?1
                 ORDER BY l.task_id"
            ),
            capability_id,
        )
        .await
    }

    async fn query_listings(&self, sql: &str, id: i64) -> Result<Vec<TaskListing>, DatabaseError> {
        let mut rows = self.db().conn().query(sql, [id]).await?;

        let mut listings = Vec::new();
        while let Some(row) = rows.next().await? {
            listings.push(row_to_listing(&row)?);
        }
        Ok(listings)
    }
}
