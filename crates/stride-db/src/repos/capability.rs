//! Capability repository: the per-product capability tree.

use stride_core::entities::Capability;
use stride_core::errors::CoreError;
use stride_core::inputs::CapabilityInput;

use crate::error::{DatabaseError, OptionalExt};
use crate::helpers::{get_opt_i64, get_opt_string};
use crate::service::StrideService;

const SELECT_COLS: &str = "id, parent_id, name, description, video_link";

fn row_to_capability(row: &libsql::Row) -> Result<Capability, DatabaseError> {
    Ok(Capability {
        id: row.get(0)?,
        parent_id: get_opt_i64(row, 1)?,
        name: row.get(2)?,
        description: get_opt_string(row, 3)?,
        video_link: get_opt_string(row, 4)?,
    })
}

impl StrideService {
    /// Create a capability.
    ///
    /// With `node_id` the capability becomes a child of that node. Otherwise it
    /// is placed under the product's tree: below the existing root, or as the
    /// new root when the product has none yet.
    pub async fn create_capability(
        &self,
        input: &CapabilityInput,
    ) -> Result<Capability, DatabaseError> {
        input.validate()?;

        let mut new_root_for = None;
        let parent_id = match (input.node_id, input.product_slug.as_deref()) {
            (Some(node_id), _) => {
                if self.get_capability(node_id).await.optional()?.is_none() {
                    return Err(CoreError::not_found("capability", node_id).into());
                }
                Some(node_id)
            }
            (None, Some(slug)) => {
                let product = self.get_product_by_slug(slug).await?;
                if product.capability_start_id.is_none() {
                    new_root_for = Some(product.id);
                }
                product.capability_start_id
            }
            (None, None) => {
                return Err(CoreError::Validation(
                    "CapabilityInput: either node_id or product_slug is required".into(),
                )
                .into());
            }
        };

        let tx = self.begin().await?;
        let result = self
            .insert_capability_rows(input, parent_id, new_root_for)
            .await;
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
        tracing::info!(id, ?parent_id, "created capability");

        Ok(Capability {
            id,
            parent_id,
            name: input.name.clone(),
            description: Some(input.description.clone()),
            video_link: input.video_link.clone(),
        })
    }

    async fn insert_capability_rows(
        &self,
        input: &CapabilityInput,
        parent_id: Option<i64>,
        new_root_for: Option<i64>,
    ) -> Result<i64, DatabaseError> {
        let conn = self.db().conn();
        let mut rows = conn
            .query(
                "INSERT INTO capabilities (parent_id, name, description, video_link)
                 VALUES (?1, ?2, ?3, ?4) RETURNING id",
                libsql::params![
                    parent_id,
                    input.name.as_str(),
                    input.description.as_str(),
                    input.video_link.as_deref()
                ],
            )
            .await?;
        let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;
        drop(rows);

        if let Some(product_id) = new_root_for {
            conn.execute(
                "UPDATE products SET capability_start_id = ?1 WHERE id = ?2",
                libsql::params![id, product_id],
            )
            .await?;
        }

        for attachment_id in input.attachments.iter().flatten() {
            conn.execute(
                "INSERT OR IGNORE INTO capability_attachments (capability_id, attachment_id)
                 VALUES (?1, ?2)",
                libsql::params![id, *attachment_id],
            )
            .await?;
        }
        Ok(id)
    }

    pub async fn get_capability(&self, id: i64) -> Result<Capability, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM capabilities WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_capability(&row)
    }

    pub async fn list_child_capabilities(
        &self,
        parent_id: i64,
    ) -> Result<Vec<Capability>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM capabilities WHERE parent_id = ?1 ORDER BY id"),
                [parent_id],
            )
            .await?;

        let mut capabilities = Vec::new();
        while let Some(row) = rows.next().await? {
            capabilities.push(row_to_capability(&row)?);
        }
        Ok(capabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{capability_input, product_input, test_service};

    #[tokio::test]
    async fn first_capability_becomes_product_root() {
        let svc = test_service().await;
        let product = svc.create_product(&product_input("Acme"), None).await.unwrap();

        let root = svc
            .create_capability(&capability_input(None, Some("acme"), "Platform"))
            .await
            .unwrap();
        assert!(root.is_root());

        let product = svc.get_product(product.id).await.unwrap();
        assert_eq!(product.capability_start_id, Some(root.id));

        let second = svc
            .create_capability(&capability_input(None, Some("acme"), "Billing"))
            .await
            .unwrap();
        assert_eq!(second.parent_id, Some(root.id));
    }

    #[tokio::test]
    async fn child_capability_under_node() {
        let svc = test_service().await;
        svc.create_product(&product_input("Acme"), None).await.unwrap();
        let root = svc
            .create_capability(&capability_input(None, Some("acme"), "Platform"))
            .await
            .unwrap();
        let child = svc
            .create_capability(&capability_input(Some(root.id), None, "Auth"))
            .await
            .unwrap();

        let children = svc.list_child_capabilities(root.id).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id, child.id);
    }

    #[tokio::test]
    async fn unknown_parent_is_not_found() {
        let svc = test_service().await;
        let err = svc
            .create_capability(&capability_input(Some(77), None, "Orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn capability_links_existing_attachments() {
        let svc = test_service().await;
        svc.create_product(&product_input("Acme"), None).await.unwrap();
        let attachment = svc
            .create_attachment(&stride_core::inputs::AttachmentInput {
                task_id: None,
                capability_id: None,
                name: Some("diagram".into()),
                path: "/files/diagram.svg".into(),
                file_type: Some("image/svg+xml".into()),
            })
            .await
            .unwrap();

        let mut input = capability_input(None, Some("acme"), "Platform");
        input.attachments = Some(vec![attachment.id]);
        let capability = svc.create_capability(&input).await.unwrap();

        let attachments = svc.list_capability_attachments(capability.id).await.unwrap();
        assert_eq!(attachments, vec![attachment]);
    }
}
