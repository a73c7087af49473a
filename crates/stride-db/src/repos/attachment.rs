//! Attachment repository.

use stride_core::entities::Attachment;
use stride_core::errors::CoreError;
use stride_core::inputs::AttachmentInput;

use crate::error::{DatabaseError, OptionalExt};
use crate::helpers::get_opt_string;
use crate::service::StrideService;

const SELECT_COLS: &str = "a.id, a.name, a.path, a.file_type";

fn row_to_attachment(row: &libsql::Row) -> Result<Attachment, DatabaseError> {
    Ok(Attachment {
        id: row.get(0)?,
        name: get_opt_string(row, 1)?,
        path: row.get(2)?,
        file_type: get_opt_string(row, 3)?,
    })
}

impl StrideService {
    /// Store an attachment and link it to the task and/or capability given.
    pub async fn create_attachment(
        &self,
        input: &AttachmentInput,
    ) -> Result<Attachment, DatabaseError> {
        input.validate()?;
        if let Some(task_id) = input.task_id {
            if self.get_task(task_id).await.optional()?.is_none() {
                return Err(CoreError::not_found("task", task_id).into());
            }
        }
        if let Some(capability_id) = input.capability_id {
            if self.get_capability(capability_id).await.optional()?.is_none() {
                return Err(CoreError::not_found("capability", capability_id).into());
            }
        }

        let tx = self.begin().await?;
        let id = match self.insert_attachment_rows(input).await {
            Ok(id) => {
                tx.commit().await?;
                id
            }
            Err(error) => {
                tx.rollback().await?;
                return Err(error);
            }
        };
        tracing::info!(id, path = %input.path, "created attachment");

        Ok(Attachment {
            id,
            name: input.name.clone(),
            path: input.path.clone(),
            file_type: input.file_type.clone(),
        })
    }

    async fn insert_attachment_rows(&self, input: &AttachmentInput) -> Result<i64, DatabaseError> {
        let conn = self.db().conn();
        let mut rows = conn
            .query(
                "INSERT INTO attachments (name, path, file_type) VALUES (?1, ?2, ?3) RETURNING id",
                libsql::params![
                    input.name.as_deref(),
                    input.path.as_str(),
                    input.file_type.as_deref()
                ],
            )
            .await?;
        let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;
        drop(rows);

        if let Some(task_id) = input.task_id {
            conn.execute(
                "INSERT INTO task_attachments (task_id, attachment_id) VALUES (?1, ?2)",
                libsql::params![task_id, id],
            )
            .await?;
        }
        if let Some(capability_id) = input.capability_id {
            conn.execute(
                "INSERT INTO capability_attachments (capability_id, attachment_id) VALUES (?1, ?2)",
                libsql::params![capability_id, id],
            )
            .await?;
        }
        Ok(id)
    }

    pub async fn list_capability_attachments(
        &self,
        capability_id: i64,
    ) -> Result<Vec<Attachment>, DatabaseError> {
        self.query_attachments(
            "JOIN capability_attachments ca ON ca.attachment_id = a.id WHERE ca.capability_id = ?1",
            capability_id,
        )
        .await
    }

    pub async fn list_task_attachments(
        &self,
        task_id: i64,
    ) -> Result<Vec<Attachment>, DatabaseError> {
        self.query_attachments(
            "JOIN task_attachments ta ON ta.attachment_id = a.id WHERE ta.task_id = ?1",
            task_id,
        )
        .await
    }

    async fn query_attachments(
        &self,
        join_clause: &str,
        owner_id: i64,
    ) -> Result<Vec<Attachment>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM attachments a {join_clause} ORDER BY a.id"),
                [owner_id],
            )
            .await?;

        let mut attachments = Vec::new();
        while let Some(row) = rows.next().await? {
            attachments.push(row_to_attachment(&row)?);
        }
        Ok(attachments)
    }
}
