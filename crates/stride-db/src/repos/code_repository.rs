//! Code repositories connected to products.

use stride_core::entities::CodeRepository;
use stride_core::inputs::CodeRepositoryInput;

use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::service::StrideService;

impl StrideService {
    pub async fn create_code_repository(
        &self,
        input: &CodeRepositoryInput,
    ) -> Result<CodeRepository, DatabaseError> {
        input.validate()?;
        let product = self.get_product_by_slug(&input.product_slug).await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO code_repositories (product_id, repository, access_token)
                 VALUES (?1, ?2, ?3) RETURNING id",
                libsql::params![
                    product.id,
                    input.repository.as_deref(),
                    input.access_token.as_str()
                ],
            )
            .await?;
        let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;
        tracing::info!(id, product_id = product.id, "connected code repository");

        Ok(CodeRepository {
            id,
            product_id: product.id,
            repository: input.repository.clone(),
            access_token: input.access_token.clone(),
        })
    }

    pub async fn list_product_repositories(
        &self,
        product_id: i64,
    ) -> Result<Vec<CodeRepository>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id, product_id, repository, access_token FROM code_repositories
                 WHERE product_id = ?1 ORDER BY id",
                [product_id],
            )
            .await?;

        let mut repositories = Vec::new();
        while let Some(row) = rows.next().await? {
            repositories.push(CodeRepository {
                id: row.get(0)?,
                product_id: row.get(1)?,
                repository: get_opt_string(&row, 2)?,
                access_token: row.get(3)?,
            });
        }
        Ok(repositories)
    }
}
