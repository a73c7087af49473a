//! Person repository.

use stride_core::entities::Person;
use stride_core::errors::CoreError;
use stride_core::inputs::slugify;

use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::service::StrideService;

pub(crate) const SELECT_COLS: &str = "id, username, first_name, slug";

pub(crate) fn row_to_person(row: &libsql::Row) -> Result<Person, DatabaseError> {
    Ok(Person {
        id: row.get(0)?,
        username: row.get(1)?,
        first_name: get_opt_string(row, 2)?,
        slug: row.get(3)?,
    })
}

impl StrideService {
    pub async fn create_person(
        &self,
        username: &str,
        first_name: Option<&str>,
    ) -> Result<Person, DatabaseError> {
        if username.trim().is_empty() {
            return Err(CoreError::Validation("person username is required".into()).into());
        }
        let slug = self.unique_person_slug(username).await?;
        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO persons (username, first_name, slug) VALUES (?1, ?2, ?3) RETURNING id",
                libsql::params![username, first_name, slug.as_str()],
            )
            .await?;
        let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;
        tracing::info!(id, username, "created person");

        Ok(Person {
            id,
            username: username.to_string(),
            first_name: first_name.map(String::from),
            slug,
        })
    }

    /// Slug of `username`, suffixed `-2`, `-3`, ... until no person holds it.
    /// Usernames with no ASCII letters or digits start from `person`.
    async fn unique_person_slug(&self, username: &str) -> Result<String, DatabaseError> {
        let mut base = slugify(username);
        if base.is_empty() {
            base = "person".to_string();
        }

        let mut candidate = base.clone();
        let mut n = 2;
        while self
            .db()
            .query_i64(
                "SELECT EXISTS(SELECT 1 FROM persons WHERE slug = ?1)",
                [candidate.as_str()],
            )
            .await?
            != 0
        {
            candidate = format!("{base}-{n}");
            n += 1;
        }
        Ok(candidate)
    }

    pub async fn get_person(&self, id: i64) -> Result<Person, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM persons WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_person(&row)
    }

    pub async fn get_person_by_username(&self, username: &str) -> Result<Person, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM persons WHERE username = ?1"),
                [username],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("person", username))?;
        row_to_person(&row)
    }
}
