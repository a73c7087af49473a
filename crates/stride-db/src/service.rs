//! Service layer wrapping the database handle.
//!
//! All repo methods are implemented as `impl StrideService` blocks in
//! `repos/*`. Multi-row writes run inside a transaction on the same
//! connection, so a failed step leaves nothing behind.

use crate::StrideDb;
use crate::error::DatabaseError;

pub struct StrideService {
    db: StrideDb,
}

impl StrideService {
    /// Open a service over a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = StrideDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &StrideDb {
        &self.db
    }

    /// Begin a write transaction on the service connection.
    ///
    /// Dropping the returned transaction without committing rolls it back.
    pub(crate) async fn begin(&self) -> Result<libsql::Transaction, DatabaseError> {
        Ok(self.db.conn().transaction().await?)
    }
}
