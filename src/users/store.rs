use async_trait::async_trait;
use thiserror::Error;

use crate::users::repo_types::User;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Key-based lookup and enumeration of user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, ordered by id.
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Open a unit of work against this store.
    async fn begin(&self) -> Result<Box<dyn PersistenceSession>, StoreError>;
}

/// Stage-and-commit semantics for writes.
///
/// Nothing reaches the store until [`commit`](PersistenceSession::commit),
/// which applies staged operations in order and atomically. Staging a
/// transient user inserts it; staging a user with an id overwrites that row.
#[async_trait]
pub trait PersistenceSession: Send {
    fn stage(&mut self, user: User);

    fn remove(&mut self, user: User);

    /// Returns the staged (not removed) users as persisted, ids assigned.
    async fn commit(&mut self) -> Result<Vec<User>, StoreError>;
}

/// One pending write in a session.
#[derive(Debug, Clone)]
pub(crate) enum Pending {
    Stage(User),
    Remove(User),
}
