use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::debug;

use crate::users::{
    repo_types::{default_roles, User},
    store::{Pending, PersistenceSession, StoreError, UserStore},
};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, User>,
    last_id: i64,
}

/// Process-local [`UserStore`]; ids start at 1 and are never reused.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn begin(&self) -> Result<Box<dyn PersistenceSession>, StoreError> {
        Ok(Box::new(InMemorySession {
            table: Arc::clone(&self.table),
            pending: Vec::new(),
        }))
    }
}

pub struct InMemorySession {
    table: Arc<RwLock<Table>>,
    pending: Vec<Pending>,
}

#[async_trait]
impl PersistenceSession for InMemorySession {
    fn stage(&mut self, user: User) {
        self.pending.push(Pending::Stage(user));
    }

    fn remove(&mut self, user: User) {
        self.pending.push(Pending::Remove(user));
    }

    async fn commit(&mut self) -> Result<Vec<User>, StoreError> {
        let pending = std::mem::take(&mut self.pending);
        let mut table = self.table.write().await;
        let mut persisted = Vec::new();

        for op in pending {
            match op {
                Pending::Stage(mut user) => {
                    match user.id {
                        None => {
                            table.last_id += 1;
                            let id = table.last_id;
                            user.id = Some(id);
                            user.roles = default_roles(user.roles);
                            user.created_at = Some(OffsetDateTime::now_utc());
                            table.rows.insert(id, user.clone());
                        }
                        // last write wins; a row removed meanwhile stays removed
                        Some(id) => {
                            if let Some(row) = table.rows.get_mut(&id) {
                                *row = user.clone();
                            }
                        }
                    }
                    persisted.push(user);
                }
                Pending::Remove(user) => {
                    if let Some(id) = user.id {
                        table.rows.remove(&id);
                    }
                }
            }
        }

        debug!(count = persisted.len(), "memory session committed");
        Ok(persisted)
    }
}
