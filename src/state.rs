use crate::config::{AppConfig, StoreBackend};
use crate::db;
use crate::users::{
    memory::InMemoryUserStore, password::Argon2PasswordHasher, repo::PgUserStore,
    services::UserResource, store::UserStore, validation::UserValidator,
};
use axum::extract::FromRef;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub users: UserResource,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn UserStore> = match (config.backend, &config.database) {
            (StoreBackend::Postgres, Some(database)) => {
                let pool = db::connect(database).await?;
                if database.run_migrations {
                    db::migrate(&pool).await?;
                }
                Arc::new(PgUserStore::new(pool))
            }
            (StoreBackend::Postgres, None) => {
                anyhow::bail!("postgres backend selected without database settings")
            }
            (StoreBackend::Memory, _) => {
                info!("using in-memory user store; data is lost on exit");
                Arc::new(InMemoryUserStore::new())
            }
        };

        Ok(Self::from_store(store))
    }

    /// Wire the default validator and hasher around `store`.
    pub fn from_store(store: Arc<dyn UserStore>) -> Self {
        Self::with_users(UserResource::new(
            store,
            Arc::new(UserValidator),
            Arc::new(Argon2PasswordHasher::default()),
        ))
    }

    pub fn with_users(users: UserResource) -> Self {
        Self { users }
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryUserStore::new()))
    }
}

impl FromRef<AppState> for UserResource {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}
