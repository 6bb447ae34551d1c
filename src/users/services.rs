use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::users::{
    dto::{CreateUserRequest, UpdateUserRequest, UserDetails, UserSummary},
    error::UserError,
    password::PasswordHasher,
    repo_types::User,
    store::UserStore,
    validation::Validator,
};

/// The five user operations over injected collaborators.
///
/// Holds no state of its own; cloning shares the collaborators.
#[derive(Clone)]
pub struct UserResource {
    store: Arc<dyn UserStore>,
    validator: Arc<dyn Validator>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserResource {
    pub fn new(
        store: Arc<dyn UserStore>,
        validator: Arc<dyn Validator>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            store,
            validator,
            hasher,
        }
    }

    pub async fn list_users(&self) -> Result<Vec<UserSummary>, UserError> {
        let users = self.store.find_all().await?;
        debug!(count = users.len(), "listed users");
        Ok(users.iter().map(UserSummary::from).collect())
    }

    pub async fn get_user(&self, id: i64) -> Result<UserSummary, UserError> {
        let user = self.find(id).await?;
        Ok(UserSummary::from(&user))
    }

    pub async fn create_user(&self, body: &[u8]) -> Result<UserDetails, UserError> {
        let mut req: CreateUserRequest = parse_object(body)?;

        let username = req.label().unwrap_or_default();
        let mut user = User::new(req.email.unwrap_or_default(), username);
        user.password = req.password;

        let errors = self.validator.validate(&user);
        if !errors.is_empty() {
            warn!(?errors, "user rejected by validation");
            return Err(UserError::ValidationFailed(errors));
        }

        if let Some(plain) = user.password.take() {
            user.password = Some(self.hasher.hash(&plain, &user)?);
        }

        let mut session = self.store.begin().await?;
        session.stage(user);
        let created = session
            .commit()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("commit returned no user"))?;

        info!(user_id = ?created.id, email = %created.email, "user created");
        Ok(UserDetails::from(&created))
    }

    pub async fn update_user(&self, id: i64, body: &[u8]) -> Result<UserDetails, UserError> {
        let mut user = self.find(id).await?;
        let req: UpdateUserRequest = parse_object(body)?;
        req.apply(&mut user);

        let mut session = self.store.begin().await?;
        session.stage(user.clone());
        let updated = session.commit().await?.into_iter().next().unwrap_or(user);

        info!(user_id = id, "user updated");
        Ok(UserDetails::from(&updated))
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), UserError> {
        let user = self.find(id).await?;

        let mut session = self.store.begin().await?;
        session.remove(user);
        session.commit().await?;

        info!(user_id = id, "user deleted");
        Ok(())
    }

    async fn find(&self, id: i64) -> Result<User, UserError> {
        match self.store.find_by_id(id).await? {
            Some(user) => Ok(user),
            None => {
                warn!(user_id = id, "user not found");
                Err(UserError::NotFound)
            }
        }
    }
}

/// Decode a request body that must be a non-empty JSON object.
fn parse_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, UserError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "request body is not JSON");
        UserError::InvalidInput
    })?;

    match &value {
        Value::Object(map) if !map.is_empty() => {}
        _ => {
            warn!("request body is not a non-empty object");
            return Err(UserError::InvalidInput);
        }
    }

    serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "request body has mistyped fields");
        UserError::InvalidInput
    })
}
