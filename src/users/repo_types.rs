use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Role every user holds when none were assigned.
pub const DEFAULT_ROLE: &str = "ROLE_USER";

/// User record in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// `None` until the first commit.
    pub id: Option<i64>,
    pub email: String,
    pub username: String,
    /// Argon2 hash; never plaintext once staged.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub roles: Vec<String>,
    #[serde(skip_serializing)]
    pub created_at: Option<OffsetDateTime>,
}

impl User {
    /// A transient user that has not been committed yet.
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            username: username.into(),
            password: None,
            roles: Vec::new(),
            created_at: None,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.id.is_none()
    }
}

/// Roles a store assigns on insert when the user carries none.
pub fn default_roles(roles: Vec<String>) -> Vec<String> {
    if roles.is_empty() {
        vec![DEFAULT_ROLE.to_string()]
    } else {
        roles
    }
}
