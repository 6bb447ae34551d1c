use serde::{Deserialize, Serialize};

use crate::users::repo_types::User;

/// Condensed projection used by list and get.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
        }
    }
}

/// Full projection returned after a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    pub id: Option<i64>,
    pub email: String,
    pub username: String,
    pub roles: Vec<String>,
}

impl From<&User> for UserDetails {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            email: u.email.clone(),
            username: u.username.clone(),
            roles: u.roles.clone(),
        }
    }
}

/// `{ "message": ..., "user": {...} }` envelope for create and update.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub message: String,
    pub user: UserDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Request body for POST /users. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    /// Older clients send the label as `name`; `username` wins when both are set.
    pub name: Option<String>,
    pub password: Option<String>,
}

impl CreateUserRequest {
    pub fn label(&mut self) -> Option<String> {
        self.username.take().or_else(|| self.name.take())
    }
}

/// Request body for PUT /users/{id}; absent or null keys leave the field as is.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub roles: Option<Vec<String>>,
}

impl UpdateUserRequest {
    pub fn apply(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(username) = self.username.or(self.name) {
            user.username = username;
        }
        if let Some(roles) = self.roles {
            user.roles = roles;
        }
    }
}
