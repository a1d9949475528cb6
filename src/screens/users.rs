use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{Role, User};
use crate::services::users::UserService;

/// Admin user management. Writes update the local list in place, without a
/// refetch.
pub struct UsersScreen {
    service: Arc<UserService>,
    users: Vec<User>,
}

impl UsersScreen {
    pub fn new(service: Arc<UserService>) -> Self {
        UsersScreen {
            service,
            users: Vec::new(),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.users = self.service.fetch_users().await?;
        Ok(())
    }

    pub async fn change_role(&mut self, user_id: &str, role: Role) -> Result<(), ApiError> {
        self.service.change_role(user_id, role).await?;
        if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) {
            user.role = role;
        }
        Ok(())
    }

    pub async fn remove(&mut self, user_id: &str) -> Result<(), ApiError> {
        self.service.delete_user(user_id).await?;
        self.users.retain(|u| u.id != user_id);
        Ok(())
    }
}
