use std::sync::Arc;

use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Role, User};

/// Admin-only user management.
pub struct UserService {
    api: Arc<ApiClient>,
}

impl UserService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        UserService { api }
    }

    pub async fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        self.api.get("/users").await
    }

    pub async fn change_role(&self, user_id: &str, role: Role) -> Result<(), ApiError> {
        let _: Value = self
            .api
            .put(&format!("/users/{}", user_id), &json!({ "role": role }))
            .await?;
        Ok(())
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        let _: Value = self.api.delete(&format!("/users/{}", user_id)).await?;
        Ok(())
    }
}
