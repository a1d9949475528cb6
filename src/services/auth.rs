use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::events::{AppEvent, EventBus};
use crate::models::{Role, User};
use crate::routing::{AdminSection, Route};
use crate::session::SessionStore;

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

pub struct AuthService {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    events: EventBus,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionStore>, events: EventBus) -> Self {
        AuthService {
            api,
            session,
            events,
        }
    }

    /// Logs in, stores the session triple and reports where to navigate:
    /// admins land on the dashboard, everyone else back home.
    pub async fn login(&self, email: &str, password: &str) -> Result<Route, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.api.post("/auth/login", &request).await?;
        self.session.begin(&response.token, &response.user);
        info!("Logged in as {}", response.user.email);
        Ok(post_login_route(response.user.role))
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Route, ApiError> {
        request
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        let response: AuthResponse = self.api.post("/auth/register", request).await?;
        self.session.begin(&response.token, &response.user);
        info!("Registered {}", response.user.email);
        Ok(post_login_route(response.user.role))
    }

    /// Clears the session and zeroes the nav badge; navigation lands on home.
    pub fn logout(&self) -> Route {
        self.session.clear();
        self.events.publish(AppEvent::CartUpdated { count: 0 });
        Route::Home
    }
}

fn post_login_route(role: Role) -> Route {
    match role {
        Role::Admin => Route::Admin(AdminSection::Index),
        Role::User => Route::Home,
    }
}
