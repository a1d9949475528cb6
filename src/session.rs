use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, error};

use crate::models::{Role, User};

pub const TOKEN_KEY: &str = "token";
pub const USER_ROLE_KEY: &str = "userRole";
pub const USER_KEY: &str = "user";

/// Process-wide session storage keyed by the backend's fixed entry names.
///
/// All mutation goes through `begin` (login/signup) and `clear` (logout or a
/// 401 observed by the API client); components only read.
#[derive(Default)]
pub struct SessionStore {
    entries: RwLock<HashMap<&'static str, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the token, role and JSON-encoded profile for a fresh login.
    pub fn begin(&self, token: &str, user: &User) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(TOKEN_KEY, token.to_string());
        entries.insert(USER_ROLE_KEY, user.role.as_str().to_string());
        match serde_json::to_string(user) {
            Ok(profile) => {
                entries.insert(USER_KEY, profile);
            }
            Err(err) => error!("Failed to encode user profile: {}", err),
        }
        debug!("Session started for role {}", user.role.as_str());
    }

    /// Removes all three entries.
    pub fn clear(&self) {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.remove(TOKEN_KEY);
        entries.remove(USER_ROLE_KEY);
        entries.remove(USER_KEY);
        debug!("Session cleared");
    }

    pub fn token(&self) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(TOKEN_KEY)
            .cloned()
    }

    pub fn role(&self) -> Option<Role> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(USER_ROLE_KEY)
            .and_then(|role| role.parse().ok())
    }

    pub fn user(&self) -> Option<User> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(USER_KEY)
            .and_then(|profile| serde_json::from_str(profile).ok())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: "u-1".to_string(),
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn begin_and_clear_manage_all_three_entries() {
        let store = SessionStore::new();
        store.begin("tok-1", &test_user());

        assert_eq!(store.token().as_deref(), Some("tok-1"));
        assert_eq!(store.role(), Some(Role::Admin));
        assert_eq!(store.user().map(|u| u.email), Some("asha@example.com".to_string()));

        store.clear();
        assert!(store.token().is_none());
        assert!(store.role().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn reads_and_writes_survive_a_poisoned_lock() {
        let store = SessionStore::new();
        store.begin("tok-1", &test_user());

        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.entries.write().unwrap();
            panic!("writer died");
        }));
        assert!(poisoned.is_err());

        assert_eq!(store.token().as_deref(), Some("tok-1"));
        store.clear();
        assert!(store.token().is_none());
    }
}
