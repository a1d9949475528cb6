use std::sync::Arc;

use tracing::debug;

use crate::events::{AppEvent, EventBus};
use crate::models::Role;
use crate::session::SessionStore;

/// Admin dashboard child sections, rendered inside the sidebar shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSection {
    Index,
    Categories,
    Products,
    Orders,
    Users,
    Testimonials,
}

impl AdminSection {
    fn parse(segment: &str) -> Option<AdminSection> {
        match segment {
            "" => Some(AdminSection::Index),
            "CategoriesManagement" => Some(AdminSection::Categories),
            "ProductsManagement" => Some(AdminSection::Products),
            "OrdersManagement" => Some(AdminSection::Orders),
            "UsersManagement" => Some(AdminSection::Users),
            "TestimonialsManagement" => Some(AdminSection::Testimonials),
            _ => None,
        }
    }

    fn segment(&self) -> &'static str {
        match self {
            AdminSection::Index => "",
            AdminSection::Categories => "CategoriesManagement",
            AdminSection::Products => "ProductsManagement",
            AdminSection::Orders => "OrdersManagement",
            AdminSection::Users => "UsersManagement",
            AdminSection::Testimonials => "TestimonialsManagement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Shop,
    Cart,
    Checkout,
    Orders,
    Interiors,
    Admin(AdminSection),
    TestApi,
    NotFound,
}

const ADMIN_PREFIX: &str = "/admin/AdminDashboard";

impl Route {
    pub fn parse(path: &str) -> Route {
        let path = path.trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };

        if let Some(rest) = path.strip_prefix(ADMIN_PREFIX) {
            let segment = rest.trim_start_matches('/');
            return match AdminSection::parse(segment) {
                Some(section) => Route::Admin(section),
                None => Route::NotFound,
            };
        }

        match path {
            "/" => Route::Home,
            "/shop" => Route::Shop,
            "/cart" => Route::Cart,
            "/checkout" => Route::Checkout,
            "/orders" => Route::Orders,
            "/interiors" => Route::Interiors,
            "/test-api" => Route::TestApi,
            _ => Route::NotFound,
        }
    }

    pub fn as_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Shop => "/shop".to_string(),
            Route::Cart => "/cart".to_string(),
            Route::Checkout => "/checkout".to_string(),
            Route::Orders => "/orders".to_string(),
            Route::Interiors => "/interiors".to_string(),
            Route::Admin(AdminSection::Index) => ADMIN_PREFIX.to_string(),
            Route::Admin(section) => format!("{}/{}", ADMIN_PREFIX, section.segment()),
            Route::TestApi => "/test-api".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectHome,
}

/// The three route-gate variants. Two of them broadcast `Unauthorized` so the
/// nav shell reopens the login prompt; the required-role variant denies
/// silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGuard {
    /// Deny without a token; broadcasts on denial.
    RequireToken,
    /// Deny without a token or when the role differs; always silent.
    RequireRole(Role),
    /// Deny without a token (broadcast) or when the role is not the allowed
    /// one (silent).
    AllowRole(Role),
}

impl RouteGuard {
    pub fn check(&self, session: &SessionStore, events: &EventBus) -> GuardDecision {
        match self {
            RouteGuard::RequireToken => {
                if session.is_authenticated() {
                    GuardDecision::Allow
                } else {
                    events.publish(AppEvent::Unauthorized);
                    GuardDecision::RedirectHome
                }
            }
            RouteGuard::RequireRole(role) => {
                if !session.is_authenticated() {
                    return GuardDecision::RedirectHome;
                }
                if session.role() == Some(*role) {
                    GuardDecision::Allow
                } else {
                    GuardDecision::RedirectHome
                }
            }
            RouteGuard::AllowRole(role) => {
                if !session.is_authenticated() {
                    events.publish(AppEvent::Unauthorized);
                    return GuardDecision::RedirectHome;
                }
                if session.role() == Some(*role) {
                    GuardDecision::Allow
                } else {
                    GuardDecision::RedirectHome
                }
            }
        }
    }
}

/// Maps paths to routes and applies the admin gate; denied navigation lands
/// back on home.
pub struct Router {
    session: Arc<SessionStore>,
    events: EventBus,
}

impl Router {
    pub fn new(session: Arc<SessionStore>, events: EventBus) -> Self {
        Router { session, events }
    }

    pub fn navigate(&self, path: &str) -> Route {
        let route = Route::parse(path);
        let Some(guard) = Self::guard_for(&route) else {
            return route;
        };
        match guard.check(&self.session, &self.events) {
            GuardDecision::Allow => route,
            GuardDecision::RedirectHome => {
                debug!("Navigation to {} denied", path);
                Route::Home
            }
        }
    }

    fn guard_for(route: &Route) -> Option<RouteGuard> {
        match route {
            Route::Admin(_) => Some(RouteGuard::AllowRole(Role::Admin)),
            _ => None,
        }
    }
}

/// Navbar state: the login/signup modal flags and the live cart badge.
#[derive(Debug, Default)]
pub struct NavShell {
    login_open: bool,
    signup_open: bool,
    badge: u32,
}

impl NavShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login_open(&self) -> bool {
        self.login_open
    }

    pub fn signup_open(&self) -> bool {
        self.signup_open
    }

    pub fn badge(&self) -> u32 {
        self.badge
    }

    pub fn open_login(&mut self) {
        self.login_open = true;
        self.signup_open = false;
    }

    pub fn open_signup(&mut self) {
        self.signup_open = true;
        self.login_open = false;
    }

    pub fn close_modals(&mut self) {
        self.login_open = false;
        self.signup_open = false;
    }

    pub fn apply_event(&mut self, event: &AppEvent) {
        match event {
            AppEvent::CartUpdated { count } => self.badge = *count,
            AppEvent::Unauthorized => {
                self.badge = 0;
                self.open_login();
            }
        }
    }
}
