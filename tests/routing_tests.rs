mod common;

use serde_json::json;

use furnistore_client::error::ApiError;
use furnistore_client::events::AppEvent;
use furnistore_client::models::Role;
use furnistore_client::routing::{
    AdminSection, GuardDecision, NavShell, Route, RouteGuard, Router,
};
use furnistore_client::services::auth::{AuthService, RegisterRequest};

use common::{drain_events, harness, login_as, Harness};

fn auth(h: &Harness) -> AuthService {
    AuthService::new(h.api.clone(), h.session.clone(), h.events.clone())
}

#[test]
fn paths_parse_to_routes_and_back() {
    assert_eq!(Route::parse("/"), Route::Home);
    assert_eq!(Route::parse(""), Route::Home);
    assert_eq!(Route::parse("/shop"), Route::Shop);
    assert_eq!(Route::parse("/cart/"), Route::Cart);
    assert_eq!(Route::parse("/checkout"), Route::Checkout);
    assert_eq!(Route::parse("/orders"), Route::Orders);
    assert_eq!(Route::parse("/interiors"), Route::Interiors);
    assert_eq!(Route::parse("/test-api"), Route::TestApi);
    assert_eq!(Route::parse("/no-such-page"), Route::NotFound);

    for route in [
        Route::Home,
        Route::Shop,
        Route::Cart,
        Route::Checkout,
        Route::Orders,
        Route::Interiors,
        Route::TestApi,
    ] {
        assert_eq!(Route::parse(&route.as_path()), route);
    }
}

#[test]
fn admin_paths_parse_to_their_sections() {
    assert_eq!(
        Route::parse("/admin/AdminDashboard"),
        Route::Admin(AdminSection::Index)
    );
    assert_eq!(
        Route::parse("/admin/AdminDashboard/"),
        Route::Admin(AdminSection::Index)
    );
    assert_eq!(
        Route::parse("/admin/AdminDashboard/CategoriesManagement"),
        Route::Admin(AdminSection::Categories)
    );
    assert_eq!(
        Route::parse("/admin/AdminDashboard/OrdersManagement"),
        Route::Admin(AdminSection::Orders)
    );
    assert_eq!(
        Route::parse("/admin/AdminDashboard/NoSuchSection"),
        Route::NotFound
    );

    let section = Route::Admin(AdminSection::Users);
    assert_eq!(Route::parse(&section.as_path()), section);
}

#[test]
fn require_token_guard_broadcasts_on_denial() {
    let h = harness();
    let mut rx = h.events.subscribe();

    assert_eq!(
        RouteGuard::RequireToken.check(&h.session, &h.events),
        GuardDecision::RedirectHome
    );
    assert_eq!(drain_events(&mut rx), vec![AppEvent::Unauthorized]);

    login_as(&h.session, Role::User);
    assert_eq!(
        RouteGuard::RequireToken.check(&h.session, &h.events),
        GuardDecision::Allow
    );
    assert!(drain_events(&mut rx).is_empty());
}

#[test]
fn require_role_guard_denies_silently() {
    let h = harness();
    let mut rx = h.events.subscribe();
    let guard = RouteGuard::RequireRole(Role::Admin);

    assert_eq!(guard.check(&h.session, &h.events), GuardDecision::RedirectHome);

    login_as(&h.session, Role::User);
    assert_eq!(guard.check(&h.session, &h.events), GuardDecision::RedirectHome);
    assert!(drain_events(&mut rx).is_empty());

    h.session.clear();
    login_as(&h.session, Role::User);
    assert_eq!(
        RouteGuard::RequireRole(Role::User).check(&h.session, &h.events),
        GuardDecision::Allow
    );
}

#[test]
fn allow_role_guard_broadcasts_only_when_the_token_is_missing() {
    let h = harness();
    let mut rx = h.events.subscribe();
    let guard = RouteGuard::AllowRole(Role::Admin);

    assert_eq!(guard.check(&h.session, &h.events), GuardDecision::RedirectHome);
    assert_eq!(drain_events(&mut rx), vec![AppEvent::Unauthorized]);

    // Logged in with the wrong role: denied, but no broadcast.
    login_as(&h.session, Role::User);
    assert_eq!(guard.check(&h.session, &h.events), GuardDecision::RedirectHome);
    assert!(drain_events(&mut rx).is_empty());
}

#[test]
fn router_gates_the_admin_tree() {
    let h = harness();
    let router = Router::new(h.session.clone(), h.events.clone());

    assert_eq!(router.navigate("/shop"), Route::Shop);
    assert_eq!(
        router.navigate("/admin/AdminDashboard/UsersManagement"),
        Route::Home
    );

    login_as(&h.session, Role::User);
    assert_eq!(router.navigate("/admin/AdminDashboard"), Route::Home);

    h.session.clear();
    login_as(&h.session, Role::Admin);
    assert_eq!(
        router.navigate("/admin/AdminDashboard/UsersManagement"),
        Route::Admin(AdminSection::Users)
    );
}

#[test]
fn nav_shell_reacts_to_broadcasts() {
    let mut shell = NavShell::new();
    assert!(!shell.login_open());
    assert_eq!(shell.badge(), 0);

    shell.apply_event(&AppEvent::CartUpdated { count: 4 });
    assert_eq!(shell.badge(), 4);

    shell.apply_event(&AppEvent::Unauthorized);
    assert_eq!(shell.badge(), 0);
    assert!(shell.login_open());
    assert!(!shell.signup_open());

    shell.open_signup();
    assert!(shell.signup_open());
    assert!(!shell.login_open());

    shell.close_modals();
    assert!(!shell.login_open());
    assert!(!shell.signup_open());
}

#[tokio::test]
async fn login_stores_the_session_and_routes_admins_to_the_dashboard() {
    let h = harness();
    let auth = auth(&h);

    h.transport.push_json(json!({
        "token": "jwt-abc",
        "user": {
            "_id": "u-1",
            "name": "Asha Rao",
            "email": "asha@example.com",
            "role": "admin",
        }
    }));

    let route = auth.login("asha@example.com", "secret123").await.unwrap();

    assert_eq!(route, Route::Admin(AdminSection::Index));
    assert_eq!(h.session.token().as_deref(), Some("jwt-abc"));
    assert_eq!(h.session.role(), Some(Role::Admin));
    assert_eq!(h.transport.requests()[0].path, "/auth/login");
}

#[tokio::test]
async fn login_routes_plain_users_home() {
    let h = harness();
    let auth = auth(&h);

    h.transport.push_json(json!({
        "token": "jwt-def",
        "user": {
            "_id": "u-2",
            "name": "Vikram Shah",
            "email": "vikram@example.com",
            "role": "user",
        }
    }));

    let route = auth.login("vikram@example.com", "secret123").await.unwrap();
    assert_eq!(route, Route::Home);
}

#[tokio::test]
async fn registration_validates_before_touching_the_network() {
    let h = harness();
    let auth = auth(&h);

    let request = RegisterRequest {
        name: "A".to_string(),
        email: "not-an-email".to_string(),
        password: "short".to_string(),
    };

    assert!(matches!(
        auth.register(&request).await,
        Err(ApiError::Validation(_))
    ));
    assert_eq!(h.transport.request_count(), 0);
    assert!(!h.session.is_authenticated());
}

#[tokio::test]
async fn logout_clears_the_session_and_zeroes_the_badge() {
    let h = harness();
    login_as(&h.session, Role::Admin);
    let auth = auth(&h);
    let mut rx = h.events.subscribe();

    let route = auth.logout();

    assert_eq!(route, Route::Home);
    assert_eq!(h.session.token(), None);
    assert_eq!(h.session.role(), None);
    assert!(h.session.user().is_none());
    assert_eq!(
        drain_events(&mut rx),
        vec![AppEvent::CartUpdated { count: 0 }]
    );
}
