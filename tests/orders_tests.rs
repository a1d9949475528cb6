mod common;

use std::sync::Arc;

use serde_json::json;

use furnistore_client::error::ApiError;
use furnistore_client::models::{OrderStatus, Role};
use furnistore_client::screens::orders::{OrderHistoryScreen, OrdersAdminScreen};
use furnistore_client::services::orders::{BulkDeleteOutcome, OrderService};

use common::{harness, login_as, order_json, Harness};

fn admin_screen(h: &Harness) -> OrdersAdminScreen {
    OrdersAdminScreen::new(Arc::new(OrderService::new(h.api.clone())))
}

#[tokio::test]
async fn history_requires_a_logged_in_user() {
    let h = harness();
    let mut screen =
        OrderHistoryScreen::new(Arc::new(OrderService::new(h.api.clone())), h.session.clone());

    match screen.load().await {
        Err(ApiError::Validation(message)) => {
            assert_eq!(message, "Please log in to see your orders")
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(h.transport.request_count(), 0);
    assert!(!screen.is_loaded());
}

#[tokio::test]
async fn history_accepts_a_bare_array_response() {
    let h = harness();
    login_as(&h.session, Role::User);
    let mut screen =
        OrderHistoryScreen::new(Arc::new(OrderService::new(h.api.clone())), h.session.clone());

    h.transport
        .push_json(json!([order_json("o-1", "Asha Rao", "Pune", "pending")]));
    screen.load().await.unwrap();

    assert_eq!(h.transport.requests()[0].path, "/orders/my-orders");
    assert_eq!(screen.orders().len(), 1);
    assert!(screen.is_loaded());
}

#[tokio::test]
async fn history_accepts_a_wrapped_orders_response() {
    let h = harness();
    login_as(&h.session, Role::User);
    let mut screen =
        OrderHistoryScreen::new(Arc::new(OrderService::new(h.api.clone())), h.session.clone());

    h.transport.push_json(json!({
        "orders": [
            order_json("o-1", "Asha Rao", "Pune", "pending"),
            order_json("o-2", "Vikram Shah", "Mumbai", "shipped"),
        ]
    }));
    screen.load().await.unwrap();

    assert_eq!(screen.orders().len(), 2);
    assert_eq!(screen.orders()[1].status, OrderStatus::Shipped);
}

#[tokio::test]
async fn admin_search_matches_name_id_and_city_case_insensitively() {
    let h = harness();
    let mut screen = admin_screen(&h);

    h.transport.push_json(json!([
        order_json("o-1", "Asha Rao", "Pune", "pending"),
        order_json("o-2", "Vikram Shah", "Mumbai", "shipped"),
        order_json("o-3", "Meera Iyer", "Chennai", "delivered"),
    ]));
    screen.load().await.unwrap();

    assert_eq!(screen.filtered("").len(), 3);
    assert_eq!(screen.filtered("ASHA").len(), 1);
    assert_eq!(screen.filtered("o-2").len(), 1);
    assert_eq!(screen.filtered("chennai")[0].id, "o-3");
    assert!(screen.filtered("kolkata").is_empty());
}

#[tokio::test]
async fn status_update_applies_the_confirmed_status() {
    let h = harness();
    let mut screen = admin_screen(&h);

    h.transport
        .push_json(json!([order_json("o-1", "Asha Rao", "Pune", "pending")]));
    screen.load().await.unwrap();

    h.transport.push_json(json!({ "status": "shipped" }));
    screen
        .update_status("o-1", OrderStatus::Shipped)
        .await
        .unwrap();

    assert_eq!(screen.orders()[0].status, OrderStatus::Shipped);
    assert_eq!(h.transport.requests()[1].path, "/orders/o-1/status");
}

#[tokio::test]
async fn save_edit_mirrors_the_customer_name_into_the_address() {
    let h = harness();
    let mut screen = admin_screen(&h);

    h.transport
        .push_json(json!([order_json("o-1", "Asha Rao", "Pune", "pending")]));
    screen.load().await.unwrap();

    screen.start_edit("o-1");
    {
        let form = screen.edit_form_mut().unwrap();
        form.customer_name = "Asha R. Deshmukh".to_string();
        form.city = "Nashik".to_string();
    }

    h.transport
        .push_json(order_json("o-1", "Asha R. Deshmukh", "Nashik", "pending"));
    screen.save_edit().await.unwrap();

    assert!(screen.editing().is_none());
    assert_eq!(
        screen.orders()[0].customer_name.as_deref(),
        Some("Asha R. Deshmukh")
    );

    let requests = h.transport.requests();
    assert_eq!(requests[1].path, "/orders/o-1");
    let furnistore_client::client::RequestBody::Json(body) = &requests[1].body else {
        panic!("expected a JSON update payload");
    };
    assert_eq!(body["customerName"], "Asha R. Deshmukh");
    assert_eq!(body["address"]["name"], "Asha R. Deshmukh");
    assert_eq!(body["address"]["city"], "Nashik");
}

#[tokio::test]
async fn save_edit_without_an_active_edit_is_rejected() {
    let h = harness();
    let mut screen = admin_screen(&h);

    assert!(matches!(
        screen.save_edit().await,
        Err(ApiError::Validation(_))
    ));
    assert_eq!(h.transport.request_count(), 0);
}

#[tokio::test]
async fn delete_removes_the_order_locally() {
    let h = harness();
    let mut screen = admin_screen(&h);

    h.transport.push_json(json!([
        order_json("o-1", "Asha Rao", "Pune", "pending"),
        order_json("o-2", "Vikram Shah", "Mumbai", "shipped"),
    ]));
    screen.load().await.unwrap();

    screen.delete("o-1").await.unwrap();
    assert_eq!(screen.orders().len(), 1);
    assert_eq!(screen.orders()[0].id, "o-2");
}

#[tokio::test]
async fn delete_all_clears_the_list_when_every_delete_succeeds() {
    let h = harness();
    let mut screen = admin_screen(&h);

    h.transport.push_json(json!([
        order_json("o-1", "Asha Rao", "Pune", "pending"),
        order_json("o-2", "Vikram Shah", "Mumbai", "shipped"),
    ]));
    screen.load().await.unwrap();

    let outcome = screen.delete_all().await.unwrap();
    assert_eq!(
        outcome,
        BulkDeleteOutcome {
            deleted: 2,
            failed: 0
        }
    );
    assert!(screen.orders().is_empty());
    // list fetch + one delete per order, no refetch
    assert_eq!(h.transport.request_count(), 3);
}

#[tokio::test]
async fn partial_bulk_delete_failure_refetches_the_survivors() {
    let h = harness();
    let mut screen = admin_screen(&h);

    h.transport.push_json(json!([
        order_json("o-1", "Asha Rao", "Pune", "pending"),
        order_json("o-2", "Vikram Shah", "Mumbai", "shipped"),
        order_json("o-3", "Meera Iyer", "Chennai", "delivered"),
    ]));
    screen.load().await.unwrap();

    h.transport.push_json(json!(null));
    h.transport.push_transport_failure();
    h.transport.push_json(json!(null));
    // refetch after the partial failure
    h.transport
        .push_json(json!([order_json("o-2", "Vikram Shah", "Mumbai", "shipped")]));

    let outcome = screen.delete_all().await.unwrap();
    assert_eq!(
        outcome,
        BulkDeleteOutcome {
            deleted: 2,
            failed: 1
        }
    );
    assert!(!outcome.is_complete());
    assert_eq!(screen.orders().len(), 1);
    assert_eq!(screen.orders()[0].id, "o-2");
}
