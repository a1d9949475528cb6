#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use furnistore_client::client::{ApiClient, ApiRequest, ApiResponse, Transport};
use furnistore_client::error::ApiError;
use furnistore_client::events::{AppEvent, EventBus};
use furnistore_client::models::{Role, User};
use furnistore_client::session::SessionStore;

/// Scripted in-memory backend: records every request and answers from a
/// queue. An empty queue answers 200 with a null body.
pub struct MockTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(MockTransport {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        })
    }

    pub fn push_status(&self, status: u16, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse { status, body }));
    }

    pub fn push_json(&self, body: Value) {
        self.push_status(200, body);
    }

    pub fn push_transport_failure(&self) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Transport("connection refused".to_string())));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(ApiResponse {
                status: 200,
                body: Value::Null,
            }))
    }
}

pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub api: Arc<ApiClient>,
    pub session: Arc<SessionStore>,
    pub events: EventBus,
}

pub fn harness() -> Harness {
    let transport = MockTransport::new();
    let session = Arc::new(SessionStore::new());
    let events = EventBus::new();
    let api = Arc::new(ApiClient::new(
        transport.clone() as Arc<dyn Transport>,
        session.clone(),
        events.clone(),
    ));
    Harness {
        transport,
        api,
        session,
        events,
    }
}

pub fn login_as(session: &SessionStore, role: Role) {
    let user = User {
        id: "user-1".to_string(),
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        role,
    };
    session.begin("test-token", &user);
}

pub fn product_json(id: &str, title: &str, price: f64) -> Value {
    json!({
        "_id": id,
        "title": title,
        "price": price,
        "stock": 10,
        "status": "active",
    })
}

pub fn cart_json(items: &[(Value, u32)]) -> Value {
    let items: Vec<Value> = items
        .iter()
        .map(|(product, qty)| json!({ "product": product, "qty": qty }))
        .collect();
    json!({ "_id": "cart-1", "items": items })
}

pub fn order_json(id: &str, customer: &str, city: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "customerName": customer,
        "address": {
            "name": customer,
            "phone": "1234567890",
            "line1": "12 Teak Lane",
            "city": city,
        },
        "products": [{ "product": product_json("p-1", "Oak Chair", 500.0), "qty": 2 }],
        "status": status,
        "totals": { "subtotal": 1000.0, "tax": 20.0, "shipping": 100.0, "total": 1120.0 },
        "paymentMethod": "COD",
    })
}

/// Collects everything currently buffered on a subscription.
pub fn drain_events(rx: &mut tokio::sync::broadcast::Receiver<AppEvent>) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
