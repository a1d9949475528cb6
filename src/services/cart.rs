use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde_json::json;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::events::{AppEvent, EventBus};
use crate::models::Cart;
use crate::session::SessionStore;
use crate::totals::item_count;

/// Cart operations plus the cached item count behind the nav badge.
///
/// The cache is refreshed by successful fetches and by `CartUpdated`
/// broadcasts, and reset to zero when no token is present or on the
/// unauthorized signal. Brief staleness is acceptable.
pub struct CartService {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    cached_count: AtomicU32,
}

impl CartService {
    pub fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        CartService {
            api,
            session,
            cached_count: AtomicU32::new(0),
        }
    }

    pub async fn fetch_cart(&self) -> Result<Cart, ApiError> {
        let cart: Cart = self.api.get("/cart").await?;
        self.cached_count
            .store(item_count(&cart.items), Ordering::Relaxed);
        Ok(cart)
    }

    /// Adds a product, or increases its quantity when already present.
    pub async fn add_to_cart(&self, product_id: &str, qty: u32) -> Result<Cart, ApiError> {
        self.api
            .post("/cart/add", &json!({ "productId": product_id, "qty": qty }))
            .await
    }

    /// Decreases the quantity by exactly 1; the backend floors at 1.
    pub async fn decrease_item(&self, product_id: &str) -> Result<Cart, ApiError> {
        self.api
            .post("/cart/decrease", &json!({ "productId": product_id }))
            .await
    }

    /// Removes the line item entirely, the only path to quantity zero.
    pub async fn remove_item(&self, product_id: &str) -> Result<Cart, ApiError> {
        self.api.delete(&format!("/cart/{}", product_id)).await
    }

    pub async fn set_quantity(&self, product_id: &str, qty: u32) -> Result<Cart, ApiError> {
        self.api
            .put(&format!("/cart/{}", product_id), &json!({ "qty": qty }))
            .await
    }

    pub fn cached_count(&self) -> u32 {
        self.cached_count.load(Ordering::Relaxed)
    }

    /// Item count for the nav badge. Resolves to 0 without a network call when
    /// logged out, and swallows fetch errors down to 0.
    pub async fn cart_count(&self) -> u32 {
        if !self.session.is_authenticated() {
            self.cached_count.store(0, Ordering::Relaxed);
            return 0;
        }

        match self.fetch_cart().await {
            Ok(cart) => item_count(&cart.items),
            Err(err) => {
                warn!("Cart count fetch failed: {}", err);
                self.cached_count.store(0, Ordering::Relaxed);
                0
            }
        }
    }

    pub fn apply_event(&self, event: &AppEvent) {
        match event {
            AppEvent::CartUpdated { count } => {
                debug!("Cart count cache updated to {}", count);
                self.cached_count.store(*count, Ordering::Relaxed);
            }
            AppEvent::Unauthorized => {
                self.cached_count.store(0, Ordering::Relaxed);
            }
        }
    }

    /// Keeps the cached count in sync with broadcasts for the life of the bus.
    pub fn watch(self: &Arc<Self>, events: &EventBus) -> JoinHandle<()> {
        let service = Arc::clone(self);
        let mut rx = events.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => service.apply_event(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Cart count watcher lagged by {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
