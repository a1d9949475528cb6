use std::sync::Arc;

use tracing::error;

use crate::error::ApiError;
use crate::events::{AppEvent, EventBus};
use crate::models::Cart;
use crate::services::cart::CartService;
use crate::totals::{item_count, CartTotals};

/// Cart screen with optimistic mutations.
///
/// Increment, decrement and remove mutate the local copy and broadcast the
/// new badge count immediately, then issue the request. A failed request
/// discards the optimistic copy and resyncs from the backend; there is no
/// inverse-operation rollback.
pub struct CartScreen {
    service: Arc<CartService>,
    events: EventBus,
    cart: Option<Cart>,
}

impl CartScreen {
    pub fn new(service: Arc<CartService>, events: EventBus) -> Self {
        CartScreen {
            service,
            events,
            cart: None,
        }
    }

    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.cart.is_some()
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        let cart = self.service.fetch_cart().await?;
        self.events.publish(AppEvent::CartUpdated {
            count: item_count(&cart.items),
        });
        self.cart = Some(cart);
        Ok(())
    }

    pub fn totals(&self) -> Option<CartTotals> {
        self.cart.as_ref().map(|cart| CartTotals::compute(&cart.items))
    }

    pub async fn increase(&mut self, product_id: &str) -> Result<(), ApiError> {
        let cart = self.loaded_cart_mut()?;
        for item in &mut cart.items {
            if item.product.id == product_id {
                item.qty += 1;
            }
        }
        let count = item_count(&cart.items);
        self.events.publish(AppEvent::CartUpdated { count });

        if let Err(err) = self.service.add_to_cart(product_id, 1).await {
            error!("Failed to increase quantity: {}", err);
            self.resync().await;
            return Err(err);
        }
        Ok(())
    }

    /// Decrement never drops a line below quantity 1.
    pub async fn decrease(&mut self, product_id: &str) -> Result<(), ApiError> {
        let cart = self.loaded_cart_mut()?;
        for item in &mut cart.items {
            if item.product.id == product_id && item.qty > 1 {
                item.qty -= 1;
            }
        }
        let count = item_count(&cart.items);
        self.events.publish(AppEvent::CartUpdated { count });

        if let Err(err) = self.service.decrease_item(product_id).await {
            error!("Failed to decrease quantity: {}", err);
            self.resync().await;
            return Err(err);
        }
        Ok(())
    }

    pub async fn remove(&mut self, product_id: &str) -> Result<(), ApiError> {
        let cart = self.loaded_cart_mut()?;
        cart.items.retain(|item| item.product.id != product_id);
        let count = item_count(&cart.items);
        self.events.publish(AppEvent::CartUpdated { count });

        if let Err(err) = self.service.remove_item(product_id).await {
            error!("Failed to remove item: {}", err);
            self.resync().await;
            return Err(err);
        }
        Ok(())
    }

    fn loaded_cart_mut(&mut self) -> Result<&mut Cart, ApiError> {
        self.cart
            .as_mut()
            .ok_or_else(|| ApiError::Validation("Cart is still loading".to_string()))
    }

    /// Rollback path: discard the optimistic copy and refetch the
    /// authoritative cart.
    async fn resync(&mut self) {
        match self.service.fetch_cart().await {
            Ok(cart) => {
                self.events.publish(AppEvent::CartUpdated {
                    count: item_count(&cart.items),
                });
                self.cart = Some(cart);
            }
            Err(err) => error!("Failed to reload cart after rollback: {}", err),
        }
    }
}
