use std::sync::Arc;

use tracing::info;

use crate::error::ApiError;
use crate::models::{Address, Order, OrderStatus};
use crate::services::orders::{BulkDeleteOutcome, OrderService, OrderUpdate};
use crate::session::SessionStore;

/// The logged-in user's order history.
pub struct OrderHistoryScreen {
    service: Arc<OrderService>,
    session: Arc<SessionStore>,
    orders: Vec<Order>,
    loaded: bool,
}

impl OrderHistoryScreen {
    pub fn new(service: Arc<OrderService>, session: Arc<SessionStore>) -> Self {
        OrderHistoryScreen {
            service,
            session,
            orders: Vec::new(),
            loaded: false,
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        if !self.session.is_authenticated() {
            return Err(ApiError::Validation(
                "Please log in to see your orders".to_string(),
            ));
        }
        self.orders = self.service.fetch_mine().await?;
        self.loaded = true;
        Ok(())
    }
}

/// Inline edit state for one order's customer details.
#[derive(Debug, Clone, Default)]
pub struct OrderEditForm {
    pub customer_name: String,
    pub phone: String,
    pub line1: String,
    pub city: String,
}

/// Admin orders screen: list, search, edit, status transitions, deletes.
pub struct OrdersAdminScreen {
    service: Arc<OrderService>,
    orders: Vec<Order>,
    editing: Option<(String, OrderEditForm)>,
}

impl OrdersAdminScreen {
    pub fn new(service: Arc<OrderService>) -> Self {
        OrdersAdminScreen {
            service,
            orders: Vec::new(),
            editing: None,
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn editing(&self) -> Option<&(String, OrderEditForm)> {
        self.editing.as_ref()
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.orders = self.service.fetch_all().await?;
        Ok(())
    }

    /// Case-insensitive match on customer name, order id or city.
    pub fn filtered(&self, search: &str) -> Vec<&Order> {
        if search.is_empty() {
            return self.orders.iter().collect();
        }
        let needle = search.to_lowercase();
        self.orders
            .iter()
            .filter(|order| {
                let name = order
                    .customer_name
                    .clone()
                    .or_else(|| order.address.as_ref().map(|a| a.name.clone()))
                    .unwrap_or_default();
                let city = order
                    .address
                    .as_ref()
                    .map(|a| a.city.clone())
                    .unwrap_or_default();
                name.to_lowercase().contains(&needle)
                    || order.id.to_lowercase().contains(&needle)
                    || city.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn start_edit(&mut self, order_id: &str) {
        let Some(order) = self.orders.iter().find(|o| o.id == order_id) else {
            return;
        };
        let address = order.address.clone().unwrap_or_default();
        let form = OrderEditForm {
            customer_name: order
                .customer_name
                .clone()
                .unwrap_or_else(|| address.name.clone()),
            phone: address.phone,
            line1: address.line1,
            city: address.city,
        };
        self.editing = Some((order_id.to_string(), form));
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut OrderEditForm> {
        self.editing.as_mut().map(|(_, form)| form)
    }

    /// Saves the in-progress edit; the customer name is mirrored into the
    /// address block, as the backend stores both.
    pub async fn save_edit(&mut self) -> Result<(), ApiError> {
        let Some((order_id, form)) = self.editing.clone() else {
            return Err(ApiError::Validation("No order is being edited".to_string()));
        };
        let update = OrderUpdate {
            customer_name: form.customer_name.clone(),
            address: Address {
                name: form.customer_name,
                phone: form.phone,
                line1: form.line1,
                city: form.city,
                state: String::new(),
                zip: String::new(),
            },
        };
        let updated = self.service.update(&order_id, &update).await?;
        if let Some(order) = self.orders.iter_mut().find(|o| o.id == order_id) {
            *order = updated;
        }
        self.editing = None;
        Ok(())
    }

    pub async fn update_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        let confirmed = self.service.update_status(order_id, status).await?;
        if let Some(order) = self.orders.iter_mut().find(|o| o.id == order_id) {
            order.status = confirmed;
        }
        info!("Order {} moved to {}", order_id, confirmed.as_str());
        Ok(())
    }

    pub async fn delete(&mut self, order_id: &str) -> Result<(), ApiError> {
        self.service.delete(order_id).await?;
        self.orders.retain(|o| o.id != order_id);
        Ok(())
    }

    /// Deletes everything currently listed. On partial failure the list is
    /// refetched so the screen shows what actually survived.
    pub async fn delete_all(&mut self) -> Result<BulkDeleteOutcome, ApiError> {
        let ids: Vec<String> = self.orders.iter().map(|o| o.id.clone()).collect();
        let outcome = self.service.delete_all(&ids).await?;
        if outcome.is_complete() {
            self.orders.clear();
        } else {
            self.load().await?;
        }
        Ok(outcome)
    }
}
