use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::error::ApiError;
use crate::events::{AppEvent, EventBus};
use crate::models::{Address, Cart, OrderDraft, OrderDraftItem, PaymentMethod};
use crate::routing::Route;
use crate::services::cart::CartService;
use crate::services::orders::OrderService;
use crate::session::SessionStore;
use crate::totals::CartTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    LoadingCart,
    AddressPending,
    ReadyToSubmit,
    Completed,
}

/// Delivery address as typed into the form; validated before it becomes the
/// selected address.
#[derive(Debug, Clone, Default, Validate)]
pub struct AddressForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub line1: String,
    #[validate(length(min = 1))]
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl AddressForm {
    fn into_address(self) -> Address {
        Address {
            name: self.name,
            phone: self.phone,
            line1: self.line1,
            city: self.city,
            state: self.state,
            zip: self.zip,
        }
    }
}

/// Linear checkout flow: load cart, select address, choose payment, submit.
/// Submission without an address fails fast with no network call. On success
/// the local cart is cleared optimistically and navigation moves to the order
/// history.
pub struct CheckoutScreen {
    cart_service: Arc<CartService>,
    order_service: Arc<OrderService>,
    session: Arc<SessionStore>,
    events: EventBus,
    cart: Option<Cart>,
    address: Option<Address>,
    payment: PaymentMethod,
    completed: bool,
}

impl CheckoutScreen {
    pub fn new(
        cart_service: Arc<CartService>,
        order_service: Arc<OrderService>,
        session: Arc<SessionStore>,
        events: EventBus,
    ) -> Self {
        CheckoutScreen {
            cart_service,
            order_service,
            session,
            events,
            cart: None,
            address: None,
            payment: PaymentMethod::default(),
            completed: false,
        }
    }

    pub fn stage(&self) -> CheckoutStage {
        if self.completed {
            CheckoutStage::Completed
        } else if self.cart.is_none() {
            CheckoutStage::LoadingCart
        } else if self.address.is_none() {
            CheckoutStage::AddressPending
        } else {
            CheckoutStage::ReadyToSubmit
        }
    }

    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        if !self.session.is_authenticated() {
            return Err(ApiError::Validation("User not logged in".to_string()));
        }
        self.cart = Some(self.cart_service.fetch_cart().await?);
        Ok(())
    }

    pub fn select_address(&mut self, form: AddressForm) -> Result<(), ApiError> {
        form.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        self.address = Some(form.into_address());
        Ok(())
    }

    /// User-initiated edit; moves the flow back to address pending.
    pub fn clear_address(&mut self) {
        self.address = None;
    }

    pub fn choose_payment(&mut self, payment: PaymentMethod) {
        self.payment = payment;
    }

    pub fn totals(&self) -> Option<CartTotals> {
        self.cart.as_ref().map(|cart| CartTotals::compute(&cart.items))
    }

    pub async fn place_order(&mut self) -> Result<Route, ApiError> {
        let Some(cart) = self.cart.as_ref() else {
            return Err(ApiError::Validation("Checkout is still loading".to_string()));
        };
        if cart.items.is_empty() {
            return Err(ApiError::Validation("Your cart is empty".to_string()));
        }
        let Some(address) = self.address.clone() else {
            return Err(ApiError::Validation(
                "Please select or add address".to_string(),
            ));
        };

        let draft = OrderDraft {
            items: cart
                .items
                .iter()
                .map(|item| OrderDraftItem {
                    product: item.product.id.clone(),
                    qty: item.qty,
                })
                .collect(),
            address,
            payment_method: self.payment,
            totals: CartTotals::compute(&cart.items),
        };

        let order = self.order_service.create(&draft).await?;
        info!("Order {} placed", order.id);

        // Cleared optimistically, not re-fetched.
        if let Some(cart) = self.cart.as_mut() {
            cart.items.clear();
        }
        self.completed = true;
        self.events.publish(AppEvent::CartUpdated { count: 0 });

        Ok(Route::Orders)
    }
}
