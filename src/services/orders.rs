use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Address, Order, OrderDraft, OrderStatus};
use crate::services::FAN_OUT_LIMIT;

/// Admin edit payload for an order's customer details.
#[derive(Debug, Serialize, Clone)]
pub struct OrderUpdate {
    #[serde(rename = "customerName")]
    pub customer_name: String,
    pub address: Address,
}

/// Result of a bulk delete; every individual outcome is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkDeleteOutcome {
    pub deleted: usize,
    pub failed: usize,
}

impl BulkDeleteOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: OrderStatus,
}

pub struct OrderService {
    api: Arc<ApiClient>,
}

impl OrderService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        OrderService { api }
    }

    /// All orders, admin only.
    pub async fn fetch_all(&self) -> Result<Vec<Order>, ApiError> {
        self.api.get("/orders").await
    }

    /// The logged-in user's own orders. The endpoint answers either with a
    /// bare array or with `{ "orders": [...] }`; both shapes are accepted.
    pub async fn fetch_mine(&self) -> Result<Vec<Order>, ApiError> {
        let body: Value = self.api.get("/orders/my-orders").await?;
        let list = if body.is_array() {
            body
        } else {
            body.get("orders").cloned().unwrap_or_else(|| json!([]))
        };
        serde_json::from_value(list).map_err(ApiError::Decode)
    }

    pub async fn create(&self, draft: &OrderDraft) -> Result<Order, ApiError> {
        let order: Order = self.api.post("/orders", draft).await?;
        info!("Order {} created", order.id);
        Ok(order)
    }

    pub async fn update(&self, order_id: &str, update: &OrderUpdate) -> Result<Order, ApiError> {
        self.api.put(&format!("/orders/{}", order_id), update).await
    }

    pub async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<OrderStatus, ApiError> {
        let body: StatusBody = self
            .api
            .put(
                &format!("/orders/{}/status", order_id),
                &json!({ "status": status }),
            )
            .await?;
        Ok(body.status)
    }

    pub async fn delete(&self, order_id: &str) -> Result<(), ApiError> {
        let _: Value = self.api.delete(&format!("/orders/{}", order_id)).await?;
        Ok(())
    }

    /// Deletes every listed order, one request per id, bounded by
    /// `FAN_OUT_LIMIT` in flight at a time.
    pub async fn delete_all(&self, order_ids: &[String]) -> Result<BulkDeleteOutcome, ApiError> {
        let results: Vec<Result<(), ApiError>> = stream::iter(order_ids.to_vec())
            .map(|id| {
                let api = Arc::clone(&self.api);
                async move {
                    let _: Value = api.delete(&format!("/orders/{}", id)).await?;
                    Ok(())
                }
            })
            .buffer_unordered(FAN_OUT_LIMIT)
            .collect()
            .await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        let outcome = BulkDeleteOutcome {
            deleted: results.len() - failed,
            failed,
        };
        if failed > 0 {
            error!("Bulk order delete: {} of {} failed", failed, results.len());
        }
        Ok(outcome)
    }
}
