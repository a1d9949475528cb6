use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde_json::{json, Value};
use tracing::warn;

use crate::client::{ApiClient, FormField};
use crate::error::ApiError;
use crate::models::{Category, Product, Subcategory};
use crate::services::FAN_OUT_LIMIT;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryWithSubcategories {
    pub category: Category,
    pub subcategories: Vec<Subcategory>,
}

/// Categories, subcategories and products.
pub struct CatalogService {
    api: Arc<ApiClient>,
}

impl CatalogService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        CatalogService { api }
    }

    // --- categories ---

    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.api.get("/categories").await
    }

    pub async fn fetch_subcategories(&self, category_id: &str) -> Result<Vec<Subcategory>, ApiError> {
        self.api
            .get(&format!("/categories/{}/subcategories", category_id))
            .await
    }

    /// Fetches the category list, then each category's subcategories with at
    /// most `FAN_OUT_LIMIT` requests in flight. A failed branch degrades to an
    /// empty subcategory list rather than failing the whole fetch.
    pub async fn fetch_categories_with_subcategories(
        &self,
    ) -> Result<Vec<CategoryWithSubcategories>, ApiError> {
        let categories = self.fetch_categories().await?;

        let mut fetched: HashMap<String, Vec<Subcategory>> = stream::iter(categories.clone())
            .map(|category| {
                let api = Arc::clone(&self.api);
                async move {
                    let path = format!("/categories/{}/subcategories", category.id);
                    let subcategories = match api.get::<Vec<Subcategory>>(&path).await {
                        Ok(subs) => subs,
                        Err(err) => {
                            warn!("Subcategory fetch for {} failed: {}", category.id, err);
                            Vec::new()
                        }
                    };
                    (category.id, subcategories)
                }
            })
            .buffer_unordered(FAN_OUT_LIMIT)
            .collect()
            .await;

        Ok(categories
            .into_iter()
            .map(|category| {
                let subcategories = fetched.remove(&category.id).unwrap_or_default();
                CategoryWithSubcategories {
                    category,
                    subcategories,
                }
            })
            .collect())
    }

    pub async fn create_category(&self, name: &str) -> Result<(), ApiError> {
        let _: Value = self.api.post("/categories", &json!({ "name": name })).await?;
        Ok(())
    }

    pub async fn update_category(&self, category_id: &str, name: &str) -> Result<(), ApiError> {
        let _: Value = self
            .api
            .put(&format!("/categories/{}", category_id), &json!({ "name": name }))
            .await?;
        Ok(())
    }

    /// Deletes a category; the backend cascades the delete to its
    /// subcategories.
    pub async fn delete_category(&self, category_id: &str) -> Result<(), ApiError> {
        let _: Value = self
            .api
            .delete(&format!("/categories/{}", category_id))
            .await?;
        Ok(())
    }

    pub async fn create_subcategory(&self, category_id: &str, name: &str) -> Result<(), ApiError> {
        let _: Value = self
            .api
            .post(
                &format!("/categories/{}/subcategories", category_id),
                &json!({ "name": name }),
            )
            .await?;
        Ok(())
    }

    pub async fn update_subcategory(&self, subcategory_id: &str, name: &str) -> Result<(), ApiError> {
        let _: Value = self
            .api
            .put(
                &format!("/categories/subcategories/{}", subcategory_id),
                &json!({ "name": name }),
            )
            .await?;
        Ok(())
    }

    pub async fn delete_subcategory(&self, subcategory_id: &str) -> Result<(), ApiError> {
        let _: Value = self
            .api
            .delete(&format!("/categories/subcategories/{}", subcategory_id))
            .await?;
        Ok(())
    }

    // --- products ---

    pub async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        self.api.get("/products").await
    }

    pub async fn create_product(&self, fields: Vec<FormField>) -> Result<(), ApiError> {
        let _: Value = self.api.post_form("/products", fields).await?;
        Ok(())
    }

    pub async fn update_product(
        &self,
        product_id: &str,
        fields: Vec<FormField>,
    ) -> Result<(), ApiError> {
        let _: Value = self
            .api
            .put_form(&format!("/products/{}", product_id), fields)
            .await?;
        Ok(())
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<(), ApiError> {
        let _: Value = self
            .api
            .delete(&format!("/products/{}", product_id))
            .await?;
        Ok(())
    }
}
