use std::sync::Arc;

use crate::error::ApiError;
use crate::models::Subcategory;
use crate::services::catalog::{CatalogService, CategoryWithSubcategories};

/// Admin category and subcategory management. Every write refetches the
/// authoritative list, which is also how a cascaded category delete becomes
/// visible.
pub struct CategoriesScreen {
    service: Arc<CatalogService>,
    categories: Vec<CategoryWithSubcategories>,
}

impl CategoriesScreen {
    pub fn new(service: Arc<CatalogService>) -> Self {
        CategoriesScreen {
            service,
            categories: Vec::new(),
        }
    }

    pub fn categories(&self) -> &[CategoryWithSubcategories] {
        &self.categories
    }

    pub fn subcategories_of(&self, category_id: &str) -> Option<&[Subcategory]> {
        self.categories
            .iter()
            .find(|entry| entry.category.id == category_id)
            .map(|entry| entry.subcategories.as_slice())
    }

    /// Every subcategory currently known, across all categories.
    pub fn all_subcategories(&self) -> Vec<&Subcategory> {
        self.categories
            .iter()
            .flat_map(|entry| entry.subcategories.iter())
            .collect()
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.categories = self.service.fetch_categories_with_subcategories().await?;
        Ok(())
    }

    /// Creates or, when `editing_id` is set, renames a category.
    pub async fn save_category(
        &mut self,
        editing_id: Option<&str>,
        name: &str,
    ) -> Result<(), ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation("Category name required".to_string()));
        }
        match editing_id {
            Some(id) => self.service.update_category(id, name).await?,
            None => self.service.create_category(name).await?,
        }
        self.load().await
    }

    pub async fn remove_category(&mut self, category_id: &str) -> Result<(), ApiError> {
        self.service.delete_category(category_id).await?;
        self.load().await
    }

    /// Creates a subcategory under `category_id`, or renames `editing_id`.
    pub async fn save_subcategory(
        &mut self,
        editing_id: Option<&str>,
        category_id: &str,
        name: &str,
    ) -> Result<(), ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation("Subcategory name required".to_string()));
        }
        match editing_id {
            Some(id) => self.service.update_subcategory(id, name).await?,
            None => self.service.create_subcategory(category_id, name).await?,
        }
        self.load().await
    }

    pub async fn remove_subcategory(&mut self, subcategory_id: &str) -> Result<(), ApiError> {
        self.service.delete_subcategory(subcategory_id).await?;
        self.load().await
    }
}
