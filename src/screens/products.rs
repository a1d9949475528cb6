use std::sync::Arc;

use validator::Validate;

use crate::client::FormField;
use crate::error::ApiError;
use crate::models::{ImageUpload, Product, ProductStatus};
use crate::services::catalog::CatalogService;

/// Form state for creating or editing a product.
///
/// `existing_image` is the preview of what the backend already stores; it is
/// never re-uploaded. Only a freshly attached `image` becomes a file part.
#[derive(Debug, Clone, Default, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub stock: u32,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub description: String,
    pub status: ProductStatus,
    pub image: Option<ImageUpload>,
    pub existing_image: Option<String>,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        ProductForm {
            title: product.title.clone(),
            price: product.price,
            stock: product.stock,
            category: product.category.as_ref().map(|c| c.id.clone()),
            subcategory: product.subcategory.as_ref().map(|s| s.id.clone()),
            description: product.description.clone().unwrap_or_default(),
            status: product.status,
            image: None,
            existing_image: product.image.clone(),
        }
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.category.is_none() {
            return Err(ApiError::Validation(
                "Please select a category before saving.".to_string(),
            ));
        }
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))
    }

    fn to_fields(&self) -> Vec<FormField> {
        let text = |name: &str, value: String| FormField::Text {
            name: name.to_string(),
            value,
        };

        let mut fields = vec![
            text("title", self.title.clone()),
            text("price", self.price.to_string()),
            text("stock", self.stock.to_string()),
            text("description", self.description.clone()),
            text("status", self.status.as_str().to_string()),
        ];
        if let Some(category) = &self.category {
            fields.push(text("category", category.clone()));
        }
        if let Some(subcategory) = &self.subcategory {
            fields.push(text("subcategory", subcategory.clone()));
        }
        if let Some(image) = &self.image {
            fields.push(FormField::File {
                name: "image".to_string(),
                file_name: image.file_name.clone(),
                content_type: image.content_type.clone(),
                data: image.data.clone(),
            });
        }
        fields
    }
}

/// Admin product management: list, create, edit (multipart), delete.
pub struct ProductsScreen {
    service: Arc<CatalogService>,
    products: Vec<Product>,
    editing: Option<String>,
}

impl ProductsScreen {
    pub fn new(service: Arc<CatalogService>) -> Self {
        ProductsScreen {
            service,
            products: Vec::new(),
            editing: None,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.products = self.service.fetch_products().await?;
        Ok(())
    }

    pub fn start_edit(&mut self, product_id: &str) -> Option<ProductForm> {
        let product = self.products.iter().find(|p| p.id == product_id)?;
        let form = ProductForm::from_product(product);
        self.editing = Some(product_id.to_string());
        Some(form)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub async fn create(&mut self, form: &ProductForm) -> Result<(), ApiError> {
        form.check()?;
        self.service.create_product(form.to_fields()).await?;
        self.load().await
    }

    pub async fn save_edit(&mut self, form: &ProductForm) -> Result<(), ApiError> {
        let Some(product_id) = self.editing.clone() else {
            return Err(ApiError::Validation(
                "No product is being edited".to_string(),
            ));
        };
        form.check()?;
        self.service.update_product(&product_id, form.to_fields()).await?;
        self.editing = None;
        self.load().await
    }

    pub async fn delete(&mut self, product_id: &str) -> Result<(), ApiError> {
        self.service.delete_product(product_id).await?;
        self.load().await
    }
}
