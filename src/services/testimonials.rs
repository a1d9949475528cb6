use std::sync::Arc;

use serde_json::Value;

use crate::client::{ApiClient, FormField};
use crate::error::ApiError;
use crate::models::Testimonial;

pub struct TestimonialService {
    api: Arc<ApiClient>,
}

impl TestimonialService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        TestimonialService { api }
    }

    pub async fn fetch_testimonials(&self) -> Result<Vec<Testimonial>, ApiError> {
        self.api.get("/testimonials").await
    }

    /// Create accepts multipart `name, feedback, rating, image`.
    pub async fn create(&self, fields: Vec<FormField>) -> Result<(), ApiError> {
        let _: Value = self.api.post_form("/testimonials", fields).await?;
        Ok(())
    }

    pub async fn delete(&self, testimonial_id: &str) -> Result<(), ApiError> {
        let _: Value = self
            .api
            .delete(&format!("/testimonials/{}", testimonial_id))
            .await?;
        Ok(())
    }
}
