use std::sync::Arc;

use validator::Validate;

use crate::client::FormField;
use crate::error::ApiError;
use crate::models::{ImageUpload, Testimonial};
use crate::services::testimonials::TestimonialService;

#[derive(Debug, Clone, Validate)]
pub struct TestimonialForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub feedback: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    pub image: Option<ImageUpload>,
}

impl Default for TestimonialForm {
    fn default() -> Self {
        TestimonialForm {
            name: String::new(),
            feedback: String::new(),
            rating: 5,
            image: None,
        }
    }
}

impl TestimonialForm {
    fn to_fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::Text {
                name: "name".to_string(),
                value: self.name.clone(),
            },
            FormField::Text {
                name: "feedback".to_string(),
                value: self.feedback.clone(),
            },
            FormField::Text {
                name: "rating".to_string(),
                value: self.rating.to_string(),
            },
        ];
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

/// Admin testimonial management.
pub struct TestimonialsScreen {
    service: Arc<TestimonialService>,
    testimonials: Vec<Testimonial>,
}

impl TestimonialsScreen {
    pub fn new(service: Arc<TestimonialService>) -> Self {
        TestimonialsScreen {
            service,
            testimonials: Vec::new(),
        }
    }

    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.testimonials = self.service.fetch_testimonials().await?;
        Ok(())
    }

    /// Validates and submits the form. On success the form is reset for the
    /// next entry and the list refetched; a failed submission leaves the
    /// typed values in place.
    pub async fn submit(&mut self, form: &mut TestimonialForm) -> Result<(), ApiError> {
        form.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        self.service.create(form.to_fields()).await?;
        *form = TestimonialForm::default();
        self.load().await
    }

    pub async fn delete(&mut self, testimonial_id: &str) -> Result<(), ApiError> {
        self.service.delete(testimonial_id).await?;
        self.load().await
    }
}
