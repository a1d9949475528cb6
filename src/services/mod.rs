pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod testimonials;
pub mod users;

/// Concurrency limit for fan-out request bursts (per-category subcategory
/// fetches, bulk order deletes).
pub const FAN_OUT_LIMIT: usize = 8;
