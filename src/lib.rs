pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod routing;
pub mod screens;
pub mod services;
pub mod session;
pub mod totals;
