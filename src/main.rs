use std::sync::Arc;

use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use furnistore_client::client::{ApiClient, HttpTransport};
use furnistore_client::config::ApiConfig;
use furnistore_client::events::EventBus;
use furnistore_client::session::SessionStore;

/// Connectivity probe against the storefront backend: hits the public list
/// endpoints and reports what came back.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("furnistore_client=debug".parse().unwrap()),
        )
        .init();

    let config = ApiConfig::init();
    info!("Probing storefront API at {}", config.api_root());

    let session = Arc::new(SessionStore::new());
    let events = EventBus::new();
    let transport = Arc::new(HttpTransport::new(&config));
    let api = ApiClient::new(transport, session, events);

    probe(&api, "/products", "products").await;
    probe(&api, "/categories", "categories").await;
    probe(&api, "/testimonials", "testimonials").await;
}

async fn probe(api: &ApiClient, path: &str, label: &str) {
    match api.get::<Vec<serde_json::Value>>(path).await {
        Ok(records) => info!("{}: reachable, {} records", label, records.len()),
        Err(err) => error!("{}: {}", label, err),
    }
}
