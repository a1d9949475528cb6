use std::env;
use dotenv::dotenv;

pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn init() -> Self {
        dotenv().ok();

        let base_url = env::var("API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:4500".to_string());

        ApiConfig { base_url }
    }

    /// Root of the consumed REST surface, e.g. `http://localhost:4500/api`.
    pub fn api_root(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }
}
