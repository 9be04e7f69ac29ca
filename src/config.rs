use std::env;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the recruitment backend, e.g. `http://localhost:8080`.
    pub api_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let api_url = env::var("API_URL").map_err(|_| "API_URL must be set".to_string())?;

        // Endpoint paths are joined with a leading slash
        let api_url = api_url.trim_end_matches('/').to_string();

        Ok(Self { api_url })
    }
}
