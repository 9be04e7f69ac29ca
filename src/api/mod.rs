pub mod application;
pub mod person;
pub mod review;
pub mod translation;

pub use translation::TranslationCache;

use std::time::Instant;

use metrics::{counter, histogram};

use crate::{auth::Session, ClientConfig, ClientError, ClientResult};

/// HTTP client for the recruitment backend. One shared connection pool;
/// endpoint functions live in the sibling modules and borrow this.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.clone(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.post(self.url(path))
    }

    /// Send a request, record per-endpoint metrics, and map non-success
    /// statuses to `ClientError` using the error body as the message.
    pub(crate) async fn send(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> ClientResult<reqwest::Response> {
        let start = Instant::now();

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, endpoint, "Request to backend failed");
            counter!(
                "backend_requests_total",
                "endpoint" => endpoint,
                "status" => "transport_error"
            )
            .increment(1);
            ClientError::Http(e)
        })?;

        let status = response.status();
        histogram!("backend_request_duration_seconds", "endpoint" => endpoint)
            .record(start.elapsed().as_secs_f64());
        counter!(
            "backend_requests_total",
            "endpoint" => endpoint,
            "status" => status.as_u16().to_string()
        )
        .increment(1);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body, endpoint, "Backend returned error");
            return Err(ClientError::from_status(status.as_u16(), body));
        }

        Ok(response)
    }
}

/// Attach the session's bearer credential to an outgoing request. Callers
/// run the session guard first; a token that reaches this point is live.
pub(crate) fn bearer(request: reqwest::RequestBuilder, session: &Session) -> reqwest::RequestBuilder {
    request.header(
        reqwest::header::AUTHORIZATION,
        format!("Bearer {}", session.token),
    )
}
