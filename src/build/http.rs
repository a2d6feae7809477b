//! HTTP build service client using ureq
//!
//! ureq is blocking, so each request runs on tokio's blocking pool.

use crate::build::{BuildOutcome, BuildRequest, BuildService};
use crate::error::{MakerError, MakerResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Build service reached over HTTP at `{base_url}/make`
#[derive(Clone)]
pub struct HttpBuildService {
    agent: ureq::Agent,
    make_url: String,
}

impl std::fmt::Debug for HttpBuildService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBuildService")
            .field("make_url", &self.make_url)
            .finish()
    }
}

impl HttpBuildService {
    /// Create a client for the service at `base_url`
    ///
    /// `request_timeout` bounds the whole call; it is the only limit on how
    /// long a build request may block.
    pub fn new(base_url: &str, request_timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(request_timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            make_url: make_url(base_url),
        }
    }

    pub fn make_url(&self) -> &str {
        &self.make_url
    }
}

#[async_trait]
impl BuildService for HttpBuildService {
    async fn request(&self, request: &BuildRequest) -> MakerResult<BuildOutcome> {
        let agent = self.agent.clone();
        let url = self.make_url.clone();
        let payload = request.payload.clone();
        let bearer = request.bearer.clone();

        debug!(key = %request.key.key, hash = %request.key.hash, url = %url, "Sending build request");

        let (status, body) = tokio::task::spawn_blocking(move || {
            let mut call = agent.post(url.as_str());
            if let Some(bearer) = bearer {
                call = call.header("authorization", bearer.as_str());
            }

            let mut response = call
                .send_json(&payload)
                .map_err(|e| MakerError::BuildTransport(e.to_string()))?;
            let status = response.status().as_u16();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| MakerError::BuildTransport(e.to_string()))?;

            Ok::<_, MakerError>((status, body))
        })
        .await
        .map_err(|e| MakerError::BuildTransport(format!("request task failed: {}", e)))??;

        debug!(hash = %request.key.hash, status, "Build service responded");
        Ok(BuildOutcome::from_response(status, &body))
    }
}

/// Join the base URL and the `make` endpoint with exactly one slash
fn make_url(base_url: &str) -> String {
    format!("{}/make", base_url.trim_end_matches('/'))
}
