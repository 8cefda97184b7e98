// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Transport for the Runtime sampler endpoints.
//!
//! [`IbmBackend`](super::IbmBackend) only talks to [`IbmHttpClient`]; the
//! reqwest implementation is compiled in with the `ibm` feature.

use async_trait::async_trait;

use crate::error::BackendError;

use super::{IbmJobRequest, IbmJobResult};

/// Sampler job operations used by the backend.
#[async_trait]
pub trait IbmHttpClient: Send + Sync {
    /// Queue a sampler job and return its id.
    async fn submit_job(&self, request: &IbmJobRequest) -> Result<String, BackendError>;

    /// Fetch status and, once finished, counts for a job.
    async fn get_job_result(&self, job_id: &str) -> Result<IbmJobResult, BackendError>;

    /// Succeeds if the API accepts the token.
    async fn check_health(&self) -> Result<(), BackendError>;
}

#[cfg(feature = "ibm")]
mod http {
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::{RequestBuilder, Response, StatusCode};
    use secrecy::{ExposeSecret, SecretString};
    use tracing::debug;

    use super::IbmHttpClient;
    use crate::backend::ibm::{IbmJobRequest, IbmJobResponse, IbmJobResult};
    use crate::error::BackendError;

    const JOBS_PATH: &str = "/v1/jobs";
    const BACKENDS_PATH: &str = "/v1/backends";
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// reqwest client holding the Runtime API token.
    pub struct ReqwestIbmClient {
        client: reqwest::Client,
        base_url: String,
        token: SecretString,
    }

    impl ReqwestIbmClient {
        /// Client for the API rooted at `base_url`.
        pub fn new(base_url: &str, token: &str) -> Result<Self, BackendError> {
            let client = reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .map_err(|e| BackendError::Http(format!("cannot build Runtime client: {e}")))?;

            Ok(Self {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
                token: SecretString::from(token.to_string()),
            })
        }

        fn url(&self, path: &str) -> String {
            format!("{}{}", self.base_url, path)
        }

        async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
            let response = request
                .bearer_auth(self.token.expose_secret())
                .send()
                .await
                .map_err(|e| BackendError::Http(format!("Runtime request failed: {e}")))?;
            check_status(response).await
        }
    }

    /// Map non-success statuses onto backend errors.
    async fn check_status(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                BackendError::AuthenticationFailed(format!("Runtime rejected the token ({status})"))
            }
            StatusCode::NOT_FOUND => BackendError::NotFound(format!("Runtime resource: {body}")),
            StatusCode::TOO_MANY_REQUESTS => {
                BackendError::Unavailable(format!("Runtime rate limit hit: {body}"))
            }
            s if s.is_server_error() => BackendError::Unavailable(format!("Runtime {s}: {body}")),
            s => BackendError::InvalidRequest(format!("Runtime {s}: {body}")),
        })
    }

    #[async_trait]
    impl IbmHttpClient for ReqwestIbmClient {
        async fn submit_job(&self, request: &IbmJobRequest) -> Result<String, BackendError> {
            let response = self
                .send(self.client.post(self.url(JOBS_PATH)).json(request))
                .await?;
            let accepted: IbmJobResponse = response.json().await.map_err(|e| {
                BackendError::ExecutionFailed(format!("unreadable job acknowledgement: {e}"))
            })?;

            debug!(job_id = %accepted.id, status = %accepted.status, "Sampler job queued");
            Ok(accepted.id)
        }

        async fn get_job_result(&self, job_id: &str) -> Result<IbmJobResult, BackendError> {
            let path = format!("{JOBS_PATH}/{job_id}/results");
            let response = self.send(self.client.get(self.url(&path))).await?;
            response.json().await.map_err(|e| {
                BackendError::ExecutionFailed(format!("unreadable result for job {job_id}: {e}"))
            })
        }

        async fn check_health(&self) -> Result<(), BackendError> {
            self.send(self.client.get(self.url(BACKENDS_PATH)))
                .await
                .map(|_| ())
        }
    }
}

#[cfg(feature = "ibm")]
pub use http::ReqwestIbmClient;

/// Placeholder transport when the crate is built without `ibm`.
#[cfg(not(feature = "ibm"))]
pub struct ReqwestIbmClient;

#[cfg(not(feature = "ibm"))]
fn feature_disabled() -> BackendError {
    BackendError::NotFound("built without the `ibm` feature".into())
}

#[cfg(not(feature = "ibm"))]
impl ReqwestIbmClient {
    pub fn new(_base_url: &str, _token: &str) -> Result<Self, BackendError> {
        Err(feature_disabled())
    }
}

#[cfg(not(feature = "ibm"))]
#[async_trait]
impl IbmHttpClient for ReqwestIbmClient {
    async fn submit_job(&self, _request: &IbmJobRequest) -> Result<String, BackendError> {
        Err(feature_disabled())
    }

    async fn get_job_result(&self, _job_id: &str) -> Result<IbmJobResult, BackendError> {
        Err(feature_disabled())
    }

    async fn check_health(&self) -> Result<(), BackendError> {
        Err(feature_disabled())
    }
}

#[cfg(test)]
pub use scripted::MockIbmClient;

#[cfg(test)]
mod scripted {
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::IbmHttpClient;
    use crate::backend::ibm::{IbmJobRequest, IbmJobResult};
    use crate::error::BackendError;

    /// In-memory transport answering every poll with the same job result.
    pub struct MockIbmClient {
        pub submit_response: Result<String, BackendError>,
        pub result_response: Result<IbmJobResult, BackendError>,
        submitted: Mutex<Vec<IbmJobRequest>>,
    }

    impl MockIbmClient {
        /// Accepts every job; polls return `result`.
        pub fn returning(result: IbmJobResult) -> Self {
            Self {
                submit_response: Ok("job-0001".to_string()),
                result_response: Ok(result),
                submitted: Mutex::new(Vec::new()),
            }
        }

        /// Job requests seen so far, oldest first.
        pub fn submitted(&self) -> Vec<IbmJobRequest> {
            self.submitted.lock().clone()
        }
    }

    impl Default for MockIbmClient {
        /// A finished job that carries no circuit results.
        fn default() -> Self {
            Self::returning(IbmJobResult {
                status: "DONE".to_string(),
                results: Some(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl IbmHttpClient for MockIbmClient {
        async fn submit_job(&self, request: &IbmJobRequest) -> Result<String, BackendError> {
            self.submitted.lock().push(request.clone());
            self.submit_response.clone()
        }

        async fn get_job_result(&self, _job_id: &str) -> Result<IbmJobResult, BackendError> {
            self.result_response.clone()
        }

        async fn check_health(&self) -> Result<(), BackendError> {
            Ok(())
        }
    }
}
