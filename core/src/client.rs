//! Request pipeline for the Lob API.
//!
//! # Design
//! `LobClient` holds an immutable `Config` and a `Transport`, both behind
//! `Arc`, so clones are cheap and the client can be shared across threads.
//! Every call goes through three steps:
//!
//! 1. `new_request` resolves the path and attaches auth/version headers,
//! 2. `execute` runs it on the transport and classifies the status,
//! 3. `decode` turns a successful body into the caller's type.
//!
//! Resource services (`Addresses`) are compositions of these steps.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;

use crate::addresses::Addresses;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::ErrorResponse;

/// Synchronous client for the Lob API.
#[derive(Clone)]
pub struct LobClient {
    config: Arc<Config>,
    transport: Arc<dyn Transport>,
}

impl LobClient {
    /// Client backed by a `ureq` agent honouring `config.timeout`.
    pub fn new(config: Config) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }

    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Address operations.
    pub fn addresses(&self) -> Addresses<'_> {
        Addresses::new(self)
    }

    /// Build a request for `path`, resolved relative to the base URL.
    ///
    /// Relative paths should not start with a slash; one that does replaces
    /// the base URL's path.
    pub fn new_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<HttpRequest> {
        let url = self.config.base_url.join(path)?;

        let mut headers = Vec::with_capacity(5);
        if method == HttpMethod::Post {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        headers.push(("Authorization".to_string(), self.basic_auth()));
        headers.push(("Lob-Version".to_string(), self.config.api_version.clone()));
        headers.push(("Accept".to_string(), "application/json".to_string()));
        headers.push(("User-Agent".to_string(), self.config.user_agent.clone()));

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body,
        })
    }

    /// Send `request` and return the response if its status is 200.
    pub fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        tracing::debug!(status = response.status, url = %request.url, "received response");

        if let Err(err) = check_response(&response) {
            tracing::warn!(status = response.status, url = %request.url, error = %err, "request failed");
            return Err(err);
        }
        Ok(response)
    }

    /// Decode a successful response body into `T`.
    pub fn decode<T: DeserializeOwned>(&self, response: &HttpResponse) -> Result<T> {
        Ok(serde_json::from_str(&response.body)?)
    }

    fn basic_auth(&self) -> String {
        let credential = format!("{}:", self.config.api_key);
        format!("Basic {}", STANDARD.encode(credential))
    }
}

impl std::fmt::Debug for LobClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LobClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Classify a response by status code.
///
/// 200 is the only success. 404 and 500 become an `Api` error with an empty
/// message and their body is ignored; the error carries the HTTP status, so
/// it displays as `"404 "` or `"500 "`. Any other status must carry a JSON
/// error envelope; if it does not, the parse failure is returned instead.
pub fn check_response(response: &HttpResponse) -> Result<()> {
    match response.status {
        200 => Ok(()),
        404 | 500 => Err(Error::Api {
            status: response.status,
            message: String::new(),
        }),
        _ => {
            let envelope: ErrorResponse = serde_json::from_str(&response.body)?;
            Err(Error::Api {
                status: envelope.error.status_code,
                message: envelope.error.message,
            })
        }
    }
}
