//! Shared request plumbing for the reqwest-backed upstream clients.
//!
//! ## Error mapping
//!
//! | Failure | `GatewayError` |
//! |---|---|
//! | request build / connect / timeout / body read | `Transport` |
//! | non-2xx status | `Upstream` (status + truncated body) |
//! | body is not the expected JSON | `Decode` |

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use shelfgate_core::{GatewayError, GatewayResult, UpstreamService};

const MAX_ERROR_BODY: usize = 512;

/// Build the HTTP client shared by both upstreams (one connection pool).
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("shelfgate/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// One upstream service reachable at `base_url`.
#[derive(Debug, Clone)]
pub(crate) struct Upstream {
    service: UpstreamService,
    base_url: String,
    client: reqwest::Client,
}

impl Upstream {
    pub(crate) fn new(service: UpstreamService, base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            service,
            base_url,
            client,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send `req` and decode a 2xx JSON body.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> GatewayResult<T> {
        let res = self.send(req).await?;
        self.decode(res).await
    }

    /// Like [`Upstream::fetch`], but a `404` means "no such record".
    pub(crate) async fn fetch_optional<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> GatewayResult<Option<T>> {
        let res = self
            .client
            .execute(self.build(req)?)
            .await
            .map_err(|e| self.transport(e))?;

        if res.status() == StatusCode::NOT_FOUND {
            tracing::debug!(service = %self.service, url = %res.url(), "upstream has no record");
            return Ok(None);
        }

        let res = self.ensure_success(res).await?;
        self.decode(res).await.map(Some)
    }

    async fn send(&self, req: RequestBuilder) -> GatewayResult<Response> {
        let res = self
            .client
            .execute(self.build(req)?)
            .await
            .map_err(|e| self.transport(e))?;
        self.ensure_success(res).await
    }

    fn build(&self, req: RequestBuilder) -> GatewayResult<reqwest::Request> {
        let req = req
            .build()
            .map_err(|e| GatewayError::transport(self.service, format!("cannot build request: {e}")))?;
        tracing::debug!(
            service = %self.service,
            method = %req.method(),
            url = %req.url(),
            "upstream request"
        );
        Ok(req)
    }

    async fn ensure_success(&self, res: Response) -> GatewayResult<Response> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        let body: String = body.chars().take(MAX_ERROR_BODY).collect();
        Err(GatewayError::Upstream {
            service: self.service,
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(&self, res: Response) -> GatewayResult<T> {
        let bytes = res.bytes().await.map_err(|e| self.transport(e))?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::decode(self.service, e.to_string()))
    }

    fn transport(&self, err: reqwest::Error) -> GatewayError {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            err.to_string()
        };
        GatewayError::transport(self.service, message)
    }
}
