//! Client for the NLP annotation server.
//!
//! Every call returns an [`ApiResult`]. Transport and HTTP failures map to a
//! generic message for the user; an `error` field reported by the server is
//! passed through verbatim. Nothing is retried.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::models::{
    EntityInfo, EntityInfoRequest, PaperView, ParseData, SearchQuery, SearchResponse,
    ServerReported, ViewerConfig,
};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Network(String),
    #[error("HTTP error {status}")]
    Http {
        status: u16,
        /// `error` field of the response body, when the server sent one.
        message: Option<String>,
    },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("{0}")]
    Server(String),
}

impl ApiError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self, context: &str) -> String {
        match self {
            ApiError::Server(msg) => msg.clone(),
            ApiError::Http {
                message: Some(msg), ..
            } => msg.clone(),
            _ => format!("An unexpected error occurred while {}.", context),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base = parse_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    pub async fn visualize(&self, pmid: &str) -> ApiResult<PaperView> {
        let req = self
            .http
            .post(self.endpoint("/visualize")?)
            .form(&[("pmid", pmid.trim())]);
        self.send(req).await
    }

    pub async fn search(&self, query: &SearchQuery) -> ApiResult<SearchResponse> {
        let mut form: Vec<(&str, &str)> = vec![("term", query.term.trim()), ("scope", query.scope.as_str())];
        if let Some(start) = query.start_date.as_deref().filter(|s| !s.is_empty()) {
            form.push(("start_date", start));
        }
        if let Some(end) = query.end_date.as_deref().filter(|s| !s.is_empty()) {
            form.push(("end_date", end));
        }
        let req = self.http.post(self.endpoint("/search")?).form(&form);
        self.send(req).await
    }

    pub async fn parse_sentence(&self, text: &str) -> ApiResult<ParseData> {
        #[derive(Serialize)]
        struct Body<'a> {
            text: &'a str,
        }
        let req = self
            .http
            .post(self.endpoint("/parse_sentence")?)
            .json(&Body { text });
        self.send(req).await
    }

    pub async fn entity_info(&self, request: &EntityInfoRequest) -> ApiResult<EntityInfo> {
        let req = self
            .http
            .post(self.endpoint("/get_entity_info")?)
            .json(request);
        self.send(req).await
    }

    pub async fn viewer_config(&self) -> ApiResult<ViewerConfig> {
        let req = self.http.get(self.endpoint("/static/config.json")?);
        self.send(req).await
    }

    async fn send<T>(&self, req: reqwest::RequestBuilder) -> ApiResult<T>
    where
        T: DeserializeOwned + ServerReported,
    {
        let response = req.send().await.map_err(|e| {
            warn!(error = %e, "backend request failed");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        let url = response.url().path().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "backend response");

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "backend returned error status");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: error_field(&body),
            });
        }

        decode_body(&body)
    }
}

fn parse_base_url(base_url: &str) -> ApiResult<Url> {
    let mut url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ApiError::InvalidUrl(format!(
            "unsupported scheme: {}",
            url.scheme()
        )));
    }
    // Url::join drops the last path segment unless it ends with '/'.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn error_field(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Decode a 2xx body, turning a populated `error` field into [`ApiError::Server`].
pub fn decode_body<T>(body: &str) -> ApiResult<T>
where
    T: DeserializeOwned + ServerReported,
{
    let value: T = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if let Some(msg) = value.server_error() {
        return Err(ApiError::Server(msg.to_string()));
    }
    Ok(value)
}
