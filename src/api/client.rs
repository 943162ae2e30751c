use crate::config::BasicConfig;
use crate::error::KanbanError;
use crate::navigation::Navigator;
use crate::session::SessionHandle;
use crate::utils::logging::with_redacted_json_debug;
use kanban_schema::ErrorDetail;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const API_PREFIX: &str = "/api";
const USER_AGENT: &str = concat!("kanban-client/", env!("CARGO_PKG_VERSION"));

/// The single HTTP wrapper every store goes through.
///
/// Adds the `Authorization: Token <t>` header when a session exists, tears
/// the session down on 401, maps non-2xx responses to [`KanbanError`] and
/// treats 204 as an empty success.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_base: String,
    session: SessionHandle,
    navigator: Navigator,
}

impl ApiClient {
    pub fn new(
        api_url: &Url,
        http: reqwest::Client,
        session: SessionHandle,
        navigator: Navigator,
    ) -> Self {
        let api_base = format!("{}{API_PREFIX}", api_url.as_str().trim_end_matches('/'));
        Self {
            http,
            api_base,
            session,
            navigator,
        }
    }

    /// Build the shared reqwest client from configuration.
    pub fn build_http_client(cfg: &BasicConfig) -> Result<reqwest::Client, KanbanError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .timeout(Duration::from_secs(cfg.request_timeout_secs));
        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }
        Ok(builder.build()?)
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, KanbanError> {
        Ok(Url::parse(&format!("{}{}", self.api_base, endpoint))?)
    }

    /// Perform one request. Returns `Ok(None)` for 204 No Content.
    pub async fn fetch<T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Option<T>, KanbanError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint)?;
        let mut req = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.session.token().await {
            req = req.header(AUTHORIZATION, format!("Token {token}"));
        }
        if let Some(body) = body {
            with_redacted_json_debug(body, |pretty| {
                debug!(%method, endpoint, body = %pretty, "api request body");
            });
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        debug!(%method, endpoint, %status, "api response");

        if status == StatusCode::UNAUTHORIZED {
            self.expire_session().await;
        }

        if !status.is_success() {
            let bytes = resp.bytes().await.unwrap_or_default();
            let message = error_message(status, &bytes);
            warn!(%method, endpoint, %status, message = %message, "api request failed");
            return Err(if status == StatusCode::UNAUTHORIZED {
                KanbanError::Unauthorized(message)
            } else {
                KanbanError::Api { status, message }
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = resp.bytes().await?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Like [`fetch`](Self::fetch), but the endpoint must return a body.
    async fn fetch_some<T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, KanbanError>
    where
        T: DeserializeOwned,
    {
        self.fetch(method, endpoint, body)
            .await?
            .ok_or_else(|| KanbanError::EmptyResponse(endpoint.to_string()))
    }

    pub async fn get<T>(&self, endpoint: &str) -> Result<T, KanbanError>
    where
        T: DeserializeOwned,
    {
        self.fetch_some(Method::GET, endpoint, None).await
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, KanbanError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.fetch_some(Method::POST, endpoint, Some(&body)).await
    }

    /// POST whose response body, if any, is not needed.
    pub async fn post_discard<B>(&self, endpoint: &str, body: &B) -> Result<(), KanbanError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.fetch::<IgnoredAny>(Method::POST, endpoint, Some(&body))
            .await
            .map(|_| ())
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<T, KanbanError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.fetch_some(Method::PUT, endpoint, Some(&body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<(), KanbanError> {
        self.fetch::<IgnoredAny>(Method::DELETE, endpoint, None)
            .await
            .map(|_| ())
    }

    async fn expire_session(&self) {
        if let Err(e) = self.session.clear().await {
            warn!(error = %e, "failed to clear stored session after 401");
        }
        if self.navigator.redirect_to_login().await {
            info!("session expired; redirected to login");
        }
    }
}

/// Message for a failed response: the body's `detail`, else the status
/// reason phrase.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorDetail>(body)
        .ok()
        .and_then(|detail| detail.message())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| status.as_str().to_string())
}
