//! reqwest-backed implementation of the article gateway.

use async_trait::async_trait;
use quire_api_types::{
    ApiEnvelope, ApiErrorBody, ArticleList, ArticlePayload, ArticleRecord, LoginGrant,
    LoginRequest,
};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::credentials::{AuthScheme, CredentialProvider};
use crate::application::gateway::{ArticleGateway, GatewayError};
use crate::config::ApiSettings;
use crate::infra::error::InfraError;

const SOURCE: &str = "quire::infra::http";

#[derive(Debug)]
pub struct HttpGateway {
    client: Client,
    base: Url,
    scheme: AuthScheme,
    credentials: Box<dyn CredentialProvider>,
}

impl HttpGateway {
    pub fn new(
        settings: &ApiSettings,
        credentials: Box<dyn CredentialProvider>,
    ) -> Result<Self, InfraError> {
        let base = api_root(&settings.base_url, &settings.prefix)?;
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(settings.timeout)
            .build()
            .map_err(|err| InfraError::configuration(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            base,
            scheme: settings.auth_scheme,
            credentials,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("quire/", env!("CARGO_PKG_VERSION"))
    }

    /// Fail early when the configured credentials cannot produce a token.
    pub fn check_credentials(&self) -> Result<(), InfraError> {
        let token = self.credentials.token()?;
        self.scheme.header(&token).map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn list_articles(&self, page: u32, limit: u32) -> Result<ArticleList, GatewayError> {
        let mut url = self.endpoint(&["admin", "blogs"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        let request = self.admin_request(Method::GET, url)?;
        self.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_article(&self, id: &str) -> Result<(), GatewayError> {
        let url = self.endpoint(&["admin", "blogs", id])?;
        let request = self.admin_request(Method::DELETE, url)?;
        self.send(request).await.map(|_| ())
    }

    /// Exchange the admin password for a token. No credentials are attached.
    #[instrument(skip_all)]
    pub async fn login(&self, password: &str) -> Result<LoginGrant, GatewayError> {
        let url = self.endpoint(&["admin", "auth", "login"])?;
        let body = LoginRequest {
            password: password.to_string(),
        };
        let request = self.client.request(Method::POST, url).json(&body);
        self.execute(request).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::unavailable(format!("`{}` cannot be a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn admin_request(&self, method: Method, url: Url) -> Result<RequestBuilder, GatewayError> {
        let (name, value) = self
            .credentials
            .token()
            .and_then(|token| self.scheme.header(&token))
            .map_err(|err| {
                GatewayError::Unauthorized(ApiErrorBody::new(
                    401,
                    "Admin token unavailable",
                    Some(err.to_string()),
                ))
            })?;
        Ok(self.client.request(method, url).header(name, value))
    }

    /// Send and unwrap the success envelope.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GatewayError> {
        let bytes = self.send(request).await?;
        let envelope: ApiEnvelope<T> = serde_json::from_slice(&bytes).map_err(|err| {
            warn!(target = SOURCE, error = %err, "response body did not match the envelope");
            GatewayError::unavailable(format!("failed to decode response: {err}"))
        })?;
        Ok(envelope.data)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, GatewayError> {
        let response = request.send().await.map_err(|err| {
            warn!(target = SOURCE, error = %err, "request did not complete");
            GatewayError::unavailable(err.to_string())
        })?;
        let status = response.status();
        let url = response.url().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| GatewayError::unavailable(err.to_string()))?;
        debug!(
            target = SOURCE,
            status = status.as_u16(),
            path = url.path(),
            "response received"
        );
        if status.is_success() {
            Ok(bytes.to_vec())
        } else {
            Err(failure(status, &bytes))
        }
    }
}

#[async_trait]
impl ArticleGateway for HttpGateway {
    #[instrument(skip(self))]
    async fn fetch_article(&self, id: &str) -> Result<ArticleRecord, GatewayError> {
        let url = self.endpoint(&["admin", "blogs", id])?;
        let request = self.admin_request(Method::GET, url)?;
        self.execute(request).await
    }

    #[instrument(skip_all)]
    async fn create_article(
        &self,
        payload: &ArticlePayload,
    ) -> Result<ArticleRecord, GatewayError> {
        let url = self.endpoint(&["admin", "blogs"])?;
        let request = self.admin_request(Method::POST, url)?.json(payload);
        self.execute(request).await
    }

    #[instrument(skip(self, payload))]
    async fn update_article(
        &self,
        id: &str,
        payload: &ArticlePayload,
    ) -> Result<ArticleRecord, GatewayError> {
        let url = self.endpoint(&["admin", "blogs", id])?;
        let request = self.admin_request(Method::PUT, url)?.json(payload);
        self.execute(request).await
    }
}

fn api_root(base_url: &Url, prefix: &str) -> Result<Url, InfraError> {
    if base_url.cannot_be_a_base() {
        return Err(InfraError::configuration(format!(
            "`{base_url}` cannot be used as an API base URL"
        )));
    }
    let mut root = base_url.clone();
    if !root.path().ends_with('/') {
        let path = format!("{}/", root.path());
        root.set_path(&path);
    }
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        return Ok(root);
    }
    root.join(&format!("{prefix}/"))
        .map_err(|err| InfraError::configuration(format!("invalid API prefix `{prefix}`: {err}")))
}

/// Structured error body when the server sent one, a generic one otherwise.
fn failure(status: StatusCode, bytes: &[u8]) -> GatewayError {
    let body = serde_json::from_slice::<ApiErrorBody>(bytes).unwrap_or_else(|_| {
        let text = String::from_utf8_lossy(bytes).trim().to_string();
        ApiErrorBody::new(
            status.as_u16(),
            format!("Request failed with status code {}", status.as_u16()),
            (!text.is_empty()).then_some(text),
        )
    });
    if status == StatusCode::UNAUTHORIZED {
        GatewayError::Unauthorized(body)
    } else {
        GatewayError::from_body(body)
    }
}
