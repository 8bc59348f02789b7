//! Port describing the remote article store used by editor sessions.

use async_trait::async_trait;
use quire_api_types::{ApiErrorBody, ArticlePayload, ArticleRecord};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("request rejected ({}): {}", .0.status_code, .0.message)]
    Api(ApiErrorBody),
    #[error("not authorized: {}", .0.message)]
    Unauthorized(ApiErrorBody),
    #[error("{}", .0.message)]
    Unavailable(ApiErrorBody),
}

impl GatewayError {
    /// Classify a structured failure body by its status code.
    pub fn from_body(body: ApiErrorBody) -> Self {
        if body.status_code == 401 {
            Self::Unauthorized(body)
        } else {
            Self::Api(body)
        }
    }

    /// Transport failure that never produced a response.
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::Unavailable(ApiErrorBody::unavailable(detail))
    }

    pub fn body(&self) -> &ApiErrorBody {
        match self {
            GatewayError::Api(body)
            | GatewayError::Unauthorized(body)
            | GatewayError::Unavailable(body) => body,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.body().status_code
    }

    /// Server-provided message, when it carried one.
    pub fn message(&self) -> Option<&str> {
        let message = self.body().message.trim();
        (!message.is_empty()).then_some(message)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Unauthorized(_))
    }
}

/// Operations an editor session needs from the remote store.
#[async_trait]
pub trait ArticleGateway: Send + Sync {
    async fn fetch_article(&self, id: &str) -> Result<ArticleRecord, GatewayError>;

    async fn create_article(&self, payload: &ArticlePayload)
    -> Result<ArticleRecord, GatewayError>;

    async fn update_article(
        &self,
        id: &str,
        payload: &ArticlePayload,
    ) -> Result<ArticleRecord, GatewayError>;
}
