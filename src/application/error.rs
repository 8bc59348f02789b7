use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    application::{editor::EditorError, gateway::GatewayError},
    config::LoadError,
    infra::error::InfraError,
};

/// Flattened error chain, outermost message first.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::from_error("application::error::AppError", self)
    }

    /// Short advice printed after the error, when there is any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Gateway(err) | AppError::Editor(EditorError::Load(err))
                if err.is_unauthorized() =>
            {
                Some("the admin token was rejected; run `quire login` and retry")
            }
            AppError::Gateway(GatewayError::Unavailable(_))
            | AppError::Editor(EditorError::Load(GatewayError::Unavailable(_))) => {
                Some("check that the API is reachable at the configured base URL")
            }
            AppError::Infra(InfraError::Credentials { .. }) => {
                Some("provide a token with --token-file, QUIRE_TOKEN_FILE or QUIRE_TOKEN")
            }
            _ => None,
        }
    }
}
