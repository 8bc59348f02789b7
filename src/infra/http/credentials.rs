//! Admin token sources and the header scheme used to present them.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};

use crate::infra::error::InfraError;

const INTERNAL_TOKEN_HEADER: &str = "x-internal-token";

/// Supplies the admin token attached to every admin request.
pub trait CredentialProvider: Send + Sync + fmt::Debug {
    fn token(&self) -> Result<String, InfraError>;
}

#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl CredentialProvider for StaticToken {
    fn token(&self) -> Result<String, InfraError> {
        Ok(self.0.clone())
    }
}

/// Reads the token from disk on each request, so a rotated file is picked up.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialProvider for TokenFile {
    fn token(&self) -> Result<String, InfraError> {
        let raw = fs::read_to_string(&self.path).map_err(|err| {
            InfraError::credentials(format!(
                "failed to read token file {}: {err}",
                self.path.display()
            ))
        })?;
        let token = raw.trim();
        if token.is_empty() {
            return Err(InfraError::credentials(format!(
                "token file {} is empty",
                self.path.display()
            )));
        }
        Ok(token.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn token(&self) -> Result<String, InfraError> {
        Err(InfraError::credentials("no admin token configured"))
    }
}

/// Pick a provider: a token file wins over an inline token.
pub fn from_sources(
    token_file: Option<PathBuf>,
    token: Option<String>,
) -> Box<dyn CredentialProvider> {
    match (token_file, token) {
        (Some(path), _) => Box::new(TokenFile::new(path)),
        (None, Some(token)) if !token.trim().is_empty() => {
            Box::new(StaticToken::new(token.trim()))
        }
        _ => Box::new(NoCredentials),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `x-internal-token: <token>`
    #[default]
    InternalToken,
    /// `Authorization: Bearer <token>`
    Bearer,
}

impl AuthScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthScheme::InternalToken => "internal-token",
            AuthScheme::Bearer => "bearer",
        }
    }

    pub fn header(self, token: &str) -> Result<(HeaderName, HeaderValue), InfraError> {
        let (name, value) = match self {
            AuthScheme::InternalToken => (
                HeaderName::from_static(INTERNAL_TOKEN_HEADER),
                HeaderValue::from_str(token),
            ),
            AuthScheme::Bearer => (AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))),
        };
        let mut value = value
            .map_err(|err| InfraError::credentials(format!("token is not a valid header: {err}")))?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}

impl FromStr for AuthScheme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "internal-token" | "internal_token" => Ok(AuthScheme::InternalToken),
            "bearer" => Ok(AuthScheme::Bearer),
            other => Err(format!(
                "unknown auth scheme `{other}` (expected internal-token or bearer)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn token_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("tmp file");
        file.write_all(contents.as_bytes()).expect("write token");
        file
    }

    #[test]
    fn token_file_takes_precedence_and_is_trimmed() {
        let file = token_file("file-token\n");
        let provider = from_sources(Some(file.path().to_path_buf()), Some("env-token".into()));
        assert_eq!(provider.token().expect("token"), "file-token");
    }

    #[test]
    fn inline_token_is_used_without_file() {
        let provider = from_sources(None, Some(" env-token ".into()));
        assert_eq!(provider.token().expect("token"), "env-token");
    }

    #[test]
    fn missing_sources_fail_on_use() {
        let provider = from_sources(None, Some("   ".into()));
        let err = provider.token().expect_err("no token");
        assert!(matches!(err, InfraError::Credentials { .. }));
    }

    #[test]
    fn empty_token_file_is_rejected() {
        let file = token_file("\n");
        let err = TokenFile::new(file.path()).token().expect_err("empty");
        assert!(err.to_string().contains("is empty"));
    }

    #[test]
    fn static_token_is_redacted_in_debug_output() {
        let provider = StaticToken::new("secret");
        assert_eq!(format!("{provider:?}"), "StaticToken(***)");
    }

    #[test]
    fn schemes_build_expected_headers() {
        let (name, value) = AuthScheme::InternalToken.header("abc").expect("header");
        assert_eq!(name.as_str(), "x-internal-token");
        assert_eq!(value.to_str().expect("ascii"), "abc");

        let (name, value) = AuthScheme::Bearer.header("abc").expect("header");
        assert_eq!(name, AUTHORIZATION);
        assert_eq!(value.to_str().expect("ascii"), "Bearer abc");
    }

    #[test]
    fn scheme_parses_config_values() {
        assert_eq!("bearer".parse::<AuthScheme>(), Ok(AuthScheme::Bearer));
        assert_eq!(
            "Internal-Token".parse::<AuthScheme>(),
            Ok(AuthScheme::InternalToken)
        );
        assert!("basic".parse::<AuthScheme>().is_err());
    }
}
