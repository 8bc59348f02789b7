#![deny(clippy::all, clippy::pedantic)]

use tracing::info;

use crate::application::error::AppError;
use crate::cli::io::read_file;
use crate::config::LoginArgs;
use crate::infra::http::HttpGateway;

/// Print a fresh admin token. The token is never written anywhere else.
pub async fn handle(gateway: &HttpGateway, args: LoginArgs) -> Result<(), AppError> {
    let password = match (args.password_file, args.password_env) {
        (Some(path), _) => read_file(&path)?
            .trim_end_matches(['\r', '\n'])
            .to_string(),
        (None, Some(password)) => password,
        (None, None) => {
            return Err(AppError::validation(
                "admin password is required (use --password-file or QUIRE_ADMIN_PASSWORD)",
            ));
        }
    };
    if password.is_empty() {
        return Err(AppError::validation("admin password must not be empty"));
    }

    let grant = gateway.login(&password).await?;
    if !grant.authenticated || grant.token.trim().is_empty() {
        return Err(AppError::validation(format!(
            "login was not accepted: {}",
            grant.message
        )));
    }
    info!(target = "quire::login", "admin token issued");
    println!("{}", grant.token);
    Ok(())
}
