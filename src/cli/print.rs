#![deny(clippy::all, clippy::pedantic)]

use serde::Serialize;

use crate::application::editor::Notification;
use crate::application::error::AppError;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::unexpected(format!("failed to render output: {e}")))?;
    println!("{out}");
    Ok(())
}

/// Failure notifications go to stderr so stdout only ever carries results.
pub fn print_notification(notification: &Notification) {
    eprintln!("{}: {}", notification.title, notification.description);
}
