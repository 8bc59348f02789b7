#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::Path;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::application::error::AppError;

pub fn read_file(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|err| {
        AppError::validation(format!("failed to read input file {}: {err}", path.display()))
    })
}

/// File contents win over the inline value.
pub fn read_opt_value(
    val: Option<String>,
    file: Option<&Path>,
) -> Result<Option<String>, AppError> {
    match file {
        Some(path) => read_file(path).map(Some),
        None => Ok(val),
    }
}

pub fn parse_time_opt(val: Option<&str>) -> Result<Option<OffsetDateTime>, AppError> {
    val.map(|raw| {
        OffsetDateTime::parse(raw.trim(), &Rfc3339)
            .map_err(|e| AppError::validation(format!("invalid RFC 3339 timestamp `{raw}`: {e}")))
    })
    .transpose()
}
