#![deny(clippy::all, clippy::pedantic)]

use serde::Serialize;

use crate::application::error::AppError;
use crate::cli::print::print_json;
use crate::domain::tags::TAG_SUGGESTIONS;
use crate::domain::types::Category;

#[derive(Debug, Serialize)]
struct CategoryView {
    value: &'static str,
    label: &'static str,
}

pub fn categories() -> Result<(), AppError> {
    let views: Vec<CategoryView> = Category::ALL
        .into_iter()
        .map(|category| CategoryView {
            value: category.as_str(),
            label: category.label(),
        })
        .collect();
    print_json(&views)
}

pub fn tag_suggestions() -> Result<(), AppError> {
    print_json(&TAG_SUGGESTIONS)
}
