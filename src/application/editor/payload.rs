//! Conversions between stored records, editor drafts, and submit payloads.

use quire_api_types::{ArticlePayload, ArticleRecord};

use crate::domain::draft::{ArticleDraft, StoredFields};
use crate::domain::tags::TagSet;
use crate::domain::types::LifecycleState;

/// Seed a draft from a stored record, keeping the given lifecycle.
pub fn draft_from_record(record: &ArticleRecord, lifecycle: LifecycleState) -> ArticleDraft {
    ArticleDraft::restore(StoredFields {
        title: record.title.clone(),
        excerpt: record.excerpt.clone(),
        content: record.content.clone(),
        category: record.category.clone(),
        tags: record.tags.iter().collect::<TagSet>(),
        featured_image: non_blank(record.featured_image.as_deref()).map(str::to_string),
        author: record.author.clone(),
        published_at: record.published_at,
        seo_title: record.seo_title.clone(),
        seo_description: record.seo_description.clone(),
        lifecycle,
    })
}

/// Body sent to create or update an article moving to `target`.
pub fn assemble_payload(draft: &ArticleDraft, target: LifecycleState) -> ArticlePayload {
    let seo_title = non_blank(draft.seo_title()).unwrap_or(draft.title());
    let seo_description = non_blank(draft.seo_description()).unwrap_or(draft.excerpt());

    ArticlePayload {
        title: draft.title().to_string(),
        excerpt: draft.excerpt().to_string(),
        content: draft.content().to_string(),
        featured_image: non_blank(draft.featured_image()).map(str::to_string),
        category: draft.category().to_string(),
        tags: draft.tags().to_vec(),
        author: draft.author().to_string(),
        is_published: target.is_published(),
        seo_title: Some(seo_title.to_string()),
        seo_description: Some(seo_description.to_string()),
        published_at: draft.published_at(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
