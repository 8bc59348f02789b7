//! In-progress article owned by a single editor session.

use serde::Serialize;
use time::OffsetDateTime;

use super::reading_time::reading_time;
use super::tags::TagSet;
use super::types::{Category, LifecycleState};

/// A single user edit. Each variant names the one field it replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Title(String),
    Excerpt(String),
    Content(String),
    Category(Category),
    Author(String),
    FeaturedImage(Option<String>),
    PublishedAt(Option<OffsetDateTime>),
    SeoTitle(Option<String>),
    SeoDescription(Option<String>),
}

impl FieldEdit {
    pub fn field_name(&self) -> &'static str {
        match self {
            FieldEdit::Title(_) => "title",
            FieldEdit::Excerpt(_) => "excerpt",
            FieldEdit::Content(_) => "content",
            FieldEdit::Category(_) => "category",
            FieldEdit::Author(_) => "author",
            FieldEdit::FeaturedImage(_) => "featured_image",
            FieldEdit::PublishedAt(_) => "published_at",
            FieldEdit::SeoTitle(_) => "seo_title",
            FieldEdit::SeoDescription(_) => "seo_description",
        }
    }
}

/// Fields that must be filled before an article can go public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Title,
    Excerpt,
    Content,
    Category,
}

impl RequiredField {
    pub fn as_str(self) -> &'static str {
        match self {
            RequiredField::Title => "title",
            RequiredField::Excerpt => "excerpt",
            RequiredField::Content => "content",
            RequiredField::Category => "category",
        }
    }
}

/// Values a draft is rebuilt from, typically projected from a stored record.
#[derive(Debug, Clone)]
pub struct StoredFields {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: TagSet,
    pub featured_image: Option<String>,
    pub author: String,
    pub published_at: Option<OffsetDateTime>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub lifecycle: LifecycleState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleDraft {
    title: String,
    excerpt: String,
    content: String,
    category: String,
    tags: TagSet,
    featured_image: Option<String>,
    author: String,
    #[serde(with = "time::serde::rfc3339::option")]
    published_at: Option<OffsetDateTime>,
    seo_title: Option<String>,
    seo_description: Option<String>,
    reading_time: u32,
    lifecycle: LifecycleState,
}

impl ArticleDraft {
    pub fn empty(author: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            excerpt: String::new(),
            content: String::new(),
            category: String::new(),
            tags: TagSet::new(),
            featured_image: None,
            author: author.into(),
            published_at: None,
            seo_title: None,
            seo_description: None,
            reading_time: 0,
            lifecycle: LifecycleState::Draft,
        }
    }

    /// Rebuild a draft from stored values. Reading time is recomputed so the derived
    /// field never trusts the source.
    pub fn restore(fields: StoredFields) -> Self {
        let StoredFields {
            title,
            excerpt,
            content,
            category,
            tags,
            featured_image,
            author,
            published_at,
            seo_title,
            seo_description,
            lifecycle,
        } = fields;
        let reading_time = reading_time(&content);
        Self {
            title,
            excerpt,
            content,
            category,
            tags,
            featured_image,
            author,
            published_at,
            seo_title,
            seo_description,
            reading_time,
            lifecycle,
        }
    }

    /// Replace one field. Only content edits touch another field (reading time).
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Title(value) => self.title = value,
            FieldEdit::Excerpt(value) => self.excerpt = value,
            FieldEdit::Content(value) => {
                self.reading_time = reading_time(&value);
                self.content = value;
            }
            FieldEdit::Category(value) => self.category = value.as_str().to_string(),
            FieldEdit::Author(value) => self.author = value,
            FieldEdit::FeaturedImage(value) => self.featured_image = value,
            FieldEdit::PublishedAt(value) => self.published_at = value,
            FieldEdit::SeoTitle(value) => self.seo_title = value,
            FieldEdit::SeoDescription(value) => self.seo_description = value,
        }
    }

    /// Required fields that are still blank, in form order.
    pub fn missing_required(&self) -> Vec<RequiredField> {
        [
            (RequiredField::Title, &self.title),
            (RequiredField::Excerpt, &self.excerpt),
            (RequiredField::Content, &self.content),
            (RequiredField::Category, &self.category),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn tags_mut(&mut self) -> &mut TagSet {
        &mut self.tags
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn excerpt(&self) -> &str {
        &self.excerpt
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn featured_image(&self) -> Option<&str> {
        self.featured_image.as_deref()
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn published_at(&self) -> Option<OffsetDateTime> {
        self.published_at
    }

    pub fn seo_title(&self) -> Option<&str> {
        self.seo_title.as_deref()
    }

    pub fn seo_description(&self) -> Option<&str> {
        self.seo_description.as_deref()
    }

    pub fn reading_time(&self) -> u32 {
        self.reading_time
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }
}
