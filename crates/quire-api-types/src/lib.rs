//! Wire types for the blog admin REST API.
//!
//! Field names follow the backend's camelCase JSON. Every successful response is wrapped
//! in an [`ApiEnvelope`]; every failure carries an [`ApiErrorBody`].

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Message used when a request never produced a response.
pub const UNAVAILABLE_MESSAGE: &str = "Network error or server unavailable";

/// Success wrapper shared by every admin endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    pub data: T,
    #[serde(default)]
    pub timestamp: String,
}

/// Failure body shared by every admin endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default)]
    pub success: bool,
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub timestamp: String,
}

impl ApiErrorBody {
    pub fn new(status_code: u16, message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            status_code,
            message: message.into(),
            error,
            timestamp: now_rfc3339(),
        }
    }

    /// Shape given to transport failures (timeouts, refused connections, broken bodies).
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::new(500, UNAVAILABLE_MESSAGE, Some(detail.into()))
    }
}

/// Canonical article as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: String,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub reading_time: u32,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(rename = "__v", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

/// Body of `POST /admin/blogs` and `PUT /admin/blogs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePayload {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArticleList {
    pub blogs: Vec<ArticleRecord>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginGrant {
    pub authenticated: bool,
    pub token: String,
    #[serde(default)]
    pub message: String,
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const RECORD_JSON: &str = r#"{
        "_id": "66a1f0c2e4b0a1b2c3d4e5f6",
        "title": "Understanding Ownership",
        "slug": "understanding-ownership",
        "excerpt": "Borrowing without tears",
        "content": "<p>Hello</p>",
        "category": "backend",
        "tags": ["rust", "memory"],
        "author": "Admin",
        "publishedAt": "2024-03-01T09:00:00.000Z",
        "readingTime": 4,
        "isPublished": true,
        "views": 120,
        "likes": 7,
        "skills": [],
        "createdAt": "2024-02-28T10:00:00.000Z",
        "updatedAt": "2024-03-01T09:00:00.000Z",
        "__v": 0
    }"#;

    #[test]
    fn record_accepts_backend_shape() {
        let record: ArticleRecord = serde_json::from_str(RECORD_JSON).expect("record");
        assert_eq!(record.id, "66a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(record.tags, vec!["rust".to_string(), "memory".to_string()]);
        assert_eq!(record.published_at, Some(datetime!(2024-03-01 09:00:00 UTC)));
        assert!(record.featured_image.is_none());
        assert_eq!(record.version, Some(0));
    }

    #[test]
    fn payload_omits_unset_optionals() {
        let payload = ArticlePayload {
            title: "T".into(),
            excerpt: "E".into(),
            content: "C".into(),
            featured_image: None,
            category: "backend".into(),
            tags: vec![],
            author: "Admin".into(),
            is_published: false,
            seo_title: Some("T".into()),
            seo_description: Some("E".into()),
            published_at: None,
        };
        let value = serde_json::to_value(&payload).expect("json");
        let object = value.as_object().expect("object");
        assert!(!object.contains_key("featuredImage"));
        assert!(!object.contains_key("publishedAt"));
        assert_eq!(object["isPublished"], serde_json::Value::Bool(false));
        assert_eq!(object["seoTitle"], serde_json::Value::from("T"));
    }

    #[test]
    fn payload_serializes_schedule_as_rfc3339() {
        let payload = ArticlePayload {
            title: "T".into(),
            excerpt: "E".into(),
            content: "C".into(),
            featured_image: Some("https://img.example/x.png".into()),
            category: "backend".into(),
            tags: vec!["rust".into()],
            author: "Admin".into(),
            is_published: true,
            seo_title: None,
            seo_description: None,
            published_at: Some(datetime!(2030-01-02 03:04:05 UTC)),
        };
        let value = serde_json::to_value(&payload).expect("json");
        assert_eq!(value["publishedAt"], serde_json::Value::from("2030-01-02T03:04:05Z"));
        assert_eq!(value["featuredImage"], serde_json::Value::from("https://img.example/x.png"));
    }

    #[test]
    fn error_body_tolerates_missing_fields() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"statusCode":404,"message":"Blog not found"}"#)
                .expect("error body");
        assert_eq!(body.status_code, 404);
        assert_eq!(body.message, "Blog not found");
        assert!(!body.success);
        assert!(body.error.is_none());
    }

    #[test]
    fn unavailable_body_uses_generic_message() {
        let body = ApiErrorBody::unavailable("connection refused");
        assert_eq!(body.status_code, 500);
        assert_eq!(body.message, UNAVAILABLE_MESSAGE);
        assert_eq!(body.error.as_deref(), Some("connection refused"));
        assert!(!body.timestamp.is_empty());
    }
}
