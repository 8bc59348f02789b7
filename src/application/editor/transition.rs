//! Submit actions, their gating rules, and the notifications they produce.

use std::fmt;

use quire_api_types::ArticleRecord;
use serde::Serialize;

use super::EditorMode;
use crate::application::gateway::GatewayError;
use crate::domain::draft::{ArticleDraft, RequiredField};
use crate::domain::types::LifecycleState;

pub const FALLBACK_ERROR_MESSAGE: &str = "Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitAction {
    SaveDraft,
    Publish,
    Archive,
}

impl SubmitAction {
    pub fn target(self) -> LifecycleState {
        match self {
            SubmitAction::SaveDraft => LifecycleState::Draft,
            SubmitAction::Publish => LifecycleState::Published,
            SubmitAction::Archive => LifecycleState::Archived,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubmitAction::SaveDraft => "save_draft",
            SubmitAction::Publish => "publish",
            SubmitAction::Archive => "archive",
        }
    }

    fn requires_complete_draft(self) -> bool {
        !matches!(self, SubmitAction::SaveDraft)
    }
}

impl fmt::Display for SubmitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockReason {
    MissingFields { fields: Vec<RequiredField> },
    /// Archiving needs an article that already exists remotely.
    NotPersisted,
    /// The edit form has not been hydrated yet.
    NotInteractive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub action: SubmitAction,
    pub reason: BlockReason,
}

impl ValidationReport {
    pub fn missing_fields(&self) -> &[RequiredField] {
        match &self.reason {
            BlockReason::MissingFields { fields } => fields,
            _ => &[],
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            BlockReason::MissingFields { fields } => {
                let names: Vec<&str> = fields.iter().map(|field| field.as_str()).collect();
                write!(
                    f,
                    "cannot {}: missing required fields: {}",
                    self.action,
                    names.join(", ")
                )
            }
            BlockReason::NotPersisted => {
                write!(f, "cannot {}: article has not been saved yet", self.action)
            }
            BlockReason::NotInteractive => {
                write!(f, "cannot {}: article is still loading", self.action)
            }
        }
    }
}

/// Check whether `action` may be submitted for `draft` in `mode`.
pub fn check(
    action: SubmitAction,
    mode: &EditorMode,
    draft: &ArticleDraft,
) -> Result<(), ValidationReport> {
    let block = |reason| ValidationReport { action, reason };

    if action == SubmitAction::Archive && matches!(mode, EditorMode::Create) {
        return Err(block(BlockReason::NotPersisted));
    }
    if action.requires_complete_draft() {
        let fields = draft.missing_required();
        if !fields.is_empty() {
            return Err(block(BlockReason::MissingFields { fields }));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub(crate) fn saved(mode: &EditorMode, action: SubmitAction, title: &str) -> Self {
        let (heading, verb) = match (mode, action) {
            (EditorMode::Create, SubmitAction::Publish) => {
                ("Blog published successfully", "published")
            }
            (EditorMode::Create, _) => ("Blog saved as draft successfully", "saved as a draft"),
            (EditorMode::Edit { .. }, SubmitAction::Publish) => {
                ("Blog updated and published successfully", "published")
            }
            (EditorMode::Edit { .. }, SubmitAction::Archive) => {
                ("Blog updated and archived successfully", "archived")
            }
            (EditorMode::Edit { .. }, SubmitAction::SaveDraft) => (
                "Blog updated and saved as draft successfully",
                "saved as a draft",
            ),
        };
        Self {
            level: NotificationLevel::Success,
            title: heading.to_string(),
            description: format!("Your blog post \"{title}\" has been {verb}."),
        }
    }

    pub(crate) fn failed(mode: &EditorMode, error: &GatewayError) -> Self {
        let heading = match mode {
            EditorMode::Create => "Error creating blog",
            EditorMode::Edit { .. } => "Error updating blog",
        };
        Self {
            level: NotificationLevel::Error,
            title: heading.to_string(),
            description: error.message().unwrap_or(FALLBACK_ERROR_MESSAGE).to_string(),
        }
    }
}

/// Where the caller should go after a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterSubmit {
    StayOnPage,
    ReturnToListing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved {
        record: Box<ArticleRecord>,
        notification: Notification,
        next: AfterSubmit,
    },
    Blocked(ValidationReport),
    Failed {
        error: GatewayError,
        notification: Notification,
    },
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved { .. })
    }
}
