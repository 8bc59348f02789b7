//! Editor session: one in-progress article, its hydration guard, and its submit flow.
//!
//! A session owns its draft exclusively. Every mutation and every submit takes
//! `&mut self`, so a second submit cannot start while one is still awaiting the gateway.

mod hydration;
mod payload;
mod transition;

use quire_api_types::ArticleRecord;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

pub use hydration::{HydrationOutcome, HydrationState};
pub use payload::{assemble_payload, draft_from_record};
pub use transition::{
    AfterSubmit, BlockReason, FALLBACK_ERROR_MESSAGE, Notification, NotificationLevel,
    SubmitAction, SubmitOutcome, ValidationReport,
};

use crate::application::gateway::{ArticleGateway, GatewayError};
use crate::domain::draft::{ArticleDraft, FieldEdit};
use crate::domain::tags::{TagToggle, is_suggestion};
use crate::domain::types::LifecycleState;

const SOURCE: &str = "quire::editor";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EditorMode {
    Create,
    Edit { id: String },
}

impl EditorMode {
    pub fn article_id(&self) -> Option<&str> {
        match self {
            EditorMode::Create => None,
            EditorMode::Edit { id } => Some(id),
        }
    }
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("the editor is not accepting input while the article is loading")]
    NotInteractive,
    #[error("the session is not editing an existing article")]
    NotEditing,
    #[error("`{tag}` is not a suggested tag")]
    UnknownSuggestion { tag: String },
    #[error("failed to load article: {0}")]
    Load(#[source] GatewayError),
}

#[derive(Debug)]
pub struct EditorSession {
    mode: EditorMode,
    hydration: HydrationState,
    draft: ArticleDraft,
    persisted: Option<ArticleRecord>,
    notification: Option<Notification>,
}

impl EditorSession {
    /// Session for a brand-new article. Interactive immediately.
    pub fn create(default_author: impl Into<String>) -> Self {
        Self {
            mode: EditorMode::Create,
            hydration: HydrationState::Empty,
            draft: ArticleDraft::empty(default_author),
            persisted: None,
            notification: None,
        }
    }

    /// Session for an existing article. Not interactive until [`Self::hydrate`] applies.
    pub fn edit(id: impl Into<String>, default_author: impl Into<String>) -> Self {
        Self {
            mode: EditorMode::Edit { id: id.into() },
            ..Self::create(default_author)
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn hydration_state(&self) -> HydrationState {
        self.hydration
    }

    pub fn draft(&self) -> &ArticleDraft {
        &self.draft
    }

    /// Last record the gateway confirmed, if any.
    pub fn persisted(&self) -> Option<&ArticleRecord> {
        self.persisted.as_ref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn is_interactive(&self) -> bool {
        match self.mode {
            EditorMode::Create => true,
            EditorMode::Edit { .. } => matches!(
                self.hydration,
                HydrationState::Hydrated | HydrationState::Editing
            ),
        }
    }

    /// Mark the fetch as in flight. Returns `false` when loading already started.
    pub fn begin_loading(&mut self) -> Result<bool, EditorError> {
        if self.mode.article_id().is_none() {
            return Err(EditorError::NotEditing);
        }
        match self.hydration.begin_loading() {
            Some(next) => {
                self.hydration = next;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Apply a fetched record once. Later resolutions are ignored and never touch the draft,
    /// and so is a record for any article other than the one being edited.
    pub fn hydrate(&mut self, record: ArticleRecord) -> HydrationOutcome {
        if !self.hydration.accepts_record() {
            debug!(
                target = SOURCE,
                state = ?self.hydration,
                id = %record.id,
                "ignoring late hydration"
            );
            return HydrationOutcome::Ignored(self.hydration);
        }
        if self.mode.article_id() != Some(record.id.as_str()) {
            warn!(
                target = SOURCE,
                expected = ?self.mode.article_id(),
                received = %record.id,
                "hydration record belongs to another article"
            );
            return HydrationOutcome::WrongArticle;
        }
        self.draft = draft_from_record(
            &record,
            LifecycleState::from_published_flag(record.is_published),
        );
        debug!(target = SOURCE, id = %record.id, "session hydrated");
        self.persisted = Some(record);
        self.hydration = HydrationState::Hydrated;
        HydrationOutcome::Applied
    }

    /// Fetch the article this session edits and hydrate from it.
    ///
    /// A session that is already hydrated or being edited does not fetch again.
    pub async fn load<G>(&mut self, gateway: &G) -> Result<HydrationOutcome, EditorError>
    where
        G: ArticleGateway + ?Sized,
    {
        let id = self
            .mode
            .article_id()
            .ok_or(EditorError::NotEditing)?
            .to_string();
        if !self.begin_loading()? && self.hydration != HydrationState::Loading {
            debug!(target = SOURCE, state = ?self.hydration, "load skipped");
            return Ok(HydrationOutcome::Ignored(self.hydration));
        }
        let record = gateway
            .fetch_article(&id)
            .await
            .map_err(EditorError::Load)?;
        Ok(self.hydrate(record))
    }

    pub fn set_field(&mut self, edit: FieldEdit) -> Result<(), EditorError> {
        self.ensure_interactive()?;
        debug!(target = SOURCE, field = edit.field_name(), "field edited");
        self.draft.apply(edit);
        self.touch();
        Ok(())
    }

    /// Returns `false` when the tag was blank or already selected.
    pub fn add_tag(&mut self, tag: &str) -> Result<bool, EditorError> {
        self.ensure_interactive()?;
        let added = self.draft.tags_mut().add(tag);
        self.touch();
        Ok(added)
    }

    pub fn remove_tag(&mut self, tag: &str) -> Result<bool, EditorError> {
        self.ensure_interactive()?;
        let removed = self.draft.tags_mut().remove(tag);
        self.touch();
        Ok(removed)
    }

    pub fn toggle_suggestion(&mut self, tag: &str) -> Result<TagToggle, EditorError> {
        self.ensure_interactive()?;
        if !is_suggestion(tag) {
            return Err(EditorError::UnknownSuggestion {
                tag: tag.trim().to_string(),
            });
        }
        let toggle = self.draft.tags_mut().toggle(tag);
        self.touch();
        Ok(toggle)
    }

    pub fn available_suggestions(&self, limit: usize) -> Vec<&'static str> {
        self.draft.tags().available_suggestions(limit)
    }

    pub fn validate(&self, action: SubmitAction) -> Result<(), ValidationReport> {
        if !self.is_interactive() {
            return Err(ValidationReport {
                action,
                reason: BlockReason::NotInteractive,
            });
        }
        transition::check(action, &self.mode, &self.draft)
    }

    pub fn can_submit(&self, action: SubmitAction) -> bool {
        self.validate(action).is_ok()
    }

    /// Validate, send one create/update request, and fold the result back into the session.
    ///
    /// Failures leave the draft as it was; the caller may submit again.
    pub async fn submit<G>(&mut self, gateway: &G, action: SubmitAction) -> SubmitOutcome
    where
        G: ArticleGateway + ?Sized,
    {
        if let Err(report) = self.validate(action) {
            debug!(target = SOURCE, %action, reason = %report, "submit blocked");
            return SubmitOutcome::Blocked(report);
        }

        let payload = assemble_payload(&self.draft, action.target());
        let result = match &self.mode {
            EditorMode::Create => gateway.create_article(&payload).await,
            EditorMode::Edit { id } => gateway.update_article(id, &payload).await,
        };

        match result {
            Ok(record) => {
                let notification = Notification::saved(&self.mode, action, &record.title);
                let next = match self.mode {
                    EditorMode::Create => AfterSubmit::StayOnPage,
                    EditorMode::Edit { .. } => AfterSubmit::ReturnToListing,
                };
                info!(target = SOURCE, %action, id = %record.id, "article saved");

                self.draft = draft_from_record(&record, action.target());
                self.mode = EditorMode::Edit {
                    id: record.id.clone(),
                };
                self.hydration = HydrationState::Hydrated;
                self.persisted = Some(record.clone());
                self.notification = Some(notification.clone());

                SubmitOutcome::Saved {
                    record: Box::new(record),
                    notification,
                    next,
                }
            }
            Err(error) => {
                warn!(
                    target = SOURCE,
                    %action,
                    status = error.status_code(),
                    error = %error,
                    "article submit failed"
                );
                let notification = Notification::failed(&self.mode, &error);
                self.notification = Some(notification.clone());
                SubmitOutcome::Failed {
                    error,
                    notification,
                }
            }
        }
    }

    fn ensure_interactive(&self) -> Result<(), EditorError> {
        if self.is_interactive() {
            Ok(())
        } else {
            Err(EditorError::NotInteractive)
        }
    }

    fn touch(&mut self) {
        self.hydration = self.hydration.after_input();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use quire_api_types::{ApiErrorBody, ArticlePayload};
    use time::OffsetDateTime;

    use super::payload::fixtures;
    use super::*;
    use crate::domain::types::Category;

    #[derive(Default)]
    struct ScriptedGateway {
        calls: Mutex<Vec<String>>,
        fail_with: Option<ApiErrorBody>,
        fetch_as: Option<String>,
    }

    impl ScriptedGateway {
        fn failing(body: ApiErrorBody) -> Self {
            Self {
                fail_with: Some(body),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("calls lock").clone()
        }

        fn respond(&self, id: &str, payload: &ArticlePayload) -> Result<ArticleRecord, GatewayError> {
            if let Some(body) = &self.fail_with {
                return Err(GatewayError::from_body(body.clone()));
            }
            let mut record = fixtures::record(id);
            record.title = payload.title.clone();
            record.content = payload.content.clone();
            record.tags = payload.tags.clone();
            record.is_published = payload.is_published;
            record.updated_at = OffsetDateTime::now_utc();
            Ok(record)
        }
    }

    #[async_trait]
    impl ArticleGateway for ScriptedGateway {
        async fn fetch_article(&self, id: &str) -> Result<ArticleRecord, GatewayError> {
            self.calls.lock().expect("calls lock").push(format!("fetch {id}"));
            Ok(fixtures::record(self.fetch_as.as_deref().unwrap_or(id)))
        }

        async fn create_article(
            &self,
            payload: &ArticlePayload,
        ) -> Result<ArticleRecord, GatewayError> {
            self.calls.lock().expect("calls lock").push("create".into());
            self.respond("new-1", payload)
        }

        async fn update_article(
            &self,
            id: &str,
            payload: &ArticlePayload,
        ) -> Result<ArticleRecord, GatewayError> {
            self.calls.lock().expect("calls lock").push(format!("update {id}"));
            self.respond(id, payload)
        }
    }

    fn filled_session() -> EditorSession {
        let mut session = EditorSession::create("Admin");
        for edit in [
            FieldEdit::Title("Hello".into()),
            FieldEdit::Excerpt("Short".into()),
            FieldEdit::Content("some words here".into()),
            FieldEdit::Category(Category::Backend),
        ] {
            session.set_field(edit).expect("create session is interactive");
        }
        session
    }

    #[test]
    fn edit_session_rejects_input_before_hydration() {
        let mut session = EditorSession::edit("a1", "Admin");
        assert!(matches!(
            session.set_field(FieldEdit::Title("x".into())),
            Err(EditorError::NotInteractive)
        ));
        assert!(!session.can_submit(SubmitAction::SaveDraft));
    }

    #[test]
    fn late_hydration_never_overwrites_user_edits() {
        let mut session = EditorSession::edit("a1", "Admin");
        assert!(session.begin_loading().expect("edit mode"));
        assert_eq!(
            session.hydrate(fixtures::record("a1")),
            HydrationOutcome::Applied
        );
        session
            .set_field(FieldEdit::Title("Changed".into()))
            .expect("interactive");
        assert_eq!(session.hydration_state(), HydrationState::Editing);

        let outcome = session.hydrate(fixtures::record("a1"));
        assert_eq!(outcome, HydrationOutcome::Ignored(HydrationState::Editing));
        assert_eq!(session.draft().title(), "Changed");
    }

    #[test]
    fn hydration_without_loading_is_ignored() {
        let mut session = EditorSession::edit("a1", "Admin");
        assert_eq!(
            session.hydrate(fixtures::record("a1")),
            HydrationOutcome::Ignored(HydrationState::Empty)
        );
        assert!(session.persisted().is_none());
    }

    #[test]
    fn record_for_another_article_is_not_applied() {
        let mut session = EditorSession::edit("a1", "Admin");
        session.begin_loading().expect("edit mode");
        assert_eq!(
            session.hydrate(fixtures::record("b2")),
            HydrationOutcome::WrongArticle
        );
        assert_eq!(session.hydration_state(), HydrationState::Loading);
        assert!(session.persisted().is_none());
        assert!(!session.is_interactive());

        assert_eq!(
            session.hydrate(fixtures::record("a1")),
            HydrationOutcome::Applied
        );
        assert_eq!(session.persisted().map(|record| record.id.as_str()), Some("a1"));
    }

    #[tokio::test]
    async fn load_rejects_a_mismatched_response() {
        let gateway = ScriptedGateway {
            fetch_as: Some("b2".into()),
            ..ScriptedGateway::default()
        };
        let mut session = EditorSession::edit("a1", "Admin");
        let outcome = session.load(&gateway).await.expect("fetch succeeds");
        assert_eq!(outcome, HydrationOutcome::WrongArticle);
        assert!(matches!(
            session.set_field(FieldEdit::Title("x".into())),
            Err(EditorError::NotInteractive)
        ));
    }

    #[tokio::test]
    async fn hydrated_session_does_not_fetch_again() {
        let gateway = ScriptedGateway::default();
        let mut session = EditorSession::edit("a1", "Admin");
        assert_eq!(
            session.load(&gateway).await.expect("load"),
            HydrationOutcome::Applied
        );
        session
            .set_field(FieldEdit::Title("Changed".into()))
            .expect("interactive");

        assert_eq!(
            session.load(&gateway).await.expect("load"),
            HydrationOutcome::Ignored(HydrationState::Editing)
        );
        assert_eq!(gateway.calls(), vec!["fetch a1"]);
        assert_eq!(session.draft().title(), "Changed");
    }

    #[tokio::test]
    async fn interrupted_load_can_be_retried() {
        let gateway = ScriptedGateway::default();
        let mut session = EditorSession::edit("a1", "Admin");
        assert!(session.begin_loading().expect("edit mode"));
        assert_eq!(
            session.load(&gateway).await.expect("load"),
            HydrationOutcome::Applied
        );
        assert_eq!(gateway.calls(), vec!["fetch a1"]);
    }

    #[test]
    fn create_session_cannot_load() {
        let mut session = EditorSession::create("Admin");
        assert!(matches!(
            session.begin_loading(),
            Err(EditorError::NotEditing)
        ));
    }

    #[test]
    fn unknown_suggestion_is_rejected() {
        let mut session = EditorSession::create("Admin");
        assert!(matches!(
            session.toggle_suggestion("rust"),
            Err(EditorError::UnknownSuggestion { .. })
        ));
        assert_eq!(
            session.toggle_suggestion("security").expect("suggested"),
            TagToggle::Added
        );
        assert!(!session.available_suggestions(20).contains(&"security"));
    }

    #[tokio::test]
    async fn blocked_publish_makes_no_gateway_call() {
        let gateway = ScriptedGateway::default();
        let mut session = EditorSession::create("Admin");
        session
            .set_field(FieldEdit::Title("Only a title".into()))
            .expect("interactive");

        let outcome = session.submit(&gateway, SubmitAction::Publish).await;
        match outcome {
            SubmitOutcome::Blocked(report) => assert_eq!(report.missing_fields().len(), 3),
            other => panic!("expected block, got {other:?}"),
        }
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn create_then_resubmit_updates_the_same_article() {
        let gateway = ScriptedGateway::default();
        let mut session = filled_session();

        let outcome = session.submit(&gateway, SubmitAction::SaveDraft).await;
        let SubmitOutcome::Saved { record, next, .. } = outcome else {
            panic!("expected save");
        };
        assert_eq!(next, AfterSubmit::StayOnPage);
        assert_eq!(session.persisted(), Some(record.as_ref()));
        assert_eq!(session.mode().article_id(), Some("new-1"));

        let outcome = session.submit(&gateway, SubmitAction::Publish).await;
        assert!(outcome.is_saved());
        assert_eq!(gateway.calls(), vec!["create", "update new-1"]);
        assert_eq!(session.draft().lifecycle(), LifecycleState::Published);
    }

    #[tokio::test]
    async fn failed_submit_keeps_draft_and_allows_retry() {
        let gateway = ScriptedGateway::failing(ApiErrorBody::new(500, "", None));
        let mut session = filled_session();
        session.add_tag("rust").expect("interactive");
        let before = session.draft().clone();

        let outcome = session.submit(&gateway, SubmitAction::Publish).await;
        let SubmitOutcome::Failed { notification, .. } = outcome else {
            panic!("expected failure");
        };
        assert_eq!(notification.description, FALLBACK_ERROR_MESSAGE);
        assert_eq!(session.draft(), &before);
        assert_eq!(session.notification(), Some(&notification));
        assert!(session.can_submit(SubmitAction::Publish));
        assert!(session.persisted().is_none());
    }

    #[tokio::test]
    async fn archive_keeps_archived_state_locally() {
        let gateway = ScriptedGateway::default();
        let mut session = EditorSession::edit("a1", "Admin");
        session.load(&gateway).await.expect("load");

        let outcome = session.submit(&gateway, SubmitAction::Archive).await;
        let SubmitOutcome::Saved {
            record,
            notification,
            next,
        } = outcome
        else {
            panic!("expected save");
        };
        assert!(!record.is_published);
        assert_eq!(next, AfterSubmit::ReturnToListing);
        assert_eq!(notification.title, "Blog updated and archived successfully");
        assert_eq!(session.draft().lifecycle(), LifecycleState::Archived);
    }
}
