#![deny(clippy::all, clippy::pedantic)]

use quire_api_types::ArticleRecord;
use serde::Serialize;
use tracing::{debug, info};

use crate::application::editor::{
    AfterSubmit, EditorSession, HydrationOutcome, Notification, SubmitAction, SubmitOutcome,
};
use crate::application::error::AppError;
use crate::application::gateway::ArticleGateway;
use crate::cli::io::{parse_time_opt, read_opt_value};
use crate::cli::print::{print_json, print_notification};
use crate::config::{ArticlesCmd, EditFields, Settings};
use crate::domain::draft::FieldEdit;
use crate::infra::http::HttpGateway;

const SOURCE: &str = "quire::articles";
const MAX_PAGE_SIZE: u32 = 1000;

pub async fn handle(
    gateway: &HttpGateway,
    settings: &Settings,
    cmd: ArticlesCmd,
) -> Result<(), AppError> {
    let author = settings.editor.default_author.as_str();
    match cmd {
        ArticlesCmd::List { page, limit } => list(gateway, page, limit).await,
        ArticlesCmd::Show { id } => show(gateway, &id).await,
        ArticlesCmd::Create { fields, action } => {
            create(gateway, author, fields, action.into()).await
        }
        ArticlesCmd::Edit { id, fields, action } => {
            edit(gateway, author, id, fields, action.map(Into::into)).await
        }
        ArticlesCmd::Delete { id } => delete(gateway, &id).await,
    }
}

async fn list(gateway: &HttpGateway, page: u32, limit: u32) -> Result<(), AppError> {
    if page == 0 {
        return Err(AppError::validation("--page must be at least 1"));
    }
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(AppError::validation(format!(
            "--limit must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    let list = gateway.list_articles(page, limit).await?;
    print_json(&list)
}

async fn show(gateway: &HttpGateway, id: &str) -> Result<(), AppError> {
    let record = gateway.fetch_article(id).await?;
    print_json(&record)
}

async fn delete(gateway: &HttpGateway, id: &str) -> Result<(), AppError> {
    gateway.delete_article(id).await?;
    info!(target = SOURCE, id, "article deleted");
    print_json(&serde_json::json!({ "deleted": id }))
}

/// Run a create session: apply edits to an empty draft and submit once.
pub async fn create<G>(
    gateway: &G,
    author: &str,
    fields: EditFields,
    action: SubmitAction,
) -> Result<(), AppError>
where
    G: ArticleGateway + ?Sized,
{
    let mut session = EditorSession::create(author);
    apply_fields(&mut session, fields)?;
    finish(session.submit(gateway, action).await)
}

/// Run an edit session: hydrate from the stored article, apply edits, submit once.
///
/// Without an explicit action the article keeps its current published state.
pub async fn edit<G>(
    gateway: &G,
    author: &str,
    id: String,
    fields: EditFields,
    action: Option<SubmitAction>,
) -> Result<(), AppError>
where
    G: ArticleGateway + ?Sized,
{
    let mut session = EditorSession::edit(id, author);
    let outcome = session.load(gateway).await?;
    if outcome != HydrationOutcome::Applied {
        return Err(AppError::unexpected(format!(
            "article `{id}` was not loaded ({outcome:?})",
            id = session.mode().article_id().unwrap_or_default()
        )));
    }
    let action = action.unwrap_or_else(|| {
        if session.draft().lifecycle().is_published() {
            SubmitAction::Publish
        } else {
            SubmitAction::SaveDraft
        }
    });
    apply_fields(&mut session, fields)?;
    finish(session.submit(gateway, action).await)
}

/// Apply command-line edits in a fixed order: fields, then tag additions, removals, toggles.
pub fn apply_fields(session: &mut EditorSession, fields: EditFields) -> Result<(), AppError> {
    let EditFields {
        title,
        excerpt,
        content,
        content_file,
        category,
        author,
        featured_image,
        published_at,
        clear_published_at,
        seo_title,
        seo_description,
        tags,
        remove_tags,
        toggle_suggestions,
    } = fields;

    let content = read_opt_value(content, content_file.as_deref())?;
    let published_at = if clear_published_at {
        Some(None)
    } else {
        parse_time_opt(published_at.as_deref())?.map(Some)
    };

    let edits = [
        title.map(FieldEdit::Title),
        excerpt.map(FieldEdit::Excerpt),
        content.map(FieldEdit::Content),
        category.map(FieldEdit::Category),
        author.map(FieldEdit::Author),
        featured_image
            .map(|url| FieldEdit::FeaturedImage((!url.trim().is_empty()).then_some(url))),
        published_at.map(FieldEdit::PublishedAt),
        seo_title.map(|value| FieldEdit::SeoTitle(Some(value))),
        seo_description.map(|value| FieldEdit::SeoDescription(Some(value))),
    ];
    for edit in edits.into_iter().flatten() {
        session.set_field(edit)?;
    }

    for tag in &tags {
        if !session.add_tag(tag)? {
            debug!(target = SOURCE, tag = tag.as_str(), "tag skipped: blank or duplicate");
        }
    }
    for tag in &remove_tags {
        if !session.remove_tag(tag)? {
            debug!(target = SOURCE, tag = tag.as_str(), "tag not present");
        }
    }
    for tag in &toggle_suggestions {
        session.toggle_suggestion(tag)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct SavedView<'a> {
    notification: &'a Notification,
    next: AfterSubmit,
    article: &'a ArticleRecord,
}

fn finish(outcome: SubmitOutcome) -> Result<(), AppError> {
    match outcome {
        SubmitOutcome::Saved {
            record,
            notification,
            next,
        } => print_json(&SavedView {
            notification: &notification,
            next,
            article: &record,
        }),
        SubmitOutcome::Blocked(report) => Err(AppError::validation(report.to_string())),
        SubmitOutcome::Failed {
            error,
            notification,
        } => {
            print_notification(&notification);
            Err(error.into())
        }
    }
}
