#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, builder::BoolishValueParser};

use crate::application::editor::SubmitAction;
use crate::domain::types::Category;

/// Command-line arguments for the quire binary.
#[derive(Debug, Parser)]
#[command(name = "quire", version, about = "Write and publish blog articles through the admin API")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "QUIRE_CONFIG_FILE", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    /// Path to file containing the admin token (takes precedence over env)
    #[arg(long = "token-file", env = "QUIRE_TOKEN_FILE", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub token_file: Option<PathBuf>,

    /// Admin token from env (no CLI flag, keeps it out of shell history)
    #[arg(hide = true, env = "QUIRE_TOKEN")]
    pub token_env: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the API base URL, e.g. <https://blog.example.com>
    #[arg(long = "api-base-url", value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Exchange the admin password for a token and print it
    Login(LoginArgs),
    /// Article management (list/show/create/edit/delete)
    Articles(ArticlesArgs),
    /// Categories an article can be filed under
    Categories,
    /// Tags offered as one-click suggestions
    TagSuggestions,
}

#[derive(Debug, Args, Clone)]
pub struct LoginArgs {
    /// File holding the admin password
    #[arg(long = "password-file", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub password_file: Option<PathBuf>,

    /// Admin password from env
    #[arg(hide = true, env = "QUIRE_ADMIN_PASSWORD")]
    pub password_env: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ArticlesArgs {
    #[command(subcommand)]
    pub action: ArticlesCmd,
}

#[derive(Debug, Subcommand, Clone)]
pub enum ArticlesCmd {
    /// List articles, newest first
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Show one article
    Show { id: String },
    /// Create an article
    Create {
        #[command(flatten)]
        fields: EditFields,
        /// Save as draft (default) or publish
        #[arg(long, value_enum, default_value_t = ActionArg::Draft)]
        action: ActionArg,
    },
    /// Load an article, apply edits and submit it
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditFields,
        /// Defaults to publish for published articles and draft otherwise
        #[arg(long, value_enum)]
        action: Option<ActionArg>,
    },
    /// Delete an article
    Delete { id: String },
}

/// Field edits applied to the session in the order listed here.
#[derive(Debug, Args, Default, Clone)]
pub struct EditFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub excerpt: Option<String>,
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,
    /// Read content from a file
    #[arg(long = "content-file", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub content_file: Option<PathBuf>,
    /// Backend value or display label, e.g. `devops` or "Software Architecture"
    #[arg(long, value_parser = Category::from_str)]
    pub category: Option<Category>,
    #[arg(long)]
    pub author: Option<String>,
    /// Image URL; an empty value clears it
    #[arg(long = "featured-image", value_name = "URL")]
    pub featured_image: Option<String>,
    /// RFC 3339 timestamp, e.g. 2024-03-01T09:00:00Z
    #[arg(long = "published-at", value_name = "RFC3339", conflicts_with = "clear_published_at")]
    pub published_at: Option<String>,
    #[arg(long = "clear-published-at")]
    pub clear_published_at: bool,
    #[arg(long = "seo-title")]
    pub seo_title: Option<String>,
    #[arg(long = "seo-description")]
    pub seo_description: Option<String>,
    /// Add a tag (repeatable)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
    /// Remove a tag (repeatable)
    #[arg(long = "remove-tag", value_name = "TAG")]
    pub remove_tags: Vec<String>,
    /// Toggle a suggested tag (repeatable)
    #[arg(long = "toggle-suggestion", value_name = "TAG")]
    pub toggle_suggestions: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ActionArg {
    Draft,
    Publish,
    Archive,
}

impl From<ActionArg> for SubmitAction {
    fn from(value: ActionArg) -> Self {
        match value {
            ActionArg::Draft => SubmitAction::SaveDraft,
            ActionArg::Publish => SubmitAction::Publish,
            ActionArg::Archive => SubmitAction::Archive,
        }
    }
}
