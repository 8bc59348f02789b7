use super::*;
use crate::application::editor::SubmitAction;
use crate::domain::types::Category;

#[test]
fn defaults_resolve_without_any_source() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
    assert_eq!(settings.api.base_url.as_str(), "http://localhost:3000/");
    assert_eq!(settings.api.prefix, "api/v1");
    assert_eq!(settings.api.timeout, Duration::from_secs(10));
    assert_eq!(settings.api.auth_scheme, AuthScheme::InternalToken);
    assert_eq!(settings.editor.default_author, "Admin");
    assert_eq!(settings.logging.level, LevelFilter::WARN);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("http://file.example".to_string());
    raw.logging.level = Some("info".to_string());

    let overrides = GlobalOverrides {
        api_base_url: Some("https://cli.example".to_string()),
        log_level: Some("debug".to_string()),
        log_json: Some(true),
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.base_url.host_str(), Some("cli.example"));
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn zero_timeout_is_rejected() {
    let mut raw = RawSettings::default();
    raw.api.timeout_seconds = Some(0);
    let err = Settings::from_raw(raw).expect_err("zero timeout");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "api.timeout_seconds",
            ..
        }
    ));
}

#[test]
fn non_http_base_url_is_rejected() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("ftp://example.com".to_string());
    let err = Settings::from_raw(raw).expect_err("ftp url");
    assert!(matches!(err, LoadError::Invalid { key: "api.base_url", .. }));
}

#[test]
fn blank_author_is_rejected() {
    let mut raw = RawSettings::default();
    raw.editor.default_author = Some("  ".to_string());
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn auth_scheme_and_prefix_are_normalized() {
    let mut raw = RawSettings::default();
    raw.api.auth_scheme = Some("Bearer".to_string());
    raw.api.prefix = Some("/api/v2/".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.api.auth_scheme, AuthScheme::Bearer);
    assert_eq!(settings.api.prefix, "api/v2");
}

#[test]
fn unknown_auth_scheme_is_rejected() {
    let mut raw = RawSettings::default();
    raw.api.auth_scheme = Some("basic".to_string());
    let err = Settings::from_raw(raw).expect_err("unknown scheme");
    assert!(err.to_string().contains("api.auth_scheme"));
}

#[test]
fn config_file_values_are_loaded() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let path = dir.path().join("quire.toml");
    std::fs::write(
        &path,
        "[api]\nbase_url = \"https://blog.example.com\"\ntimeout_seconds = 3\n\n[editor]\ndefault_author = \"Jane\"\n",
    )
    .expect("write config");

    let args = CliArgs::parse_from([
        "quire",
        "--config-file",
        path.to_str().expect("utf-8 path"),
        "categories",
    ]);
    let settings = load(&args).expect("settings");
    assert_eq!(settings.api.base_url.host_str(), Some("blog.example.com"));
    assert_eq!(settings.api.timeout, Duration::from_secs(3));
    assert_eq!(settings.editor.default_author, "Jane");
}

#[test]
fn parse_create_arguments() {
    let args = CliArgs::parse_from([
        "quire",
        "articles",
        "create",
        "--title",
        "Hello",
        "--category",
        "devops",
        "--tag",
        "rust",
        "--tag",
        "web",
        "--action",
        "publish",
    ]);

    match args.command {
        Command::Articles(ArticlesArgs {
            action: ArticlesCmd::Create { fields, action },
        }) => {
            assert_eq!(fields.title.as_deref(), Some("Hello"));
            assert_eq!(fields.category, Some(Category::Devops));
            assert_eq!(fields.tags, vec!["rust".to_string(), "web".to_string()]);
            assert_eq!(action, ActionArg::Publish);
        }
        other => panic!("wrong command parsed: {other:?}"),
    }
}

#[test]
fn category_accepts_display_labels() {
    let args = CliArgs::parse_from([
        "quire",
        "articles",
        "create",
        "--category",
        "Software Architecture",
    ]);
    match args.command {
        Command::Articles(ArticlesArgs {
            action: ArticlesCmd::Create { fields, .. },
        }) => assert_eq!(fields.category, Some(Category::Architecture)),
        other => panic!("wrong command parsed: {other:?}"),
    }
}

#[test]
fn unknown_category_is_rejected_at_parse_time() {
    let err = CliArgs::try_parse_from(["quire", "articles", "create", "--category", "gardening"])
        .expect_err("unknown category");
    assert!(err.to_string().contains("unknown category `gardening`"));
}

#[test]
fn parse_edit_arguments_without_action() {
    let args = CliArgs::parse_from([
        "quire",
        "articles",
        "edit",
        "abc123",
        "--remove-tag",
        "old",
        "--clear-published-at",
    ]);

    match args.command {
        Command::Articles(ArticlesArgs {
            action: ArticlesCmd::Edit { id, fields, action },
        }) => {
            assert_eq!(id, "abc123");
            assert_eq!(fields.remove_tags, vec!["old".to_string()]);
            assert!(fields.clear_published_at);
            assert_eq!(action, None);
        }
        other => panic!("wrong command parsed: {other:?}"),
    }
}

#[test]
fn content_and_content_file_conflict() {
    let result = CliArgs::try_parse_from([
        "quire",
        "articles",
        "create",
        "--content",
        "inline",
        "--content-file",
        "/tmp/body.html",
    ]);
    assert!(result.is_err());
}

#[test]
fn actions_map_to_submit_actions() {
    assert_eq!(SubmitAction::from(ActionArg::Draft), SubmitAction::SaveDraft);
    assert_eq!(SubmitAction::from(ActionArg::Archive), SubmitAction::Archive);
}
