use std::process;

use quire::{
    application::error::AppError,
    cli::handlers::{articles, login, reference},
    config::{self, Command},
    infra::{
        http::{HttpGateway, credentials},
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    let emit = || {
        error!(
            source = report.source,
            causes = ?&report.messages[1..],
            hint = error.hint(),
            "{error}"
        );
    };

    if dispatcher::has_been_set() {
        emit();
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, emit);
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let credentials = credentials::from_sources(cli_args.token_file, cli_args.token_env);
    let gateway = HttpGateway::new(&settings.api, credentials)?;

    match cli_args.command {
        Command::Login(args) => login::handle(&gateway, args).await,
        Command::Articles(args) => {
            gateway.check_credentials()?;
            articles::handle(&gateway, &settings, args.action).await
        }
        Command::Categories => reference::categories(),
        Command::TagSuggestions => reference::tag_suggestions(),
    }
}
