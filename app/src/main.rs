use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use login_app::config::Cli;
use login_app::notify::{self, ConsoleNotifier};
use login_app::{logger, App};
use login_core::{Field, LoginForm, SubmitOutcome};
use serde_json::json;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logger::init(cli.verbose)?;

    let app = App::new(&cli.settings, Arc::new(ConsoleNotifier::stderr()));
    app.logger.log(
        "request layer ready",
        Some(&json!({"baseUrl": app.client.base_url(), "env": cli.settings.env.to_string()})),
    );

    let mut form = LoginForm::new();
    form.set_username(cli.username);
    form.set_password(cli.password);
    if cli.remember {
        form.set_remember(true);
    }

    match form.submit(&app.login) {
        SubmitOutcome::Completed(Ok(envelope)) => {
            app.logger.info(
                &envelope.message,
                Some(&json!({"expires_in": envelope.data.expires_in})),
            );
            notify::success(std::io::stdout().lock(), &envelope)?;
            Ok(ExitCode::SUCCESS)
        }
        // Already surfaced through the notifier and the error log.
        SubmitOutcome::Completed(Err(_)) => Ok(ExitCode::FAILURE),
        SubmitOutcome::Invalid(_) => {
            for field in [Field::Username, Field::Password] {
                if let Some(help) = form.field_error(field) {
                    eprintln!("{field}: {help}");
                }
            }
            Ok(ExitCode::FAILURE)
        }
        SubmitOutcome::Busy => Ok(ExitCode::FAILURE),
    }
}
