//! `phrasal-table` binary

use anyhow::Result;
use pvt_cli::commands;
use pvt_cli::config::{config_path, AppConfig, ConfigError};
use pvt_gateway::{AuthSession, EdgeFunctionClient, RestRowStore, StaticAuth};
use pvt_matrix::PrepositionSchema;
use pvt_session::{Collaborators, EditingSession};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = pvt_cli::build_cli().get_matches();

    let path = config_path(matches.get_one::<String>("config").map(String::as_str));
    let config = AppConfig::load(&path)?.with_env_overrides();
    init_logging(&config.log_level);

    let endpoint = config.service.endpoint()?;
    let store = Arc::new(RestRowStore::new(endpoint.clone(), &config.service.table)?);

    if let Some(("migrate", _)) = matches.subcommand() {
        let user_id = config
            .service
            .user_id
            .as_deref()
            .ok_or(ConfigError::Missing("service.user_id"))?;
        let report = commands::migrate(&*store, user_id).await?;
        println!("{}", commands::render_report(&report));
        if !report.is_clean() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let functions = Arc::new(
        EdgeFunctionClient::new(endpoint)?.with_functions(
            &config.service.translate_function,
            &config.service.example_function,
        ),
    );
    let auth = match &config.service.user_id {
        Some(user_id) => StaticAuth::signed_in(AuthSession::new(
            user_id,
            config.service.access_token.clone().unwrap_or_default(),
        )),
        None => StaticAuth::signed_out(),
    };

    let session = EditingSession::open(
        &auth,
        Collaborators::new(store, functions.clone(), functions),
        Arc::new(PrepositionSchema::current()),
        config.session.clone(),
    )
    .await?;

    let output = pvt_cli::dispatch(&session, &matches).await;
    if session.is_save_pending() {
        session.flush().await;
    }
    session.close();

    eprint!("{}", commands::render_notices(&session.take_notices()));
    println!("{}", output?);
    Ok(())
}
