//! Subcommands against in-memory collaborators

use pretty_assertions::assert_eq;
use pvt_cli::{build_cli, commands, dispatch};
use pvt_gateway::InMemoryRowStore;
use pvt_matrix::SchemaVersion;
use pvt_session::{Collaborators, EditingSession, Notice, SessionConfig};
use pvt_test_utils::{
    current_schema, signed_in, stored_row, ScriptedExamples, ScriptedTranslator, TEST_USER,
};
use std::sync::Arc;

async fn session_with(store: Arc<InMemoryRowStore>) -> EditingSession {
    EditingSession::open(
        &signed_in(),
        Collaborators::new(
            store,
            Arc::new(ScriptedTranslator::new().answer("up", "Buscar")),
            Arc::new(ScriptedExamples::returning("Look it up. | I looked it up.")),
        ),
        current_schema(),
        SessionConfig::new().with_seed_new_users(false),
    )
    .await
    .unwrap()
}

async fn run(session: &EditingSession, args: &[&str]) -> anyhow::Result<String> {
    let matches = build_cli()
        .try_get_matches_from(std::iter::once("phrasal-table").chain(args.iter().copied()))
        .unwrap();
    dispatch(session, &matches).await
}

#[tokio::test]
async fn add_then_list_shows_filled_meanings() {
    let store = Arc::new(InMemoryRowStore::new());
    let session = session_with(store.clone()).await;

    let out = run(&session, &["add", "Look"]).await.unwrap();
    assert_eq!(out, "Added 'Look' with 1 of 20 translations");

    let listed = run(&session, &["list", "Look"]).await.unwrap();
    assert_eq!(listed, "Look (1/20)\n  Up       Buscar\n");

    session.flush().await;
    assert_eq!(store.get(TEST_USER, "Look").unwrap().meanings[17], "Buscar");
}

#[tokio::test]
async fn set_resolves_preposition_case_insensitively() {
    let store = Arc::new(InMemoryRowStore::with_rows([stored_row(
        "Put",
        20,
        Some(SchemaVersion::CURRENT),
    )]));
    let session = session_with(store).await;

    run(&session, &["set", "Put", "up with", "Tolerar"]).await.unwrap();
    let row = session.row("Put").unwrap();
    assert_eq!(row.meanings[18], "Tolerar");

    let err = run(&session, &["set", "Put", "Beneath", "x"]).await.unwrap_err();
    assert!(err.to_string().contains("unknown preposition 'Beneath'"));
    session.close();
}

#[tokio::test]
async fn rename_and_delete_report_outcomes() {
    let store = Arc::new(InMemoryRowStore::with_rows([
        stored_row("Look", 20, Some(SchemaVersion::CURRENT)),
        stored_row("Take", 20, Some(SchemaVersion::CURRENT)),
    ]));
    let session = session_with(store).await;

    assert!(run(&session, &["rename", "Look", "Take"]).await.is_err());
    assert_eq!(
        run(&session, &["rename", "Look", "Watch"]).await.unwrap(),
        "Renamed 'Look' to 'Watch'"
    );
    assert_eq!(run(&session, &["delete", "Take"]).await.unwrap(), "Deleted 'Take'");
    assert_eq!(
        run(&session, &["delete", "Take"]).await.unwrap(),
        "No verb named 'Take'"
    );
    session.close();
}

#[tokio::test]
async fn example_prints_primary_then_secondary() {
    let store = Arc::new(InMemoryRowStore::with_rows([stored_row(
        "Look",
        20,
        Some(SchemaVersion::CURRENT),
    )]));
    let session = session_with(store).await;

    let out = run(&session, &["example", "Look", "Up"]).await.unwrap();
    assert_eq!(out, "Look it up.\n  I looked it up.");
}

#[tokio::test]
async fn migrate_command_reports_counts() {
    let store = InMemoryRowStore::with_rows([
        stored_row("Look", 18, None),
        stored_row("Ask", 20, Some(SchemaVersion::CURRENT)),
    ]);

    let report = commands::migrate(&store, TEST_USER).await.unwrap();
    assert_eq!(
        commands::render_report(&report),
        "migrated 1, already current 1, skipped 0, failed 0"
    );
}

#[test]
fn notices_render_with_level_markers() {
    let out = commands::render_notices(&[
        Notice::info("Deleted", "Look has been removed"),
        Notice::error("Failed to save changes"),
    ]);
    assert_eq!(
        out,
        "* Deleted: Look has been removed\n! Error: Failed to save changes\n"
    );
}

#[test]
fn cli_requires_a_subcommand() {
    assert!(build_cli().try_get_matches_from(["phrasal-table"]).is_err());
    assert!(build_cli()
        .try_get_matches_from(["phrasal-table", "set", "Look"])
        .is_err());
}
