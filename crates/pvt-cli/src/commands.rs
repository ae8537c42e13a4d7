//! Subcommand bodies
//!
//! Each command drives an open [`EditingSession`] the way the interactive
//! table would and returns the text to print.

use anyhow::{anyhow, Context, Result};
use pvt_gateway::{migrate_user, MigrationReport, RowStore};
use pvt_matrix::{PrepositionSchema, SchemaMigration, VerbRow};
use pvt_session::{EditingSession, ExampleFetch, Notice, NoticeLevel};
use std::fmt::Write as _;

fn column_of(schema: &PrepositionSchema, preposition: &str) -> Result<usize> {
    schema.position(preposition).ok_or_else(|| {
        anyhow!(
            "unknown preposition '{}' (expected one of: {})",
            preposition,
            schema.labels().join(", ")
        )
    })
}

/// Rows with their filled meanings, one verb per block
#[must_use]
pub fn render_rows(rows: &[VerbRow], schema: &PrepositionSchema) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(out, "{} ({}/{})", row.verb, row.filled(), schema.len());
        for (label, meaning) in schema.labels().iter().zip(&row.meanings) {
            if !meaning.is_empty() {
                let _ = writeln!(out, "  {label:<8} {meaning}");
            }
        }
    }
    out
}

/// Notices as printable lines
#[must_use]
pub fn render_notices(notices: &[Notice]) -> String {
    let mut out = String::new();
    for notice in notices {
        let marker = match notice.level {
            NoticeLevel::Info => "*",
            NoticeLevel::Error => "!",
        };
        let _ = writeln!(out, "{marker} {}: {}", notice.title, notice.description);
    }
    out
}

/// `list [VERB]`
///
/// # Errors
/// Fails when `verb` is given but not present
pub fn list(session: &EditingSession, verb: Option<&str>) -> Result<String> {
    let rows = match verb {
        Some(verb) => vec![session
            .row(verb)
            .ok_or_else(|| anyhow!("no verb named '{verb}'"))?],
        None => session.rows(),
    };
    Ok(render_rows(&rows, session.schema()))
}

/// `add VERB`
///
/// # Errors
/// Validation and duplicate failures
pub async fn add(session: &EditingSession, verb: &str) -> Result<String> {
    let filled = session.add_verb(verb).await?;
    Ok(format!(
        "Added '{}' with {} of {} translations",
        verb.trim(),
        filled,
        session.schema().len()
    ))
}

/// `set VERB PREPOSITION MEANING`
///
/// # Errors
/// Unknown verb or preposition, or an over-long meaning
pub fn set(session: &EditingSession, verb: &str, preposition: &str, meaning: &str) -> Result<String> {
    let column = column_of(session.schema(), preposition)?;
    session.begin_cell_edit(verb, column)?;
    if let Err(e) = session.commit_cell_edit(meaning) {
        session.cancel_cell_edit();
        return Err(e.into());
    }
    Ok(format!("{verb} {preposition}: {meaning}"))
}

/// `rename OLD NEW`
///
/// # Errors
/// Unknown verb, invalid or duplicate new name
pub async fn rename(session: &EditingSession, old: &str, new: &str) -> Result<String> {
    session.begin_rename(old)?;
    if let Err(e) = session.commit_rename(new).await {
        session.cancel_rename();
        return Err(e.into());
    }
    Ok(format!("Renamed '{old}' to '{}'", new.trim()))
}

/// `delete VERB`
pub async fn delete(session: &EditingSession, verb: &str) -> Result<String> {
    if session.delete_verb(verb).await {
        Ok(format!("Deleted '{verb}'"))
    } else {
        Ok(format!("No verb named '{verb}'"))
    }
}

/// `example VERB PREPOSITION`
///
/// # Errors
/// Unknown verb or preposition
pub async fn example(session: &EditingSession, verb: &str, preposition: &str) -> Result<String> {
    let column = column_of(session.schema(), preposition)?;
    match session.fetch_example(verb, column).await? {
        ExampleFetch::Ready(sentences) => {
            let mut out = sentences.primary;
            for line in sentences.secondary {
                out.push_str("\n  ");
                out.push_str(&line);
            }
            Ok(out)
        }
        ExampleFetch::InFlight => Ok("Example is already being generated".to_string()),
    }
}

/// `migrate`
///
/// # Errors
/// Fails when the user's rows cannot be read
pub async fn migrate(store: &dyn RowStore, user_id: &str) -> Result<MigrationReport> {
    let migration = SchemaMigration::up_with_and_forward();
    migrate_user(store, user_id, &migration)
        .await
        .with_context(|| format!("migrating rows for {user_id}"))
}

/// Migration report as one line
#[must_use]
pub fn render_report(report: &MigrationReport) -> String {
    format!(
        "migrated {}, already current {}, skipped {}, failed {}",
        report.migrated, report.already_current, report.skipped, report.failed
    )
}
