//! PVT CLI - phrasal verb table from the terminal
//!
//! The binary opens an [`EditingSession`] against the configured services,
//! runs one subcommand and flushes pending saves before exiting.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;
pub mod config;

use anyhow::{anyhow, Result};
use clap::{Arg, ArgMatches, Command};
use pvt_session::EditingSession;

pub use config::{AppConfig, ConfigError, ServiceConfig};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command-line definition
#[must_use]
pub fn build_cli() -> Command {
    let verb = || Arg::new("verb").required(true).help("Base verb, e.g. Look");
    let preposition = || {
        Arg::new("preposition")
            .required(true)
            .help("Preposition column, e.g. \"Up with\"")
    };

    Command::new("phrasal-table")
        .version(VERSION)
        .about("Per-user table of phrasal verb meanings")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Path to the TOML config file"),
        )
        .subcommand(
            Command::new("list")
                .about("Show verbs and their filled meanings")
                .arg(Arg::new("verb").help("Only this verb")),
        )
        .subcommand(
            Command::new("add")
                .about("Add a verb and fetch suggested translations")
                .arg(verb()),
        )
        .subcommand(
            Command::new("set")
                .about("Set one meaning")
                .arg(verb())
                .arg(preposition())
                .arg(
                    Arg::new("meaning")
                        .required(true)
                        .help("New meaning; empty clears the cell"),
                ),
        )
        .subcommand(
            Command::new("rename")
                .about("Rename a verb")
                .arg(Arg::new("old").required(true).help("Current name"))
                .arg(Arg::new("new").required(true).help("New name")),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a verb")
                .arg(verb()),
        )
        .subcommand(
            Command::new("example")
                .about("Generate example sentences for one cell")
                .arg(verb())
                .arg(preposition()),
        )
        .subcommand(Command::new("migrate").about("Upgrade stored rows to the current column layout"))
}

fn arg<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument <{name}>"))
}

/// Run a session subcommand and return its output
///
/// # Errors
/// Whatever the subcommand reports; `migrate` is not a session command
pub async fn dispatch(session: &EditingSession, matches: &ArgMatches) -> Result<String> {
    match matches.subcommand() {
        Some(("list", args)) => {
            commands::list(session, args.get_one::<String>("verb").map(String::as_str))
        }
        Some(("add", args)) => commands::add(session, arg(args, "verb")?).await,
        Some(("set", args)) => commands::set(
            session,
            arg(args, "verb")?,
            arg(args, "preposition")?,
            arg(args, "meaning")?,
        ),
        Some(("rename", args)) => {
            commands::rename(session, arg(args, "old")?, arg(args, "new")?).await
        }
        Some(("delete", args)) => commands::delete(session, arg(args, "verb")?).await,
        Some(("example", args)) => {
            commands::example(session, arg(args, "verb")?, arg(args, "preposition")?).await
        }
        Some((other, _)) => Err(anyhow!("'{other}' does not run in a session")),
        None => Err(anyhow!("no subcommand given")),
    }
}
