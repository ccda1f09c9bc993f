use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

pub mod config;
pub mod domain;
pub mod error;
pub mod fs;
pub mod process;
pub mod vault;

pub use config::Config;
pub use vault::Vault;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plain-text notes in a folder tree, edited with your own tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a note, optionally nested under a folder
    New { path: Option<PathBuf> },

    /// List notes and folders (default: the whole tree)
    List { path: Option<PathBuf> },

    /// Open a note in the pager
    View { path: PathBuf },

    /// Case-insensitive recursive text search
    Search { term: String, path: Option<PathBuf> },

    /// Delete a note
    Delete { path: PathBuf },

    /// Open a note in the editor
    Edit { path: PathBuf },

    /// Create a folder
    Mkdir { path: PathBuf },

    /// Delete a folder and everything in it (asks first)
    Rmdir { path: PathBuf },

    /// Open the configuration file in the editor
    Config,
}

/// Parse argv. An unrecognized command prints the usage text and yields
/// `None`; it is not a failure. Everything else follows clap's defaults.
pub fn parse_cli<I, T>(args: I) -> Option<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Some(cli),
        Err(err) if err.kind() == ErrorKind::InvalidSubcommand => {
            let _ = Cli::command().print_help();
            None
        }
        Err(err) => err.exit(),
    }
}

pub fn run(cli: Cli, vault: &Vault, config: &Config) -> error::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::New { path } => fs::create_note(vault, config, &path.unwrap_or_default()),
        Command::List { path } => fs::list_notes(vault, &path.unwrap_or_default()),
        Command::View { path } => fs::view_note(vault, config, &path),
        Command::Search { term, path } => fs::search(vault, &term, &path.unwrap_or_default()),
        Command::Delete { path } => fs::delete_note(vault, &path),
        Command::Edit { path } => fs::edit_note(vault, config, &path),
        Command::Mkdir { path } => fs::create_folder(vault, &path),
        Command::Rmdir { path } => {
            let mut stdin = io::stdin().lock();
            fs::delete_folder(vault, &path, &mut stdin)
        }
        Command::Config => fs::edit_config(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_every_command() {
        let cli = Cli::parse_from(["notebook", "new", "work"]);
        assert!(matches!(cli.command, Some(Command::New { .. })));

        let cli = Cli::parse_from(["notebook", "search", "TODO", "work"]);
        match cli.command {
            Some(Command::Search { term, path }) => {
                assert_eq!(term, "TODO");
                assert_eq!(path, Some(PathBuf::from("work")));
            }
            other => panic!("unexpected parse: {other:?}"),
        }

        let cli = Cli::parse_from(["notebook", "config"]);
        assert!(matches!(cli.command, Some(Command::Config)));
    }

    #[test]
    fn no_command_parses_as_none() {
        let cli = Cli::parse_from(["notebook"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn unrecognized_command_is_usage_not_error() {
        assert!(parse_cli(["notebook", "frobnicate"]).is_none());
    }

    #[test]
    fn recognized_command_parses_through() {
        let cli = parse_cli(["notebook", "mkdir", "work"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Mkdir { .. })));
    }

    #[test]
    fn paths_default_when_omitted() {
        let cli = Cli::parse_from(["notebook", "list"]);
        assert!(matches!(cli.command, Some(Command::List { path: None })));
    }
}
