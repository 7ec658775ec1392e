//! CLI argument parsing via clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tint::{Accent, Mode};

/// Manage accent and light/dark preferences and emit the preboot script.
#[derive(Debug, Parser)]
#[command(name = "tint", version)]
pub struct Args {
    /// YAML configuration file (storage keys and default theme).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// JSON file holding the persisted preference.
    #[arg(
        long = "store",
        global = true,
        default_value = ".tint/preferences.json"
    )]
    pub store: PathBuf,

    /// Override the default accent from the configuration.
    #[arg(long = "default-accent", global = true)]
    pub default_accent: Option<String>,

    /// Override the default mode from the configuration.
    #[arg(long = "default-mode", global = true)]
    pub default_mode: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the inline preboot script for server-rendered pages.
    Script {
        /// Wrap the script in a <script> element.
        #[arg(long)]
        tag: bool,

        /// CSP nonce for the <script> element (implies --tag).
        #[arg(long)]
        nonce: Option<String>,
    },

    /// Show the stored preference and the appearance it renders.
    Show {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Update the stored preference. Omitted fields keep their value.
    Set {
        #[arg(long)]
        accent: Option<Accent>,

        #[arg(long)]
        mode: Option<Mode>,
    },

    /// Resolve a mode to light or dark. Defaults to the stored mode.
    Resolve { mode: Option<Mode> },

    /// List the known accents and modes.
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_parses_typed_values() {
        let args = Args::parse_from(["tint", "set", "--accent", "rose", "--mode", "dark"]);
        match args.command {
            Command::Set { accent, mode } => {
                assert_eq!(accent, Some(Accent::Rose));
                assert_eq!(mode, Some(Mode::Dark));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn set_rejects_unknown_accent() {
        let err = Args::try_parse_from(["tint", "set", "--accent", "teal"]).unwrap_err();
        assert!(err.to_string().contains("unknown accent 'teal'"));
    }

    #[test]
    fn global_options_after_subcommand() {
        let args = Args::parse_from(["tint", "show", "--store", "/tmp/p.json", "-vv"]);
        assert_eq!(args.store, PathBuf::from("/tmp/p.json"));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn store_has_default() {
        let args = Args::parse_from(["tint", "list"]);
        assert_eq!(args.store, PathBuf::from(".tint/preferences.json"));
        assert!(args.config.is_none());
    }

    #[test]
    fn resolve_mode_is_optional() {
        let args = Args::parse_from(["tint", "resolve"]);
        assert!(matches!(args.command, Command::Resolve { mode: None }));
    }
}
