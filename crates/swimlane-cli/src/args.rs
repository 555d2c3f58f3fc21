//! Command-line argument definitions for the Swimlane CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global options select the configuration file and logging
//! verbosity; the [`Command`] picks what to inspect.

use clap::{Parser, Subcommand};

use swimlane::kind::ElementRole;

/// Command-line arguments for the Swimlane kind inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered element kinds
    Kinds {
        /// Only list kinds of this role (e.g. task, lane, sequence_flow)
        #[arg(short, long)]
        role: Option<ElementRole>,
    },

    /// Create an element of a kind and print how it classifies
    Classify {
        /// Kind id to classify
        kind: String,

        /// Subtype tag given to the element (e.g. boundaryEvent)
        #[arg(short, long)]
        subtype: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds_with_role() {
        let args = Args::try_parse_from(["swimlane", "kinds", "--role", "gateway"]).unwrap();

        assert_eq!(args.log_level, "warn");
        assert!(matches!(
            args.command,
            Command::Kinds {
                role: Some(ElementRole::Gateway)
            }
        ));
    }

    #[test]
    fn test_parse_global_options_after_subcommand() {
        let args = Args::try_parse_from([
            "swimlane",
            "classify",
            "boundaryEvent",
            "--config",
            "custom.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.config.as_deref(), Some("custom.toml"));
        assert_eq!(args.log_level, "debug");
        assert!(matches!(
            args.command,
            Command::Classify { ref kind, subtype: None } if kind == "boundaryEvent"
        ));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(Args::try_parse_from(["swimlane", "kinds", "--role", "widget"]).is_err());
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Args::try_parse_from(["swimlane"]).is_err());
    }
}
