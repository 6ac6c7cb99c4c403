use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

use daybook_core::DocumentKind;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages (what --verbose selects)
    Debug,
    /// Trace-level messages
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Document kind as typed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Journal,
    Page,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Journal => DocumentKind::Journal,
            KindArg::Page => DocumentKind::Page,
        }
    }
}

#[derive(Parser)]
#[command(name = "dbk")]
#[command(about = "dbk - journals, pages and live block queries")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (defaults to ~/.config/daybook/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot file (overrides config and DAYBOOK_SNAPSHOT)
    #[arg(short = 's', long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Set log level; falls back to the config file value
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open today's journal, creating it if needed
    Today,

    /// Journal commands
    #[command(subcommand)]
    Journal(JournalCommands),

    /// Open a page, creating it if needed
    Page {
        /// Page title
        name: String,
    },

    /// Open an existing journal or page
    Open {
        #[arg(value_enum)]
        kind: KindArg,
        /// Journal date id or page title
        id: String,
    },

    /// List journals (newest first) and pages (by title)
    Docs,

    /// Show the current document with inline query results
    Show,

    /// Add a block at the top of the current document
    Add {
        /// Block text (empty block when omitted)
        #[arg(conflicts_with = "query")]
        text: Option<String>,

        /// Add a query block; without a body adds `status:TODO scope:current`
        #[arg(long, num_args = 0..=1, value_name = "BODY")]
        query: Option<Option<String>>,
    },

    /// Replace a block's text
    Edit {
        /// Block id or unique prefix
        id: String,
        text: String,
    },

    /// Cycle a block's status TODO → DOING → DONE
    Cycle {
        /// Block id or unique prefix
        id: String,
    },

    /// Delete a block
    #[command(alias = "remove")]
    Rm {
        /// Block id or unique prefix
        id: String,
    },

    /// Run an ad-hoc query, e.g. "status:TODO tag:work scope:all"
    Query {
        body: String,

        /// Maximum rows (defaults to display.query_limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Blocks in other documents referencing the current one
    Backlinks {
        /// Maximum rows (defaults to display.backlink_limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Tag cloud, or the blocks carrying one tag
    Tags {
        /// Tag to list (leading # optional)
        tag: Option<String>,

        /// Maximum rows (defaults to display.tag_limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Saved views
    #[command(subcommand)]
    Views(ViewCommands),

    /// Discard all data and rebuild the starter state
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum JournalCommands {
    /// Create another journal for today and open it
    New,
}

#[derive(Subcommand)]
pub enum ViewCommands {
    /// List saved views, newest first
    List,

    /// Save a query under a name
    Save {
        name: String,
        /// Query body, e.g. "status:DOING scope:all"
        body: String,
    },

    /// Delete a saved view
    Rm {
        /// View id or unique prefix
        id: String,
    },

    /// Evaluate a saved view against the current document
    Run {
        /// View id or unique prefix
        id: String,

        /// Maximum rows (defaults to display.view_limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write an example config file
    Init {
        /// Where to write (defaults to the resolved config path)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_query_flag_forms() {
        let cli = Cli::try_parse_from(["dbk", "add", "--query"]).unwrap();
        assert!(matches!(cli.command, Commands::Add { text: None, query: Some(None) }));

        let cli = Cli::try_parse_from(["dbk", "add", "--query", "status:DONE"]).unwrap();
        match cli.command {
            Commands::Add { query: Some(Some(body)), .. } => assert_eq!(body, "status:DONE"),
            _ => panic!("expected add --query with body"),
        }

        assert!(Cli::try_parse_from(["dbk", "add", "text", "--query", "x"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dbk", "docs", "--json", "-l", "debug"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn test_open_kind() {
        let cli = Cli::try_parse_from(["dbk", "open", "page", "Foo"]).unwrap();
        match cli.command {
            Commands::Open { kind, id } => {
                assert_eq!(DocumentKind::from(kind), DocumentKind::Page);
                assert_eq!(id, "Foo");
            }
            _ => panic!("expected open"),
        }
    }
}
