//! Command-line interface argument parsing for board-viewer.
//!
//! - `board-viewer` / `board-viewer show`: interactive viewer
//! - `board-viewer list [--json]`: print the catalog
//! - `board-viewer info --board 0`: print one record's details

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::CatalogPaths;

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "BOARD_VIEWER_DATA_DIR";

/// Data directory used when neither `--data-dir` nor the env var is set
const DEFAULT_DATA_DIR: &str = "data";

/// Browse a catalog of electronic boards and components.
#[derive(Parser, Debug)]
#[command(name = "board-viewer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing boards.json and components.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to the boards file (overrides --data-dir)
    #[arg(long, global = true)]
    pub boards: Option<PathBuf>,

    /// Path to the components file (overrides --data-dir)
    #[arg(long, global = true)]
    pub components: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Launch the interactive viewer (default)
    Show,

    /// Print the names of all boards and components
    List {
        /// Print the raw records as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Print the details of a single board or component
    Info(InfoArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct InfoArgs {
    /// Index of the board to describe
    #[arg(long)]
    pub board: Option<usize>,

    /// Index of the component to describe
    #[arg(long)]
    pub component: Option<usize>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The subcommand to run, `show` when none was given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Show)
    }
}

/// Configuration derived from CLI arguments and the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub paths: CatalogPaths,
    pub debug: bool,
}

impl AppConfig {
    /// Build the config from parsed CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self::from_parts(
            cli.data_dir.clone(),
            cli.boards.clone(),
            cli.components.clone(),
            cli.debug,
        )
    }

    pub fn from_parts(
        data_dir: Option<PathBuf>,
        boards: Option<PathBuf>,
        components: Option<PathBuf>,
        debug: bool,
    ) -> Self {
        // Explicit flag, then environment, then ./data
        let data_dir = data_dir.unwrap_or_else(|| {
            std::env::var_os(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
        });

        let defaults = CatalogPaths::in_dir(&data_dir);
        let paths = CatalogPaths {
            boards: boards.unwrap_or(defaults.boards),
            components: components.unwrap_or(defaults.components),
        };

        AppConfig {
            data_dir,
            paths,
            debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_data_dir() {
        let config = AppConfig::from_parts(Some(PathBuf::from("catalog")), None, None, false);
        assert_eq!(config.data_dir, PathBuf::from("catalog"));
        assert_eq!(config.paths.boards, PathBuf::from("catalog/boards.json"));
        assert_eq!(
            config.paths.components,
            PathBuf::from("catalog/components.json")
        );
        assert!(!config.debug);
    }

    #[test]
    fn test_file_overrides() {
        let config = AppConfig::from_parts(
            Some(PathBuf::from("catalog")),
            Some(PathBuf::from("/tmp/b.json")),
            None,
            true,
        );
        assert_eq!(config.paths.boards, PathBuf::from("/tmp/b.json"));
        assert_eq!(
            config.paths.components,
            PathBuf::from("catalog/components.json")
        );
        assert!(config.debug);
    }

    #[test]
    fn test_default_command_is_show() {
        let cli = Cli::try_parse_from(["board-viewer"]).unwrap();
        assert_eq!(cli.command(), Commands::Show);
    }

    #[test]
    fn test_info_requires_exactly_one_target() {
        let cli = Cli::try_parse_from(["board-viewer", "info", "--component", "2"]).unwrap();
        assert_eq!(
            cli.command(),
            Commands::Info(InfoArgs {
                board: None,
                component: Some(2),
            })
        );

        assert!(Cli::try_parse_from(["board-viewer", "info"]).is_err());
        assert!(
            Cli::try_parse_from(["board-viewer", "info", "--board", "0", "--component", "1"])
                .is_err()
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["board-viewer", "list", "--json", "--data-dir", "x"]).unwrap();
        assert_eq!(cli.command(), Commands::List { json: true });
        assert_eq!(cli.data_dir, Some(PathBuf::from("x")));
    }
}
