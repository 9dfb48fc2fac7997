//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Lodestar - language-aware extension recommendations
#[derive(Parser, Debug)]
#[command(name = "lodestar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding config.yaml (default: ~/.lodestar)
    #[arg(long, global = true, env = "LODESTAR_CONFIG_DIR")]
    pub config_dir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show installed language support, the featured list and devfile state
    Analyze(AnalyzeArgs),

    /// Recommend featured extensions for the workspace and add them to the devfile
    Recommend(RecommendArgs),

    /// Suggest catalog extensions for one file
    Advise(AdviseArgs),

    /// Run a session, reading opened files from stdin
    Watch(WatchArgs),
}

/// Workspace roots shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct RootArgs {
    /// Workspace root (repeatable, default: current directory)
    #[arg(short, long = "root", value_name = "DIR")]
    pub roots: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub roots: RootArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub roots: RootArgs,

    /// Answer yes when asked to install
    #[arg(short, long)]
    pub yes: bool,

    /// Scan deadline in milliseconds (overrides scan.timeout-ms)
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Output the decision as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AdviseArgs {
    /// File being opened
    pub file: PathBuf,

    /// Language ID of the file (default: derived from its extension)
    #[arg(short, long)]
    pub language: Option<String>,

    #[command(flatten)]
    pub roots: RootArgs,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub roots: RootArgs,

    /// Install recommendations without asking (stdin carries events, so
    /// otherwise the prompt is declined)
    #[arg(short, long)]
    pub yes: bool,

    /// Scan deadline in milliseconds (overrides scan.timeout-ms)
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend_with_roots() {
        let cli = Cli::parse_from([
            "lodestar",
            "-v",
            "recommend",
            "--root",
            "/projects/a",
            "-r",
            "/projects/b",
            "--yes",
            "--timeout-ms",
            "250",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Recommend(args) => {
                assert_eq!(
                    args.roots.roots,
                    vec![PathBuf::from("/projects/a"), PathBuf::from("/projects/b")]
                );
                assert!(args.yes);
                assert_eq!(args.timeout_ms, Some(250));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_advise() {
        let cli = Cli::parse_from(["lodestar", "advise", "src/main.py", "--language", "python"]);
        match cli.command {
            Commands::Advise(args) => {
                assert_eq!(args.file, PathBuf::from("src/main.py"));
                assert_eq!(args.language.as_deref(), Some("python"));
                assert!(args.roots.roots.is_empty());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
