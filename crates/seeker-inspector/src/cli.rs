use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use seeker::StringMatch;

#[derive(Parser)]
#[command(
    name = "seeker-inspector",
    about = "Inspect, query and watch UI element trees",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a UI tree as a compact indexed listing or JSON
    Tree(TreeArgs),
    /// Find elements in a UI tree by property
    Find(FindArgs),
    /// Re-render the demo desktop periodically, highlighting that the tree
    /// is re-read on every tick
    Watch(WatchArgs),
}

#[derive(clap::Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Maximum depth to descend to
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "compact")]
    pub format: OutputFormat,
}

#[derive(clap::Args)]
pub struct FindArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Match against the element name
    #[arg(long, conflicts_with_all = ["automation_id", "class_name"])]
    pub name: Option<String>,

    /// Match against the automation id
    #[arg(long, conflicts_with = "class_name")]
    pub automation_id: Option<String>,

    /// Match against the class name
    #[arg(long)]
    pub class_name: Option<String>,

    /// String comparison mode
    #[arg(long = "match", value_enum, default_value = "exact")]
    pub match_mode: MatchMode,
}

#[derive(clap::Args)]
pub struct WatchArgs {
    /// Milliseconds between re-renders
    #[arg(long, default_value_t = 1_000)]
    pub interval_ms: u64,

    /// Number of ticks before exiting (0 = run until interrupted)
    #[arg(long, default_value_t = 5)]
    pub ticks: u64,
}

/// Where the tree comes from: a snapshot file or the built-in demo desktop.
#[derive(clap::Args)]
pub struct SourceArgs {
    /// Read a JSON tree snapshot from this file
    #[arg(long, conflicts_with = "demo")]
    pub json: Option<PathBuf>,

    /// Use the built-in simulated demo desktop
    #[arg(long)]
    pub demo: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact `#index [ROLE] name` listing
    Compact,
    /// Pretty-printed JSON snapshot
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchMode {
    Exact,
    ExactIgnoreCase,
    Contains,
    ContainsIgnoreCase,
    StartsWith,
    StartsWithIgnoreCase,
    EndsWith,
    EndsWithIgnoreCase,
}

impl From<MatchMode> for StringMatch {
    fn from(mode: MatchMode) -> Self {
        match mode {
            MatchMode::Exact => StringMatch::Exact,
            MatchMode::ExactIgnoreCase => StringMatch::ExactIgnoreCase,
            MatchMode::Contains => StringMatch::Contains,
            MatchMode::ContainsIgnoreCase => StringMatch::ContainsIgnoreCase,
            MatchMode::StartsWith => StringMatch::StartsWith,
            MatchMode::StartsWithIgnoreCase => StringMatch::StartsWithIgnoreCase,
            MatchMode::EndsWith => StringMatch::EndsWith,
            MatchMode::EndsWithIgnoreCase => StringMatch::EndsWithIgnoreCase,
        }
    }
}
