use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Each invocation is one page load: restore, apply one action, persist, render.
#[derive(Debug, Parser)]
#[command(name = "care", version, about = "Find hospitals and estimated treatment costs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the care service (overrides CARE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding the saved session (overrides CARE_STATE_DIR)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the current view
    Show,
    /// Analyze symptoms and search hospitals
    Search {
        #[arg(short, long)]
        symptoms: String,
        #[arg(short, long, default_value = "")]
        city: String,
    },
    /// List the current results
    List {
        /// all, government, private, premium, trust
        #[arg(short, long, default_value = "all")]
        filter: String,
    },
    /// Open the n-th hospital of the list (1-based)
    Open {
        index: usize,
        #[arg(short, long, default_value = "all")]
        filter: String,
    },
    /// Go back from a hospital to the results
    Back,
    /// Forget the current search
    New,
}
