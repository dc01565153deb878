use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "honeypad")]
#[command(about = "Manage Honeypad notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the notes database file
    #[arg(long, global = true, value_name = "PATH", env = "HONEYPAD_DB")]
    pub db_path: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, value_name = "LEVEL", env = "HONEYPAD_LOG")]
    pub log_level: Option<String>,

    /// Write rolling log files to this absolute directory instead of stderr
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Milliseconds to wait for another process holding the database lock
    #[arg(long, global = true, value_name = "MS", env = "HONEYPAD_BUSY_TIMEOUT_MS")]
    pub busy_timeout_ms: Option<u64>,

    /// Title collation used for listings
    #[arg(long, global = true, value_enum, default_value_t = CollationChoice::Folding)]
    pub collation: CollationChoice,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title
        #[arg(short, long)]
        title: Option<String>,
        /// Note body
        #[arg(short, long)]
        body: Option<String>,
    },
    /// List notes ordered by title
    List {
        /// Only notes whose title contains this text
        #[arg(long)]
        contains: Option<String>,
        /// Maximum number of notes to show
        #[arg(short, long)]
        limit: Option<u32>,
        /// Reverse the title order
        #[arg(long)]
        desc: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one note
    Show {
        /// Note id or note address
        note: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change the title and/or body of a note
    Edit {
        /// Note id
        id: i64,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New body
        #[arg(short, long)]
        body: Option<String>,
    },
    /// Delete one or more notes
    Delete {
        /// Note ids
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Open a note link; unknown or missing ids start a new note
    Open {
        /// Note id or note address
        note: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the core library version
    Version,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CollationChoice {
    /// Case- and accent-insensitive
    Folding,
    /// ASCII case-insensitive
    Ascii,
}
