use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cheatnote", bin_name = "cheatnote", version)]
#[command(about = "Blazing fast snippet and note manager", long_about = None)]
#[command(after_help = "Environment:\n  CHEATNOTE_DB   Override database path")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database file to use (overrides CHEATNOTE_DB)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new note
    #[command(alias = "a")]
    Add {
        /// Note title
        #[arg(short, long)]
        title: Option<String>,

        /// Note content
        #[arg(short, long)]
        content: Option<String>,

        /// Comma-separated tags
        #[arg(short = 'g', long)]
        tags: Option<String>,

        /// TITLE CONTENT TAGS, for fields not given as options
        #[arg(num_args = 0..=3, value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Edit an existing note
    #[command(alias = "e")]
    Edit {
        /// Note ID
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        id: Option<u32>,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New content
        #[arg(short, long)]
        content: Option<String>,

        /// New tags (an empty value clears them)
        #[arg(short = 'g', long)]
        tags: Option<String>,

        /// ID TITLE CONTENT TAGS, for fields not given as options
        #[arg(num_args = 0..=4, value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note ID
        #[arg(short = 'i', long = "id", value_parser = clap::value_parser!(u32).range(1..))]
        id_flag: Option<u32>,

        /// Note ID
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        id: Option<u32>,
    },

    /// List and search notes
    #[command(alias = "ls")]
    List {
        /// Search in title, content, and tags
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by tags (all must match)
        #[arg(short = 'g', long)]
        tags: Option<String>,

        /// Treat the search pattern as a regular expression
        #[arg(short, long)]
        regex: bool,

        /// Case-insensitive search
        #[arg(short = 'i', long)]
        case_insensitive: bool,

        /// Whole-field match (literal mode)
        #[arg(short, long)]
        exact: bool,

        /// Match whole words only (regex mode)
        #[arg(short, long)]
        word_boundary: bool,

        /// Let ^ and $ match at line breaks (regex mode)
        #[arg(short, long)]
        multiline: bool,

        /// Compact output format
        #[arg(short, long)]
        compact: bool,

        /// Hide note IDs
        #[arg(short = 'n', long)]
        no_ids: bool,

        /// Search pattern, if --search is not given
        pattern: Option<String>,
    },

    /// Export notes to a CSV file
    Export {
        /// Output filename
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output filename
        file: Option<PathBuf>,
    },

    /// Import notes from a CSV file
    Import {
        /// Input filename
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Merge with existing notes (default: replace)
        #[arg(short, long)]
        merge: bool,

        /// Input filename
        file: Option<PathBuf>,
    },

    /// Show database statistics
    Stats,

    /// Get or set display preferences
    Config {
        /// Configuration key (compact, show-ids, color)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
