use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wordsuggest")]
#[command(about = "wordsuggest - Ranked prefix autocomplete over weighted vocabularies.")]
#[command(version = env!("VERSION"))]
pub struct Cli {
    /// Path to one or more config files (merged in order).
    #[arg(long, default_value = "config.toml", action = clap::ArgAction::Append)]
    pub config: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a sample config file.
    NewConfig {
        /// Output path for config file.
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,
    },

    /// Load the vocabulary and print suggestions for a prefix.
    Query {
        /// Prefix to complete. Empty returns the overall top terms.
        #[arg(default_value = "")]
        prefix: String,

        /// CSV files (term,frequency) to load instead of the ones in the config.
        #[arg(long, action = clap::ArgAction::Append)]
        file: Vec<PathBuf>,

        /// Print the frequency next to each term.
        #[arg(long)]
        scores: bool,
    },

    /// Print suggestions from a small built-in vocabulary.
    Demo {
        /// Prefix to complete.
        #[arg(long, default_value = "ap")]
        prefix: String,
    },
}
