use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "savedmodel-inspect", version, about = "Inspect SavedModel signatures")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the metagraphs and signatures of a SavedModel directory
    Show {
        /// SavedModel directory (the one containing saved_model.pb)
        #[arg(long)]
        dir: PathBuf,

        /// Comma-separated tags selecting one metagraph, e.g. serve,gpu
        #[arg(long, value_delimiter = ',')]
        tag_set: Option<Vec<String>>,

        /// Only show this signature of the selected metagraph
        #[arg(long, requires = "tag_set")]
        signature_def: Option<String>,

        /// Log level (RUST_LOG)
        #[arg(long, default_value = "warn")]
        log: String,
    },
}
