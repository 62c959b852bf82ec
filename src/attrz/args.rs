use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "attrz", version)]
#[command(about = "Attach named attributes to files and directories", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging to stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set an attribute, replacing any previous value
    Set {
        /// File or directory to attach the attribute to
        target: PathBuf,

        /// Attribute name
        name: String,

        /// Attribute value
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        value: Option<String>,

        /// Read the value from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print an attribute value
    Get {
        target: PathBuf,

        name: String,

        /// Read at most this many bytes
        #[arg(long)]
        max: Option<usize>,

        /// Write the raw bytes instead of text
        #[arg(long)]
        raw: bool,
    },

    /// List attribute names
    #[command(alias = "ls")]
    List {
        target: PathBuf,

        /// Print a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Remove one attribute
    #[command(alias = "rm")]
    Remove { target: PathBuf, name: String },

    /// Remove all attributes
    Clear { target: PathBuf },

    /// Show or change configuration
    Config {
        /// Config key (e.g. max-value-size)
        key: Option<String>,

        /// New value
        value: Option<String>,
    },
}
