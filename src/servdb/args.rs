use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "servdb")]
#[command(about = "Load, edit and safely rewrite game server database files", long_about = None)]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Extra search root, probed before the configured ones
    #[arg(short, long, global = true)]
    pub root: Vec<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List known datasets and where they resolve
    #[command(alias = "ls")]
    List,

    /// Load a dataset and report its records and parse errors
    Load {
        /// Dataset name (e.g. item_db, mob_db)
        dataset: String,
    },

    /// Write a dataset to an output directory
    Save {
        /// Dataset name (e.g. item_db, mob_db)
        dataset: String,

        /// Output root directory
        #[arg(short, long)]
        out: PathBuf,

        /// Sub-folder for datasets with renewal variants ("re" or "pre-re")
        #[arg(long, default_value = "pre-re")]
        sub_path: String,

        /// Target server dialect (rathena, hercules)
        #[arg(short, long)]
        dialect: Option<String>,

        /// Force a specific output format (txt, conf)
        #[arg(short, long)]
        format: Option<String>,

        /// Re-serialize even when nothing changed
        #[arg(long)]
        force: bool,
    },

    /// List recorded backups
    Backups {
        /// Export all backups to a tar.gz archive
        #[arg(long)]
        export: bool,

        /// Archive path for --export (defaults to a timestamped name)
        #[arg(long, requires = "export")]
        output: Option<PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (dialect, add-root)
        key: Option<String>,

        /// Value to set (if omitted, prints current values)
        value: Option<String>,
    },
}
