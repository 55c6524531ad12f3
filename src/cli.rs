use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::intervals::HeaderLayout;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count WindowMasker repeats inside introns and summarise intron sizes
    RepeatStats {
        /// WindowMasker interval files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for the raw size files (default: next to each input)
        #[arg(short = 'o', long = "output-dir")]
        output_dir: Option<PathBuf>,

        /// Zero-based whitespace field of the header holding the intron length
        #[arg(long, default_value_t = HeaderLayout::WINDOWMASKER.length_field)]
        length_field: usize,

        /// Also write every file report as JSON
        #[arg(long = "summary-json", value_name = "FILE")]
        summary_json: Option<PathBuf>,
    },

    /// Download the current Ensembl MySQL release and load it into MySQL
    FetchEnsembl {
        /// Local mirror directory (overrides the config file)
        #[arg(short = 'd', long = "data-dir")]
        data_dir: Option<PathBuf>,

        /// Release index URL (overrides the config file)
        #[arg(long = "base-url")]
        base_url: Option<String>,

        /// Stop after downloading and extracting
        #[arg(long)]
        skip_import: bool,

        /// Only print the matching databases and their files
        #[arg(long)]
        list_only: bool,
    },

    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}
