//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{default_output_dir, Config, DEFAULT_INPUT_DIR};

/// txt2xlsx - Convert pipe-delimited SAP text extracts into Excel workbooks
#[derive(Parser, Debug)]
#[command(name = "txt2xlsx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder containing the exported .txt files
    #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
    pub input_dir: PathBuf,

    /// Folder for the .xlsx workbooks and errors.txt.
    /// Defaults to an 'Excel Output' folder next to the input folder.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Suppress the banner, spinners and summary table
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Cli {
    /// Get the output directory, deriving it from the input directory if not given.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&self.input_dir))
    }

    /// Build the pipeline configuration. Parsing parameters keep their fixed defaults.
    pub fn config(&self) -> Config {
        Config::with_dirs(self.input_dir.clone(), self.output_dir())
    }
}
