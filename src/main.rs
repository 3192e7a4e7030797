//! txt2xlsx: SAP Extract to Excel CLI Tool
//!
//! Converts every `.txt` export in the input folder into an `.xlsx` workbook
//! and records row-count mismatches in `errors.txt`.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use txt2xlsx::cli::Cli;
use txt2xlsx::pipeline::run_with;
use txt2xlsx::utils::{
    init_logging, print_banner, print_completion, print_config, print_info, print_success,
    print_warning, FileSpinners,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = cli.config();

    if !cli.quiet {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(&config);
    }

    let start = Instant::now();
    let summary = run_with(&config, &mut FileSpinners::new(cli.quiet))?;

    if !cli.quiet {
        summary.display();
        println!();
        if summary.mismatch_count() > 0 {
            print_warning(&format!(
                "{} file(s) lost rows; see {}",
                summary.mismatch_count(),
                config.error_log_path().display()
            ));
        }
        print_success(&format!("Workbooks written to {}", config.output_dir.display()));
        print_info(&format!(
            "Finished in {}",
            style(format!("{:.2}s", start.elapsed().as_secs_f64())).dim()
        ));
        print_completion();
    }

    Ok(())
}
