use anyhow::{Context, Result};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::export::formats::repeat_stats::FileReport;
use crate::export::RepeatStatsExport;
use crate::intervals::{collect_file, write_raw_outputs, HeaderLayout, RawOutputPaths};
use crate::utils::progress_bar_builder::ProgressBarBuilder;

pub fn run(
    files: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    length_field: usize,
    summary_json: Option<PathBuf>,
) -> Result<()> {
    let start_time = Instant::now();
    let layout = HeaderLayout::WINDOWMASKER.with_length_field(length_field);

    if let Some(dir) = &output_dir {
        fs::create_dir_all(dir).with_context(|| format!("Creating {}", dir.display()))?;
    }

    println!("\nProcessing WindowMasker interval file output...");
    let reports = process_files(&files, output_dir.as_deref(), layout);

    if let Some(json_path) = summary_json {
        RepeatStatsExport::new(reports)
            .write_json(&json_path)
            .with_context(|| format!("Writing {}", json_path.display()))?;
        info!("Summary written to {}", json_path.display());
    }

    println!("Finished in {} seconds", start_time.elapsed().as_secs());
    Ok(())
}

/// Process each file in order. Missing or unparsable files are reported and
/// skipped; the reports of the remaining files are returned.
pub fn process_files(
    files: &[PathBuf],
    output_dir: Option<&Path>,
    layout: HeaderLayout,
) -> Vec<FileReport> {
    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        if !path.exists() {
            warn!("File '{}' not found", path.display());
            continue;
        }

        println!("\nParsing {}...", path.display());
        match process_file(path, output_dir, layout) {
            Ok(report) => {
                print!("{report}");
                reports.push(report);
            }
            Err(e) => error!("Skipping {}: {:#}", path.display(), e),
        }
    }
    reports
}

/// Collect one interval file, write its raw size files and build its report.
pub fn process_file(
    path: &Path,
    output_dir: Option<&Path>,
    layout: HeaderLayout,
) -> Result<FileReport> {
    let spinner = ProgressBarBuilder::new(format!("Parsing {}", path.display()))
        .with_tick()
        .build()?;
    let aggregate = collect_file(path, layout);
    spinner.finish_and_clear();
    let aggregate = aggregate.with_context(|| format!("Parsing {}", path.display()))?;

    let outputs = RawOutputPaths::for_input(path, output_dir);
    write_raw_outputs(&aggregate, &outputs)
        .with_context(|| format!("Writing raw sizes for {}", path.display()))?;

    Ok(FileReport::from_aggregate(path, &aggregate, outputs))
}
