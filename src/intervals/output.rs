use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::collector::IntervalAggregate;
use crate::error::ParseError;

pub const UNIQUE_SUFFIX: &str = "_unique.csv";
pub const NON_REPEAT_SUFFIX: &str = "_nonre.csv";
pub const REPEAT_SUFFIX: &str = "_re.csv";

pub const UNIQUE_SIZES_HEADER: &str = "unique_intron_sizes.raw";
pub const RAW_SIZES_HEADER: &str = "intron_sizes.raw";

/// The three raw size files written for one interval file.
///
/// The `.csv` suffix is historical; each file holds one integer per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOutputPaths {
    pub unique: PathBuf,
    pub non_repeat: PathBuf,
    pub repeat: PathBuf,
}

impl RawOutputPaths {
    /// Paths derived from `input`, placed in `output_dir` when given and
    /// otherwise beside the input.
    pub fn for_input(input: &Path, output_dir: Option<&Path>) -> Self {
        let file_name = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = output_stem(&file_name);
        let dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        Self {
            unique: dir.join(format!("{stem}{UNIQUE_SUFFIX}")),
            non_repeat: dir.join(format!("{stem}{NON_REPEAT_SUFFIX}")),
            repeat: dir.join(format!("{stem}{REPEAT_SUFFIX}")),
        }
    }
}

/// First two dot-separated segments of a file name joined by `_`.
///
/// `introns.wm.intervals.txt` becomes `introns_wm`; a name without a dot is
/// used as is.
pub fn output_stem(file_name: &str) -> String {
    let mut parts = file_name.split('.');
    let first = parts.next().unwrap_or_default();
    match parts.next() {
        Some(second) => format!("{first}_{second}"),
        None => first.to_string(),
    }
}

pub fn write_raw_sizes(path: &Path, header: &str, sizes: &[i64]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{header}")?;
    for size in sizes {
        writeln!(writer, "{size}")?;
    }
    writer.flush()
}

pub fn write_raw_outputs(
    aggregate: &IntervalAggregate,
    paths: &RawOutputPaths,
) -> std::io::Result<()> {
    write_raw_sizes(&paths.unique, UNIQUE_SIZES_HEADER, &aggregate.unique_intron_sizes)?;
    write_raw_sizes(&paths.non_repeat, RAW_SIZES_HEADER, &aggregate.non_rep_intron_sizes)?;
    write_raw_sizes(&paths.repeat, RAW_SIZES_HEADER, &aggregate.rep_intron_sizes)?;
    Ok(())
}

/// Read back a raw size file, skipping its header line.
pub fn read_raw_sizes(path: &Path) -> Result<Vec<i64>, ParseError> {
    let reader = BufReader::new(File::open(path)?);
    let mut sizes = Vec::new();
    for (idx, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        let value = line.trim();
        if value.is_empty() {
            continue;
        }
        let size = value.parse().map_err(|_| ParseError::InvalidLength {
            line: idx + 1,
            value: value.to_string(),
        })?;
        sizes.push(size);
    }
    Ok(sizes)
}
