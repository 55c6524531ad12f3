use indicatif::ProgressBar;
use log::debug;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::listing::IndexClient;
use super::{is_safe_file_name, validate_database_name};
use crate::error::EnsemblError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded(u64),
    AlreadyPresent,
}

/// Name of a listed file once gunzipped.
pub fn decompressed_name(file: &str) -> &str {
    file.strip_suffix(".gz").unwrap_or(file)
}

pub(crate) fn part_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

/// Download one file unless it, or its decompressed form, is already on disk.
///
/// Data is written to `<file>.part` and renamed once complete, so a present
/// archive is always a finished download.
pub fn fetch_file(
    client: &IndexClient,
    database: &str,
    file: &str,
    dir: &Path,
) -> Result<FetchOutcome, EnsemblError> {
    if !is_safe_file_name(file) {
        return Err(EnsemblError::InvalidFileName(file.to_string()));
    }
    let target = dir.join(file);
    if target.exists() || dir.join(decompressed_name(file)).exists() {
        debug!("{} already present", target.display());
        return Ok(FetchOutcome::AlreadyPresent);
    }

    let url = client.file_url(database, file);
    let mut resp = client.get(&url)?;
    let part = part_path(&target);
    let bytes = {
        let mut writer = BufWriter::new(File::create(&part)?);
        let bytes = resp.copy_to(&mut writer)?;
        writer.flush()?;
        bytes
    };
    fs::rename(&part, &target)?;
    debug!("Downloaded {} ({} bytes)", url, bytes);
    Ok(FetchOutcome::Downloaded(bytes))
}

/// Fetch every listed file of one database into `data_dir/<database>/`.
pub fn fetch_database(
    client: &IndexClient,
    database: &str,
    files: &[String],
    data_dir: &Path,
    progress: &ProgressBar,
) -> Result<usize, EnsemblError> {
    let dir = data_dir.join(validate_database_name(database)?);
    fs::create_dir_all(&dir)?;

    let mut downloaded = 0;
    for file in files {
        progress.set_message(format!("{database}/{file}"));
        if let FetchOutcome::Downloaded(_) = fetch_file(client, database, file, &dir)? {
            downloaded += 1;
        }
        progress.inc(1);
    }
    Ok(downloaded)
}
