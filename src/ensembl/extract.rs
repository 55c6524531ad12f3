use log::debug;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::fetch::{decompressed_name, part_path};
use crate::error::EnsemblError;

/// Decompress `archive` next to itself and remove it, like `gunzip -f`.
///
/// Returns `None` when the path is not a `.gz` file, the archive is missing
/// or its decompressed target already exists.
pub fn extract_file(archive: &Path) -> Result<Option<PathBuf>, EnsemblError> {
    let Some(name) = archive.file_name().and_then(|n| n.to_str()) else {
        return Ok(None);
    };
    if !name.ends_with(".gz") || !archive.exists() {
        return Ok(None);
    }
    let target = archive.with_file_name(decompressed_name(name));
    if target.exists() {
        return Ok(None);
    }

    let (mut reader, format) =
        niffler::get_reader(Box::new(File::open(archive)?)).map_err(io::Error::other)?;
    debug!("Extracting {} ({:?})", archive.display(), format);

    let part = part_path(&target);
    {
        let mut writer = BufWriter::new(File::create(&part)?);
        io::copy(&mut reader, &mut writer)?;
        writer.flush()?;
    }
    fs::rename(&part, &target)?;
    fs::remove_file(archive)?;
    Ok(Some(target))
}

/// Extract every listed archive of one database directory.
pub fn extract_database(dir: &Path, files: &[String]) -> Result<usize, EnsemblError> {
    let mut extracted = 0;
    for file in files {
        if extract_file(&dir.join(file))?.is_some() {
            extracted += 1;
        }
    }
    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write as _;

    fn write_gz(path: &Path, content: &[u8]) {
        let file = File::create(path).unwrap();
        let mut writer = niffler::get_writer(
            Box::new(file),
            niffler::compression::Format::Gzip,
            niffler::compression::Level::Six,
        )
        .unwrap();
        writer.write_all(content).unwrap();
    }

    #[test]
    fn extracts_and_removes_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("gene.txt.gz");
        write_gz(&archive, b"1\tENSG00000000003\n2\tENSG00000000005\n");

        let target = extract_file(&archive).unwrap().unwrap();
        assert_eq!(target, dir.path().join("gene.txt"));
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "1\tENSG00000000003\n2\tENSG00000000005\n"
        );
        assert!(!archive.exists());
        assert!(!dir.path().join("gene.txt.part").exists());
    }

    #[test]
    fn skips_existing_targets_and_plain_files() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("exon.txt.gz");
        write_gz(&archive, b"new\n");
        fs::write(dir.path().join("exon.txt"), "old\n").unwrap();
        fs::write(dir.path().join("CHECKSUMS"), "1 2 gene.txt.gz\n").unwrap();

        let files = vec!["exon.txt.gz".to_string(), "CHECKSUMS".to_string(), "missing.txt.gz".to_string()];
        assert_eq!(extract_database(dir.path(), &files).unwrap(), 0);
        assert_eq!(fs::read_to_string(dir.path().join("exon.txt")).unwrap(), "old\n");
        assert!(archive.exists());
    }
}
