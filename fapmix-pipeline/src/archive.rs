//! Zip archive of the final output, named after the oldest input file.

use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Archive name used when neither a date nor an identifier is available.
const FALLBACK_ARCHIVE_NAME: &str = "final_output";

/// Modification date of the oldest regular file directly inside `dir`,
/// formatted `DDMonthYYYY` in local time. Empty when there are no files.
///
/// Symlinks are followed, so a linked recording counts with its target's date.
pub fn oldest_file_date(dir: &Path) -> Result<String> {
    let mut oldest: Option<SystemTime> = None;

    let entries = fs::read_dir(dir).map_err(|e| Error::io("failed to list directory", dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| Error::io("failed to list directory", dir, e))?;
        let path = entry.path();
        let meta = fs::metadata(&path).map_err(|e| Error::io("failed to read metadata", &path, e))?;

        if !meta.is_file() {
            continue;
        }

        let modified = meta
            .modified()
            .map_err(|e| Error::io("failed to read modification time", &path, e))?;

        oldest = Some(oldest.map_or(modified, |t| t.min(modified)));
    }

    Ok(oldest.map(format_date).unwrap_or_default())
}

/// `DDMonthYYYY`, e.g. `01January2024`.
pub fn format_date(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%d%B%Y").to_string()
}

/// `<date>-<identifier>`, or the date alone when the identifier is empty.
pub fn archive_name(date: &str, identifier: &str) -> String {
    if !identifier.is_empty() {
        format!("{date}-{identifier}")
    } else if !date.is_empty() {
        date.to_string()
    } else {
        FALLBACK_ARCHIVE_NAME.to_string()
    }
}

/// Zip the contents of `src_dir` into `<dest_dir>/<name>.zip`.
///
/// Entries are stored relative to `src_dir` with `/` separators.
pub fn zip_final_output(src_dir: &Path, dest_dir: &Path, name: &str) -> Result<PathBuf> {
    let zip_path = dest_dir.join(format!("{name}.zip"));

    let file =
        File::create(&zip_path).map_err(|e| Error::io("failed to create archive", &zip_path, e))?;

    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    add_dir(&mut writer, src_dir, src_dir, options)?;
    writer.finish()?;

    tracing::info!(path = ?zip_path.display(), "final output zipped");

    Ok(zip_path)
}

fn add_dir(
    writer: &mut ZipWriter<File>,
    root: &Path,
    dir: &Path,
    options: SimpleFileOptions,
) -> Result<()> {
    let mut paths = fs::read_dir(dir)
        .and_then(|entries| entries.map(|e| e.map(|e| e.path())).collect::<io::Result<Vec<_>>>())
        .map_err(|e| Error::io("failed to list directory", dir, e))?;

    paths.sort();

    for path in paths {
        let name = entry_name(root, &path);

        if path.is_dir() {
            writer.add_directory(format!("{name}/"), options)?;
            add_dir(writer, root, &path, options)?;
        } else {
            writer.start_file(name, options)?;
            let mut src =
                File::open(&path).map_err(|e| Error::io("failed to open file", &path, e))?;
            io::copy(&mut src, writer).map_err(|e| Error::io("failed to archive file", &path, e))?;
        }
    }

    Ok(())
}

fn entry_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
