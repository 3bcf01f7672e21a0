//! Zip packaging of the staging tree

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::{Error, Result};

/// Outcome of an archive run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub entries: usize,
    pub bytes: u64,
}

/// Zip every file below `source` into `out_file`
///
/// Entry names are relative to `source`, use `/` separators and are added in
/// sorted order, so the archive content is reproducible.
pub fn archive_directory(source: &Path, out_file: &Path) -> Result<ArchiveSummary> {
    let file = File::create(out_file)
        .map_err(|e| Error::io(format!("Failed to create {}", out_file.display()), e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0;
    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry_name(source, entry.path())?;
        let content = std::fs::read(entry.path())
            .map_err(|e| Error::io(format!("Failed to read {}", entry.path().display()), e))?;

        zip.start_file(name.as_str(), options)
            .map_err(|e| Error::archive(format!("Failed to add {}", name), e))?;
        zip.write_all(&content)
            .map_err(|e| Error::io(format!("Failed to write {} to archive", name), e))?;
        entries += 1;
    }

    let mut writer = zip
        .finish()
        .map_err(|e| Error::archive(format!("Failed to finish {}", out_file.display()), e))?;
    writer
        .flush()
        .map_err(|e| Error::io(format!("Failed to flush {}", out_file.display()), e))?;

    let bytes = std::fs::metadata(out_file)
        .map_err(|e| Error::io(format!("Failed to stat {}", out_file.display()), e))?
        .len();

    info!(
        "Directory {} zipped to {} ({} entries, {} bytes)",
        source.display(),
        out_file.display(),
        entries,
        bytes
    );
    Ok(ArchiveSummary { entries, bytes })
}

fn entry_name(source: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(source).map_err(|_| {
        Error::structure(format!(
            "{} is not inside {}",
            path.display(),
            source.display()
        ))
    })?;

    let parts = relative
        .components()
        .map(|component| {
            component.as_os_str().to_str().map(str::to_string).ok_or_else(|| {
                Error::structure(format!("Non UTF-8 path {}", path.display()))
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("/"))
}
