//! Download targets and the checks made before any bytes are requested.
//!
//! # Design
//! Anything that carries `(format, url)` pairs implements `Downloadable`.
//! `resolve` turns one such item plus a destination directory into a
//! `DownloadTarget`, failing early when the directory is missing or cannot be
//! written by the current process, or when the requested format is not
//! offered. The transport then streams the body into `DownloadTarget::path`.
//!
//! Default file names are built from response fields, so only their final
//! path component is used and the target always stays inside the directory.
//! A name passed by the caller is used as given.

use std::path::{Path, PathBuf};

use crate::error::{OdpError, Result};

/// A resource that can be fetched as a file in one or more formats.
pub trait Downloadable {
    /// The `(format, url)` pairs on offer, in server order.
    fn download_options(&self) -> Vec<(&str, &str)>;

    /// Format used when the caller does not ask for one.
    fn default_format(&self) -> &str;

    /// File name used when the caller does not supply one.
    fn default_file_name(&self, format: &str) -> String;
}

/// Where to fetch a file from and where to write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub path: PathBuf,
    pub format: String,
}

/// Check the destination and pick the download URL.
///
/// Formats are matched case-insensitively; the offered spelling is kept.
pub fn resolve<D>(
    item: &D,
    dir: &Path,
    file_name: Option<&str>,
    format: Option<&str>,
) -> Result<DownloadTarget>
where
    D: Downloadable + ?Sized,
{
    check_directory(dir)?;

    let requested = format.unwrap_or_else(|| item.default_format());
    let options = item.download_options();
    let (format, url) = options
        .iter()
        .find(|(offered, _)| offered.eq_ignore_ascii_case(requested))
        .ok_or_else(|| OdpError::FormatUnavailable {
            requested: requested.to_string(),
            available: options.iter().map(|(offered, _)| offered.to_string()).collect(),
        })?;

    let file_name = match file_name {
        Some(name) => name.to_string(),
        None => contained_file_name(&item.default_file_name(format))?,
    };

    Ok(DownloadTarget {
        url: url.to_string(),
        path: dir.join(file_name),
        format: format.to_string(),
    })
}

fn check_directory(dir: &Path) -> Result<()> {
    let metadata = match std::fs::metadata(dir) {
        Ok(metadata) if metadata.is_dir() => metadata,
        Ok(_) => return Err(OdpError::DirectoryMissing(dir.to_path_buf())),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(OdpError::DirectoryMissing(dir.to_path_buf()))
        }
        Err(err) => return Err(err.into()),
    };
    // Mode bits alone do not say whether this process may write here.
    if metadata.permissions().readonly() || tempfile::tempfile_in(dir).is_err() {
        return Err(OdpError::DirectoryNotWritable(dir.to_path_buf()));
    }
    Ok(())
}

/// The last component of `name`, or an error when it has none (`..`, `/`, empty).
fn contained_file_name(name: &str) -> Result<String> {
    Path::new(name)
        .file_name()
        .and_then(|component| component.to_str())
        .filter(|component| !component.is_empty())
        .map(str::to_string)
        .ok_or_else(|| OdpError::InvalidFileName(name.to_string()))
}

/// File extension for a patent document format.
pub(crate) fn document_extension(format: &str) -> &'static str {
    match format {
        "PDF" => "pdf",
        "MS_WORD" => "doc",
        _ => "xml",
    }
}
