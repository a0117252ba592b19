//! Input resolution: expanding file and directory arguments into PDF paths.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Check whether a path has the `.pdf` extension (case-insensitive).
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Expand a mixed list of file and directory paths into a concrete list of
/// PDF files.
///
/// Files are accepted when they carry the `.pdf` extension. Directories are
/// scanned for PDF files, descending into subdirectories only when
/// `recursive` is set. The result is sorted lexicographically so that batch
/// order is deterministic regardless of filesystem enumeration order.
///
/// # Errors
///
/// - [`Error::InvalidInput`] when a listed path does not exist.
/// - [`Error::NoInput`] when the expansion yields zero PDF files; an empty
///   success is never returned.
pub fn resolve_inputs(paths: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_pdf_path(path) {
                files.push(path.clone());
            } else {
                log::warn!("Skipping non-PDF input: {}", path.display());
            }
        } else if path.is_dir() {
            scan_dir(path, recursive, &mut files)?;
        } else {
            return Err(Error::InvalidInput(path.clone()));
        }
    }

    files.sort();
    files.dedup();

    if files.is_empty() {
        let listed = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(Error::NoInput(listed));
    }

    Ok(files)
}

fn scan_dir(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if recursive {
                scan_dir(&path, recursive, files)?;
            }
        } else if is_pdf_path(&path) {
            files.push(path);
        }
    }
    Ok(())
}
