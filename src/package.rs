//! Packaging a validated skill into a `.skill` archive.
//!
//! The archive is a deflate-compressed zip holding every regular file of the
//! bundle under its path relative to the bundle root.

use crate::output::Output;
use crate::skillpacks::validate::{self, resolve};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive extension
pub const ARCHIVE_EXTENSION: &str = "skill";

const SKIPPED_COMPONENT: &str = "__pycache__";

/// Why packaging stopped
#[derive(Error, Debug)]
pub enum PackageError {
    /// The bundle failed validation; nothing was written.
    #[error("FAILED TO PACKAGE: Validation Error\n{0}")]
    Validation(String),

    #[error("cannot derive an archive name from {}", .0.display())]
    UnnamedBundle(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// A written archive
#[derive(Debug, Clone)]
pub struct Packaged {
    pub archive: PathBuf,
    /// Relative paths stored in the archive, in order
    pub entries: Vec<String>,
}

/// True for files that never go into an archive
fn is_excluded(rel: &Path) -> bool {
    let hidden = rel
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'));
    let cache = rel
        .components()
        .any(|c| matches!(c, Component::Normal(s) if s == SKIPPED_COMPONENT));
    hidden || cache
}

/// Archive entry name: relative path with `/` separators
fn entry_name(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Files under `root` that belong in the archive, sorted by path
fn collect_files(
    root: &Path,
    skip: &[PathBuf],
) -> Result<Vec<(String, PathBuf)>, PackageError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || skip.iter().any(|s| s == path) {
            continue;
        }
        let rel = path.strip_prefix(root).unwrap_or(path);
        if is_excluded(rel) {
            debug!(path = %rel.display(), "skipping excluded file");
            continue;
        }
        files.push((entry_name(rel), path.to_path_buf()));
    }
    Ok(files)
}

/// Validate `skill_path` and, only if it passes, write `<dist>/<dir-name>.skill`
pub fn package_skill(
    skill_path: &Path,
    dist_path: &Path,
    out: &dyn Output,
) -> Result<Packaged, PackageError> {
    let root = resolve(skill_path);

    let report = validate::validate(&root);
    if !report.valid {
        return Err(PackageError::Validation(report.message));
    }

    let bundle_name = root
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PackageError::UnnamedBundle(root.clone()))?;

    std::fs::create_dir_all(dist_path)?;
    let dist = resolve(dist_path);
    let archive = dist.join(format!("{}.{}", bundle_name, ARCHIVE_EXTENSION));
    let partial = dist.join(format!("{}.{}.part", bundle_name, ARCHIVE_EXTENSION));

    let files = collect_files(&root, &[archive.clone(), partial.clone()])?;
    info!(skill = bundle_name, files = files.len(), "writing archive");

    if let Err(e) = write_archive(&partial, &files) {
        let _ = std::fs::remove_file(&partial);
        return Err(e);
    }
    std::fs::rename(&partial, &archive)?;

    out.line(&format!(
        "Successfully packaged skill to: {}",
        archive.display()
    ));
    Ok(Packaged {
        archive,
        entries: files.into_iter().map(|(name, _)| name).collect(),
    })
}

fn write_archive(target: &Path, files: &[(String, PathBuf)]) -> Result<(), PackageError> {
    let mut zip = ZipWriter::new(BufWriter::new(File::create(target)?));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, path) in files {
        zip.start_file(name.as_str(), options)?;
        let mut source = File::open(path)?;
        std::io::copy(&mut source, &mut zip)?;
    }

    zip.finish()?.flush()?;
    Ok(())
}
