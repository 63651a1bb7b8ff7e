//! Manifest copying.
//! Mirrors each manifest entry from the template's source directory into the
//! generated project, replacing whatever copy was there before.

use log::{debug, warn};
use std::fmt;
use std::fs::{self, File, FileTimes, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::MANIFEST;
use crate::error::{Error, Result};
use crate::resolver::{resolve_template_dir, Resolution, ResolveContext};

/// Kind of a copied manifest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Directory => f.write_str("directory"),
            EntryKind::File => f.write_str("file"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedEntry {
    pub name: String,
    pub kind: EntryKind,
    pub target: PathBuf,
}

/// What a manifest copy did (or would do, for a dry run).
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub copied: Vec<CopiedEntry>,
    /// Source paths of manifest entries that did not exist
    pub missing: Vec<PathBuf>,
    /// Source paths left alone because the destination lies on top of them
    pub skipped: Vec<PathBuf>,
}

/// Resolves the template directory and copies [`MANIFEST`] from its source
/// directory into `project_dir`.
///
/// Nothing is written when resolution fails.
///
/// # Errors
/// * `Error::TemplateNotFound` if no template directory could be found
/// * Any error from [`copy_manifest`]
pub fn copy_template_sources<P: AsRef<Path>>(
    ctx: &ResolveContext,
    project_dir: P,
    dry_run: bool,
) -> Result<(Resolution, CopyReport)> {
    let resolution = resolve_template_dir(ctx)?;
    println!(
        "Post-generation: copying source files from {} ({})",
        resolution.source_dir.display(),
        resolution.strategy
    );
    let report = copy_manifest(&resolution.source_dir, project_dir, &MANIFEST, dry_run)?;
    Ok((resolution, report))
}

/// Copies every entry of `manifest` from `source_dir` into `project_dir`.
///
/// Entries missing from `source_dir` are reported and skipped. Directories
/// replace their destination entirely; files overwrite it. An entry whose
/// destination is the source itself, or lies inside or around it, is skipped
/// so the template's own files are never removed.
///
/// # Errors
/// * `Error::IoError` / `Error::WalkDirError` on any filesystem failure; the
///   copy stops at the failing entry
pub fn copy_manifest<P: AsRef<Path>, Q: AsRef<Path>>(
    source_dir: P,
    project_dir: Q,
    manifest: &[&str],
    dry_run: bool,
) -> Result<CopyReport> {
    let source_dir = source_dir.as_ref();
    let project_dir = project_dir.as_ref();
    let mut report = CopyReport::default();

    if !dry_run {
        fs::create_dir_all(project_dir).map_err(Error::IoError)?;
    }

    for item in manifest {
        let name = item.trim_end_matches('/');
        let source = source_dir.join(name);
        let target = project_dir.join(name);

        let metadata = match fs::metadata(&source) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Source not found: {}", source.display());
                report.missing.push(source);
                continue;
            }
            Err(e) => return Err(Error::IoError(e)),
        };

        if overlaps(&source, &target) {
            warn!(
                "Skipping {}: destination {} overlaps the template source",
                name,
                target.display()
            );
            report.skipped.push(source);
            continue;
        }

        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        if dry_run {
            println!("Would copy {kind}: {name}");
        } else {
            match kind {
                EntryKind::Directory => mirror_dir(&source, &target)?,
                EntryKind::File => replace_file(&source, &target, &metadata)?,
            }
            println!("Copied {kind}: {name}");
        }

        report.copied.push(CopiedEntry {
            name: name.to_string(),
            kind,
            target,
        });
    }

    Ok(report)
}

/// Replaces `target` with a recursive copy of `source`.
pub fn mirror_dir(source: &Path, target: &Path) -> Result<()> {
    remove_existing(target)?;

    let mut dirs = Vec::new();
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .unwrap_or_else(|_| Path::new(""));
        let dest = target.join(relative);
        let metadata = entry.metadata()?;

        if metadata.is_dir() {
            debug!("Creating directory: {}", dest.display());
            fs::create_dir_all(&dest).map_err(Error::IoError)?;
            dirs.push((dest, metadata));
        } else {
            debug!("Copying file: {}", dest.display());
            copy_with_times(entry.path(), &dest, &metadata)?;
        }
    }

    // Children are written after their parent was created, so directory
    // times are restored deepest-first once everything is in place.
    for (dest, metadata) in dirs.iter().rev() {
        set_times(dest, metadata)?;
        fs::set_permissions(dest, metadata.permissions()).map_err(Error::IoError)?;
    }

    Ok(())
}

/// Removes whatever sits at `target` first so read-only copies from an earlier
/// run and directories of the same name are replaced too.
fn replace_file(source: &Path, target: &Path, metadata: &Metadata) -> Result<()> {
    remove_existing(target)?;
    copy_with_times(source, target, metadata)
}

fn remove_existing(target: &Path) -> Result<()> {
    let existing = match target.symlink_metadata() {
        Ok(existing) => existing,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(Error::IoError(e)),
    };
    debug!("Removing existing {}", target.display());
    if existing.is_dir() {
        fs::remove_dir_all(target).map_err(Error::IoError)
    } else {
        fs::remove_file(target).map_err(Error::IoError)
    }
}

/// Whether writing `target` would remove or overwrite anything under `source`.
fn overlaps(source: &Path, target: &Path) -> bool {
    let source = canonical(source);
    let target = canonical(target);
    target.starts_with(&source) || source.starts_with(&target)
}

/// Canonical form of `path`; a missing final component is joined onto its
/// canonical parent.
fn canonical(path: &Path) -> PathBuf {
    if let Ok(path) = fs::canonicalize(path) {
        return path;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|parent| parent.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

/// Copies contents and permissions, then restores access and modification times.
fn copy_with_times(source: &Path, target: &Path, metadata: &Metadata) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    fs::copy(source, target).map_err(Error::IoError)?;
    set_times(target, metadata)
}

fn set_times(path: &Path, metadata: &Metadata) -> Result<()> {
    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }

    // The owner may update times through a read-only handle, which also
    // covers directories and files copied without write permission.
    #[cfg(unix)]
    let file = File::open(path);
    #[cfg(not(unix))]
    let file = if path.is_dir() {
        return Ok(());
    } else {
        File::options().write(true).open(path)
    };

    file.and_then(|f| f.set_times(times)).map_err(Error::IoError)
}
