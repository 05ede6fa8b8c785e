use crate::app::models::{Conflict, ConflictKind, Decision, RunOptions, RunOutcome};
use crate::app::prompt::ConflictResolver;
use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Local};
use filetime::FileTime;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::fs;
use std::path::{Path, PathBuf};

/// Whether to keep walking after one file has been handled.
enum Flow {
    Continue,
    Abort,
}

pub struct Organizer<R> {
    destination: PathBuf,
    move_files: bool,
    dry_run: bool,
    exclude_set: GlobSet,
    resolver: R,
}

impl<R: ConflictResolver> Organizer<R> {
    pub fn new(options: &RunOptions, resolver: R) -> Result<Self> {
        Ok(Self {
            destination: options.destination.clone(),
            move_files: options.move_files,
            dry_run: options.dry_run,
            exclude_set: build_globset(&options.exclude)?,
            resolver,
        })
    }

    /// Processes every source path to completion, or stops at the first
    /// declined conflict.
    pub fn apply(&mut self, sources: &[PathBuf]) -> Result<RunOutcome> {
        for source in sources {
            if let Flow::Abort = self.apply_source(source)? {
                return Ok(RunOutcome::Aborted);
            }
        }
        Ok(RunOutcome::Completed)
    }

    /// Walks one source root. A root that is a plain file is yielded as a
    /// single entry by the walker, so both cases read the same.
    fn apply_source(&mut self, root: &Path) -> Result<Flow> {
        // Visit every entry, hidden files included.
        let walker = WalkBuilder::new(root).standard_filters(false).build();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Error walking entry: {}", err);
                    continue;
                }
            };
            if entry.file_type().map_or(true, |kind| kind.is_dir()) {
                continue;
            }
            if self.is_excluded(root, entry.path()) {
                continue;
            }
            if let Flow::Abort = self.organize(entry.path())? {
                return Ok(Flow::Abort);
            }
        }

        Ok(Flow::Continue)
    }

    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        if self.exclude_set.is_empty() {
            return false;
        }
        let Some(relative) = diff_paths(path, root) else {
            return false;
        };
        // A root that is itself a file diffs to an empty path.
        if relative.as_os_str().is_empty() {
            return false;
        }
        self.exclude_set.is_match(&relative)
    }

    /// Places one file under `<destination>/<year>/<month name>/`.
    fn organize(&mut self, source: &Path) -> Result<Flow> {
        let target = match self.target_for(source) {
            Ok(target) => target,
            Err(err) => {
                log::warn!("Skipping {}: {:#}", source.display(), err);
                return Ok(Flow::Continue);
            }
        };

        if target.exists() {
            return self.handle_existing(source, &target);
        }

        if self.dry_run {
            log::info!(
                "Would {} {} -> {}",
                self.verb(),
                source.display(),
                target.display()
            );
            return Ok(Flow::Continue);
        }

        if let Some(parent) = target.parent() {
            if !parent.exists() {
                if let Err(err) = fs::create_dir_all(parent) {
                    log::error!("Failed to create {}: {}", parent.display(), err);
                    return self.ask(ConflictKind::CreateDirFailed, source, &target);
                }
            }
        }

        self.place(source, &target)
    }

    fn place(&mut self, source: &Path, target: &Path) -> Result<Flow> {
        if self.move_files {
            match fs::rename(source, target) {
                Ok(()) => {
                    log::info!("Moved {} -> {}", source.display(), target.display());
                    Ok(Flow::Continue)
                }
                Err(err) => {
                    // Cross-device links and permission failures land here
                    // too; all of them surface as the existing-destination
                    // conflict.
                    log::warn!("Rename failed for {}: {}", source.display(), err);
                    self.handle_existing(source, target)
                }
            }
        } else {
            match copy_preserving_mtime(source, target) {
                Ok(()) => {
                    log::info!("Copied {} -> {}", source.display(), target.display());
                    Ok(Flow::Continue)
                }
                Err(err) => {
                    log::error!("{:#}", err);
                    self.ask(ConflictKind::CreateFileFailed, source, target)
                }
            }
        }
    }

    /// Equal modification times mean the file is already organized; that
    /// case is skipped silently so reruns stay quiet.
    fn handle_existing(&mut self, source: &Path, target: &Path) -> Result<Flow> {
        if timestamps_match(source, target) {
            log::debug!("{} is already organized", source.display());
            return Ok(Flow::Continue);
        }
        if self.dry_run {
            log::warn!(
                "Would conflict: {} already exists with a different modification time",
                target.display()
            );
            return Ok(Flow::Continue);
        }
        self.ask(ConflictKind::DestinationExists, source, target)
    }

    fn ask(&mut self, kind: ConflictKind, source: &Path, target: &Path) -> Result<Flow> {
        let conflict = Conflict {
            kind,
            source: source.to_path_buf(),
            destination: target.to_path_buf(),
        };
        match self.resolver.resolve(&conflict)? {
            Decision::Continue => Ok(Flow::Continue),
            Decision::Abort => Ok(Flow::Abort),
        }
    }

    fn target_for(&self, source: &Path) -> Result<PathBuf> {
        let modified = fs::metadata(source)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("Failed to read modification time of {}", source.display()))?;
        let local: DateTime<Local> = modified.into();
        let name = source
            .file_name()
            .with_context(|| format!("{} has no file name", source.display()))?;

        Ok(self
            .destination
            .join(local.year().to_string())
            .join(local.format("%B").to_string())
            .join(name))
    }

    fn verb(&self) -> &'static str {
        if self.move_files {
            "move"
        } else {
            "copy"
        }
    }
}

fn timestamps_match(source: &Path, target: &Path) -> bool {
    match (modified_time(source), modified_time(target)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn modified_time(path: &Path) -> std::io::Result<std::time::SystemTime> {
    fs::metadata(path)?.modified()
}

/// Copies bytes and carries the source's modification time over, so a later
/// run recognizes the destination as already organized.
fn copy_preserving_mtime(source: &Path, target: &Path) -> Result<()> {
    fs::copy(source, target)
        .with_context(|| format!("Failed to copy {} to {}", source.display(), target.display()))?;
    let modified = modified_time(source)
        .with_context(|| format!("Failed to read modification time of {}", source.display()))?;
    filetime::set_file_mtime(target, FileTime::from_system_time(modified))
        .with_context(|| format!("Failed to set modification time of {}", target.display()))?;
    Ok(())
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).context(format!("Invalid glob pattern: {}", pattern))?);
    }
    Ok(builder.build()?)
}
