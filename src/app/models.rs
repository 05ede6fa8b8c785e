use std::path::PathBuf;

/// Represents the final options for one run after merging CLI args and
/// console answers.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub sources: Vec<PathBuf>,
    pub destination: PathBuf,
    pub move_files: bool,
    pub exclude: Vec<String>,
    pub dry_run: bool,
    pub auto: bool,
}

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every source was processed.
    Completed,
    /// The user declined a conflict prompt mid-run.
    Aborted,
}

/// A single operation the organizer cannot complete on its own.
#[derive(Debug, Clone)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub source: PathBuf,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// The destination file exists with a different modification time.
    DestinationExists,
    /// The parent directories for the destination could not be created.
    CreateDirFailed,
    /// The destination file could not be written.
    CreateFileFailed,
}

impl ConflictKind {
    pub fn headline(self) -> &'static str {
        match self {
            ConflictKind::DestinationExists => "Destination file already exists",
            ConflictKind::CreateDirFailed => "Directories could not be created:",
            ConflictKind::CreateFileFailed => "File could not be created:",
        }
    }
}

/// Answer returned by a resolver for one conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Skip the conflicting file and keep going.
    Continue,
    /// Stop the run.
    Abort,
}

/// Whether the console resolver still asks, or waves everything through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    AskEachTime,
    AlwaysContinue,
}
