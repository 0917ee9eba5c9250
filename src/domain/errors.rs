//! Structured error types for gorefresh
//!
//! Using thiserror for automatic Display implementation and error chaining.

use std::fmt;
use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Failures while resolving a binary back to its source package.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The file is not a Go-built executable: wrong container format, or the
    /// Go metadata sections are absent (shell scripts, stripped binaries,
    /// binaries from other toolchains). Never fatal.
    #[error("not a Go built binary")]
    NotAGoBinary,

    /// The Go metadata sections are present but internally inconsistent, or
    /// the entry symbol is missing.
    #[error("bad symbol/line metadata: {0}")]
    Decode(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ResolveError {
    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        ResolveError::Decode(reason.into())
    }
}

/// Which external toolchain step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildStep {
    /// `go get -u`
    Fetch,
    /// `go install`
    Install,
}

impl fmt::Display for RebuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebuildStep::Fetch => write!(f, "go get -u"),
            RebuildStep::Install => write!(f, "go install"),
        }
    }
}

/// Failure of the external rebuild collaborator.
#[derive(Error, Debug)]
pub enum RebuildError {
    #[error("{step} {package}: failed to run: {source}")]
    Spawn { step: RebuildStep, package: String, source: io::Error },

    #[error("{step} {package} failed ({status})\n{stderr}")]
    Step { step: RebuildStep, package: String, status: ExitStatus, stderr: String },
}
