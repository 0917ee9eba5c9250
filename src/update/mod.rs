//! Update orchestration: resolve, confirm, rebuild - one binary at a time.
//!
//! Per-binary state machine:
//!
//! ```text
//! Start ──▶ Resolved ──▶ Confirmed ──▶ Updated | Failed
//!   │           │             └──▶ SkippedByUser
//!   │           └──(resolution failure)──▶ Failed | Undecodable
//!   ├──▶ NotAGoBinary   (terminal, silent)
//!   └──▶ Ineligible     (terminal, silent)
//! ```
//!
//! Every terminal state is an [`Outcome`] value; nothing that happens to one
//! binary escalates out of a batch. The confirmation prompt and the
//! toolchain invocation are injected through the [`Confirm`] and [`Rebuild`]
//! traits so the pipeline stays testable without a terminal or a Go
//! toolchain.

pub mod confirm;
pub mod rebuild;

pub use confirm::{Confirm, StdinConfirm};
pub use rebuild::{GoToolchain, Rebuild};

use crate::config::Workspace;
use crate::domain::{Outcome, ResolveError};
use crate::gosym::Table;
use crate::objinfo;
use crate::provenance;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Drives the per-binary state machine over one or many binaries.
pub struct Updater<'a, C, R> {
    workspace: &'a Workspace,
    confirmer: C,
    rebuilder: R,
}

impl<'a, C: Confirm, R: Rebuild> Updater<'a, C, R> {
    pub fn new(workspace: &'a Workspace, confirmer: C, rebuilder: R) -> Self {
        Self { workspace, confirmer, rebuilder }
    }

    /// Run the full state machine over one binary.
    ///
    /// Relative paths are resolved against the workspace binaries directory.
    /// With `ask` set, an eligible binary is only rebuilt after the
    /// confirmation collaborator answers affirmatively.
    pub fn process_binary(&mut self, binary: &Path, ask: bool) -> Outcome {
        let binary = if binary.is_absolute() {
            binary.to_path_buf()
        } else {
            self.workspace.bin_dir.join(binary)
        };
        debug!("processing '{}'", binary.display());

        let info = match objinfo::extract(&binary) {
            Ok(info) => info,
            Err(err) => return resolve_failure(&binary, &err),
        };

        let location = match Table::new(&info).and_then(|table| table.resolve_entry()) {
            Ok(location) => location,
            Err(err) => return resolve_failure(&binary, &err),
        };
        debug!("'{}' was built from '{}'", binary.display(), location.file.display());

        let decision = provenance::validate(&location.file, &self.workspace.src_dir);
        let Some(package) = decision.package else {
            debug!(
                "'{}' wasn't built from '{}'",
                binary.display(),
                self.workspace.src_dir.display()
            );
            return Outcome::Ineligible;
        };

        if ask {
            match self.confirmer.confirm(&binary) {
                Ok(true) => {}
                Ok(false) => {
                    debug!("'{}' skipped by user", binary.display());
                    return Outcome::SkippedByUser;
                }
                Err(err) => return Outcome::Failed(format!("reading confirmation: {err}")),
            }
        }

        match self.rebuilder.rebuild(&package) {
            Ok(()) => {
                debug!("'{}' updated from '{}'", binary.display(), package.display());
                Outcome::Updated
            }
            Err(err) => Outcome::Failed(err.to_string()),
        }
    }

    /// Batch mode: apply the state machine to every regular file directly
    /// under the workspace binaries directory, in enumeration order.
    ///
    /// One binary's failure never stops the walk; the returned outcomes are
    /// ordered and complete.
    ///
    /// # Errors
    /// Only when the binaries directory itself cannot be enumerated.
    pub fn process_all(&mut self, ask: bool) -> std::io::Result<Vec<(PathBuf, Outcome)>> {
        let mut outcomes = Vec::new();
        for entry in fs::read_dir(&self.workspace.bin_dir)? {
            let Ok(entry) = entry else { continue };
            let is_regular = entry.file_type().is_ok_and(|kind| kind.is_file());
            if !is_regular {
                continue;
            }
            let path = entry.path();
            let outcome = self.process_binary(&path, ask);
            outcomes.push((path, outcome));
        }
        Ok(outcomes)
    }
}

/// Fold a resolution failure into its terminal outcome.
fn resolve_failure(binary: &Path, err: &ResolveError) -> Outcome {
    debug!("'{}': {err}", binary.display());
    match err {
        ResolveError::NotAGoBinary => Outcome::NotAGoBinary,
        ResolveError::Decode(reason) => Outcome::Undecodable(reason.clone()),
        ResolveError::Io(_) => Outcome::Failed(err.to_string()),
    }
}
