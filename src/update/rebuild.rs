//! External Go toolchain invocation.
//!
//! The orchestrator only sees the [`Rebuild`] trait; whether a rebuild
//! shells out or is simulated by a test double is invisible to it.

use crate::domain::{RebuildError, RebuildStep};
use log::debug;
use std::path::Path;
use std::process::Command;

/// Rebuilds one package directory.
pub trait Rebuild {
    /// # Errors
    /// Either toolchain step failing to spawn or exiting non-zero.
    fn rebuild(&self, package: &Path) -> Result<(), RebuildError>;
}

impl<R: Rebuild + ?Sized> Rebuild for &R {
    fn rebuild(&self, package: &Path) -> Result<(), RebuildError> {
        (**self).rebuild(package)
    }
}

/// Shells out to `go get -u` followed by `go install`.
///
/// Each step runs to completion with stderr captured; there is no timeout,
/// so a hung toolchain hangs the run.
pub struct GoToolchain;

impl Rebuild for GoToolchain {
    fn rebuild(&self, package: &Path) -> Result<(), RebuildError> {
        run_step(RebuildStep::Fetch, Command::new("go").args(["get", "-u"]).arg(package), package)?;
        run_step(RebuildStep::Install, Command::new("go").arg("install").arg(package), package)
    }
}

fn run_step(step: RebuildStep, cmd: &mut Command, package: &Path) -> Result<(), RebuildError> {
    debug!("running {step} {}", package.display());
    let output = cmd.output().map_err(|source| RebuildError::Spawn {
        step,
        package: package.display().to_string(),
        source,
    })?;
    if output.status.success() {
        return Ok(());
    }
    Err(RebuildError::Step {
        step,
        package: package.display().to_string(),
        status: output.status,
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Exercises the non-zero-exit path without requiring a Go toolchain:
    // `false` ignores its arguments and exits 1.
    #[test]
    fn test_failed_step_captures_status() {
        let package = Path::new("pkg");
        let err = run_step(RebuildStep::Fetch, &mut Command::new("false"), package).unwrap_err();
        match err {
            RebuildError::Step { step, status, .. } => {
                assert_eq!(step, RebuildStep::Fetch);
                assert!(!status.success());
            }
            RebuildError::Spawn { .. } => panic!("expected a step failure"),
        }
    }

    #[test]
    fn test_missing_command_is_spawn_error() {
        let package = Path::new("pkg");
        let mut cmd = Command::new("gorefresh-no-such-command");
        let err = run_step(RebuildStep::Install, &mut cmd, package).unwrap_err();
        assert!(matches!(err, RebuildError::Spawn { step: RebuildStep::Install, .. }));
    }

    #[test]
    fn test_captured_stderr_is_surfaced() {
        let package = Path::new("pkg");
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo build broke >&2; exit 2"]);
        let err = run_step(RebuildStep::Install, &mut cmd, package).unwrap_err();
        assert!(err.to_string().contains("build broke"));
    }
}
