//! Provenance validation.
//!
//! Given the source file a binary's entry routine resolved to, decide
//! whether that file belongs to the configured workspace and, if so, which
//! package directory rebuilds the binary. Pure path arithmetic; no I/O.

use std::path::{Path, PathBuf};

/// Eligibility decision for one resolved source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub eligible: bool,
    /// Package directory relative to the source root, set iff eligible.
    pub package: Option<PathBuf>,
}

impl Provenance {
    fn ineligible() -> Self {
        Self { eligible: false, package: None }
    }
}

/// Decide whether `source_file` lies under `source_root` and derive the
/// package directory.
///
/// The prefix match is component-wise, so a root of `/ws/src` never claims
/// `/ws/srcextra/main.go`. A file sitting directly in the root has no
/// package directory and is ineligible.
#[must_use]
pub fn validate(source_file: &Path, source_root: &Path) -> Provenance {
    let Ok(relative) = source_file.strip_prefix(source_root) else {
        return Provenance::ineligible();
    };
    match relative.parent() {
        Some(package) if !package.as_os_str().is_empty() => {
            Provenance { eligible: true, package: Some(package.to_path_buf()) }
        }
        _ => Provenance::ineligible(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligible_package_under_root() {
        let decision = validate(Path::new("/ws/src/pkg/main.go"), Path::new("/ws/src"));
        assert!(decision.eligible);
        assert_eq!(decision.package.as_deref(), Some(Path::new("pkg")));
    }

    #[test]
    fn test_nested_package_path() {
        let decision =
            validate(Path::new("/ws/src/github.com/user/tool/cmd/main.go"), Path::new("/ws/src"));
        assert_eq!(decision.package.as_deref(), Some(Path::new("github.com/user/tool/cmd")));
    }

    #[test]
    fn test_string_prefix_without_component_boundary() {
        // `/ws/src` is a string prefix of `/ws/srcextra` but not a parent
        let decision = validate(Path::new("/ws/srcextra/pkg/main.go"), Path::new("/ws/src"));
        assert_eq!(decision, Provenance { eligible: false, package: None });
    }

    #[test]
    fn test_foreign_root() {
        let decision = validate(Path::new("/ws/src/pkg/main.go"), Path::new("/other/src"));
        assert!(!decision.eligible);
    }

    #[test]
    fn test_file_directly_in_root_has_no_package() {
        let decision = validate(Path::new("/ws/src/main.go"), Path::new("/ws/src"));
        assert!(!decision.eligible);
    }

    #[test]
    fn test_root_itself() {
        let decision = validate(Path::new("/ws/src"), Path::new("/ws/src"));
        assert!(!decision.eligible);
    }
}
