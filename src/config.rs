//! Workspace layout derived from the environment.

use anyhow::{bail, Result};
use std::env;
use std::path::PathBuf;

/// Source and binary subtrees of the Go workspace.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// `$GOPATH/src` - eligible binaries must resolve to a file under here.
    pub src_dir: PathBuf,
    /// `$GOPATH/bin` - default search directory and base for relative targets.
    pub bin_dir: PathBuf,
}

impl Workspace {
    /// Build the workspace layout from `GOPATH`.
    ///
    /// # Errors
    /// Fails when `GOPATH` is unset. This is the only fatal startup
    /// condition; everything later is per-binary and non-fatal.
    pub fn from_env() -> Result<Self> {
        match env::var_os("GOPATH") {
            Some(root) => Ok(Self::from_root(PathBuf::from(root))),
            None => bail!("GOPATH is not set"),
        }
    }

    /// Workspace rooted at an explicit directory, for tests and embedding.
    #[must_use]
    pub fn from_root(root: PathBuf) -> Self {
        Self { src_dir: root.join("src"), bin_dir: root.join("bin") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_from_root_layout() {
        let ws = Workspace::from_root(PathBuf::from("/home/me/go"));
        assert_eq!(ws.src_dir, Path::new("/home/me/go/src"));
        assert_eq!(ws.bin_dir, Path::new("/home/me/go/bin"));
    }
}
