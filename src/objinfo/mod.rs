//! Format-specific extraction of Go build metadata from executables.
//!
//! A Go toolchain build carries three things gorefresh needs: the legacy
//! symbol table blob, the pc-to-line table, and the base address of the code
//! segment. Each supported container format stores them under its own section
//! names, so there is one adapter per format. Both adapters compile
//! everywhere (tests exercise both on any host), but [`extract`] dispatches
//! to the host platform's native format at compile time - a Linux build only
//! ever reads ELF, a macOS build only Mach-O.

pub mod elf;
pub mod macho;

use crate::domain::ResolveError;
use std::path::Path;

/// Raw metadata regions lifted out of one executable.
///
/// Owned by the resolution pipeline for the duration of one binary and
/// discarded afterwards; nothing is cached across binaries.
#[derive(Debug)]
pub struct ObjectInfo {
    /// Contents of the legacy symbol-table section (empty for Go >= 1.2).
    pub symtab: Vec<u8>,
    /// Contents of the pc-to-line table section.
    pub pclntab: Vec<u8>,
    /// Virtual address of the executable code section.
    pub text_addr: u64,
}

/// Extract Go build metadata using the host platform's native format.
///
/// # Errors
/// [`ResolveError::NotAGoBinary`] when the file is not the native container
/// format or lacks the Go metadata sections; [`ResolveError::Io`] when the
/// file cannot be read at all.
pub fn extract(path: &Path) -> Result<ObjectInfo, ResolveError> {
    #[cfg(target_os = "macos")]
    return macho::extract(path);

    #[cfg(not(target_os = "macos"))]
    elf::extract(path)
}
