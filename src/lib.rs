//! # gorefresh - Go Binary Provenance Resolver and Bulk Updater
//!
//! gorefresh answers one question for every executable in `$GOPATH/bin`:
//! *was this binary built from the source tree currently in `$GOPATH/src`?*
//! When the answer is yes, it re-fetches and re-installs the package the
//! binary came from, so a whole directory of tools can be refreshed in one
//! pass without tracking which binary belongs to which package.
//!
//! ## How provenance is recovered
//!
//! Go toolchain builds embed two metadata sections in the executable: a
//! symbol table and a pc-to-line table. Resolving provenance is a pure
//! function of those bytes:
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌──────────────┐   ┌─────────────┐
//! │  objinfo    │──▶│    gosym     │──▶│  provenance  │──▶│   update    │
//! │ (container  │   │ (symbol/line │   │ (workspace   │   │ (confirm +  │
//! │  sections)  │   │  decoding)   │   │  boundary)   │   │  rebuild)   │
//! └─────────────┘   └──────────────┘   └──────────────┘   └─────────────┘
//! ```
//!
//! 1. [`objinfo`] opens the executable as the host platform's native
//!    container format (ELF on Linux, Mach-O on macOS) and lifts out the
//!    symbol table blob, the line table blob, and the code segment base
//!    address. A file without the Go sections is "not a Go binary", never
//!    an error.
//! 2. [`gosym`] decodes the Go 1.2 pclntab layout, finds the address of
//!    `main.main`, and maps that address to the source file and line that
//!    defined it.
//! 3. [`provenance`] checks whether the resolved file lies under
//!    `$GOPATH/src` (exact path-component boundary) and derives the package
//!    directory to rebuild.
//! 4. [`update`] drives the per-binary state machine - resolve, confirm,
//!    `go get -u`, `go install` - and folds every failure into a per-binary
//!    outcome so one bad binary never stops a batch.
//!
//! ## Module structure
//!
//! - [`cli`]: command-line argument parsing
//! - [`config`]: workspace layout derived from `GOPATH`
//! - [`domain`]: core types and structured errors
//! - [`objinfo`]: format-specific metadata extraction (ELF, Mach-O)
//! - [`gosym`]: symbol and line-number table decoding
//! - [`provenance`]: source-root eligibility and package derivation
//! - [`update`]: orchestration plus the confirm/rebuild collaborators
//!
//! Processing is strictly sequential and shares nothing between binaries;
//! the rebuild steps dominate wall-clock time and serialize naturally on
//! the Go build cache.

pub mod cli;
pub mod config;
pub mod domain;
pub mod gosym;
pub mod objinfo;
pub mod provenance;
pub mod update;
