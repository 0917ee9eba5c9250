//! Decoder for the Go toolchain's symbol and line-number metadata.
//!
//! The Go linker records, for every function in the binary, where its
//! machine code lives and which source file and line each program counter
//! maps back to. This module decodes that metadata just far enough to answer
//! one question: *which source file defines `main.main`?* That file is the
//! binary's provenance anchor.
//!
//! Two encodings are involved:
//!
//! - **pclntab** ([`pclntab`]): the pc-to-line table, a monotonic
//!   address-ordered index from program counters to `(file, line)` pairs.
//!   Since Go 1.2 it also carries the function table (name and entry
//!   address per function).
//! - **gosymtab** ([`symtab`]): the legacy symbol table. Toolchains since
//!   Go 1.2 emit an empty section and rely on the pclntab function table
//!   instead; older builds stored fixed symbol records here.
//!
//! Decoding is read-only; a [`Table`] borrows its [`ObjectInfo`] and shares
//! nothing between calls.

pub mod pclntab;
pub mod symtab;

use crate::domain::ResolveError;
use crate::objinfo::ObjectInfo;
use std::path::PathBuf;

/// Name the Go toolchain gives the program's main routine.
pub const ENTRY_SYMBOL: &str = "main.main";

/// A resolved source position for one program counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: PathBuf,
    pub line: u32,
}

/// Combined symbol and line-number index for one binary.
pub struct Table<'data> {
    line: pclntab::LineTable<'data>,
    syms: Vec<symtab::Sym>,
}

impl<'data> Table<'data> {
    /// Decode both metadata blobs.
    ///
    /// # Errors
    /// `Decode` when either table is malformed or of an unsupported version.
    pub fn new(info: &'data ObjectInfo) -> Result<Self, ResolveError> {
        let line = pclntab::LineTable::parse(&info.pclntab, info.text_addr)?;
        let syms = symtab::parse(&info.symtab, line.layout())?;
        Ok(Self { line, syms })
    }

    /// Entry address of a named function.
    ///
    /// The legacy symbol table wins when it is non-empty; Go 1.2+ builds
    /// leave it empty and the pclntab function table is consulted instead.
    #[must_use]
    pub fn func_addr(&self, name: &str) -> Option<u64> {
        if !self.syms.is_empty() {
            return self.syms.iter().find(|s| s.name == name).map(|s| s.value);
        }
        self.line.func_addr(name)
    }

    /// Map a program counter to the nearest preceding line breakpoint.
    #[must_use]
    pub fn pc_to_line(&self, pc: u64) -> Option<Location> {
        self.line.pc_to_line(pc)
    }

    /// Resolve the program's entry routine to its defining source line.
    ///
    /// # Errors
    /// `Decode` when the entry symbol is absent (incompatible build) or its
    /// address falls outside every recorded line range.
    pub fn resolve_entry(&self) -> Result<Location, ResolveError> {
        let entry = self
            .func_addr(ENTRY_SYMBOL)
            .ok_or_else(|| ResolveError::decode(format!("entry symbol {ENTRY_SYMBOL} not found")))?;
        self.pc_to_line(entry).ok_or_else(|| {
            ResolveError::decode(format!("no line table entry covers pc {entry:#x}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metadata_is_decode_error() {
        let info = ObjectInfo { symtab: Vec::new(), pclntab: Vec::new(), text_addr: 0 };
        assert!(matches!(Table::new(&info), Err(ResolveError::Decode(_))));
    }
}
