//! Legacy `.gosymtab` decoding.
//!
//! Toolchains since Go 1.2 emit an empty section and put function symbols in
//! the pclntab instead, so on modern binaries this parses nothing. Older
//! builds stored fixed records here:
//!
//! ```text
//! value (pointer width) | kind byte, high bit set | name, NUL-terminated |
//! type address (pointer width)
//! ```
//!
//! Byte order and pointer width are not recorded in this section; they come
//! from the pclntab header ([`Layout`]).

use super::pclntab::Layout;
use crate::domain::ResolveError;

/// One legacy symbol record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sym {
    pub value: u64,
    /// Symbol kind letter (`T` text, `D` data, ...), high bit stripped.
    pub kind: u8,
    pub name: String,
}

/// Parse every record in the blob. An empty blob is a modern build and
/// yields an empty list.
///
/// # Errors
/// `Decode` when a record is truncated or malformed.
pub fn parse(data: &[u8], layout: Layout) -> Result<Vec<Sym>, ResolveError> {
    let mut syms = Vec::new();
    let mut p = data;
    while !p.is_empty() {
        let value = layout
            .uintptr_at(p, 0)
            .ok_or_else(|| ResolveError::decode("symbol table truncated"))?;
        p = &p[layout.ptr_size..];

        let (&kind, rest) =
            p.split_first().ok_or_else(|| ResolveError::decode("symbol table truncated"))?;
        if kind & 0x80 == 0 {
            return Err(ResolveError::decode("bad symbol kind byte"));
        }
        p = rest;

        let nul = p
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| ResolveError::decode("unterminated symbol name"))?;
        let name = std::str::from_utf8(&p[..nul])
            .map_err(|_| ResolveError::decode("symbol name is not UTF-8"))?
            .to_owned();
        p = &p[nul + 1..];

        // Skip the Go type address
        if p.len() < layout.ptr_size {
            return Err(ResolveError::decode("symbol table truncated"));
        }
        p = &p[layout.ptr_size..];

        syms.push(Sym { value, kind: kind & 0x7F, name });
    }
    Ok(syms)
}
