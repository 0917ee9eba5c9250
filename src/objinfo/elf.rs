//! ELF adapter.
//!
//! Go's linker emits the metadata as `.gosymtab` and `.gopclntab`, with the
//! line table anchored at the `.text` section address.

use super::ObjectInfo;
use crate::domain::ResolveError;
use log::debug;
use object::{BinaryFormat, Object, ObjectSection};
use std::fs;
use std::io;
use std::path::Path;

/// Pull the Go metadata sections out of an ELF executable.
///
/// # Errors
/// `NotAGoBinary` when the file does not parse as ELF or lacks the Go
/// sections; `Io` when it cannot be read or a present section's data is
/// unreadable (corrupt container).
pub fn extract(path: &Path) -> Result<ObjectInfo, ResolveError> {
    let data = fs::read(path)?;

    let file = object::File::parse(&*data).map_err(|err| {
        // A generic parse failure is indistinguishable from "not ELF at all"
        debug!("'{}': not an object file: {err}", path.display());
        ResolveError::NotAGoBinary
    })?;
    if file.format() != BinaryFormat::Elf {
        return Err(ResolveError::NotAGoBinary);
    }

    let Some(symtab) = file.section_by_name(".gosymtab") else {
        // Primary signal that this is not a Go toolchain build
        return Err(ResolveError::NotAGoBinary);
    };
    let symtab = section_data(&symtab)?;

    let Some(pclntab) = file.section_by_name(".gopclntab") else {
        return Err(ResolveError::NotAGoBinary);
    };
    let pclntab = section_data(&pclntab)?;

    let Some(text) = file.section_by_name(".text") else {
        return Err(ResolveError::NotAGoBinary);
    };

    Ok(ObjectInfo { symtab, pclntab, text_addr: text.address() })
}

fn section_data(section: &object::Section<'_, '_>) -> Result<Vec<u8>, ResolveError> {
    let data = section
        .uncompressed_data()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
    Ok(data.into_owned())
}
