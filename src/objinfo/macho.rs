//! Mach-O adapter.
//!
//! Same three regions as the ELF adapter, under Mach-O section naming:
//! `__gosymtab`, `__gopclntab`, and `__text`.

use super::ObjectInfo;
use crate::domain::ResolveError;
use log::debug;
use object::{BinaryFormat, Object, ObjectSection};
use std::fs;
use std::io;
use std::path::Path;

/// Pull the Go metadata sections out of a Mach-O executable.
///
/// # Errors
/// `NotAGoBinary` when the file does not parse as Mach-O or lacks the Go
/// sections; `Io` when it cannot be read or a present section's data is
/// unreadable (corrupt container).
pub fn extract(path: &Path) -> Result<ObjectInfo, ResolveError> {
    let data = fs::read(path)?;

    let file = object::File::parse(&*data).map_err(|err| {
        debug!("'{}': not an object file: {err}", path.display());
        ResolveError::NotAGoBinary
    })?;
    if file.format() != BinaryFormat::MachO {
        return Err(ResolveError::NotAGoBinary);
    }

    let Some(symtab) = file.section_by_name("__gosymtab") else {
        return Err(ResolveError::NotAGoBinary);
    };
    let symtab = section_data(&symtab)?;

    let Some(pclntab) = file.section_by_name("__gopclntab") else {
        return Err(ResolveError::NotAGoBinary);
    };
    let pclntab = section_data(&pclntab)?;

    let Some(text) = file.section_by_name("__text") else {
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
