//! Shared builders for synthetic Go binaries.
//!
//! Integration tests cannot link a real Go toolchain, so they assemble the
//! metadata by hand: a Go 1.2 pclntab blob describing a single `main.main`,
//! wrapped in an ELF or Mach-O container emitted with the `object` crate's
//! write API.

#![allow(dead_code)] // not every test binary uses every builder

use object::write::Object;
use object::{Architecture, BinaryFormat, Endianness, SectionKind};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENTRY_PC: u64 = 0x1000;
pub const END_PC: u64 = 0x1010;
pub const ENTRY_LINE: u32 = 42;

/// Single-function Go 1.2 pclntab: `name` spans `[entry, end)` and every pc
/// in the range maps to `(file, line)`. Little-endian, 8-byte pointers,
/// instruction quantum 1.
pub fn build_pclntab(name: &str, entry: u64, end: u64, file: &str, line: u32) -> Vec<u8> {
    let mut d = vec![0xFB, 0xFF, 0xFF, 0xFF, 0, 0, 1, 8];
    d.extend(1u64.to_le_bytes()); // function count
    d.extend(entry.to_le_bytes()); // functab[0].pc
    let funcoff_pos = d.len();
    d.extend(0u64.to_le_bytes()); // functab[0].off, patched below
    d.extend(end.to_le_bytes()); // end-of-text pc
    let fileoff_pos = d.len();
    d.extend(0u32.to_le_bytes()); // file table offset, patched below

    // Function record
    let funcoff = d.len() as u64;
    d[funcoff_pos..funcoff_pos + 8].copy_from_slice(&funcoff.to_le_bytes());
    d.extend(entry.to_le_bytes());
    let nameoff_pos = d.len();
    d.extend(0u32.to_le_bytes()); // name offset, patched below
    d.extend(0u32.to_le_bytes()); // args
    d.extend(0u32.to_le_bytes()); // frame
    d.extend(0u32.to_le_bytes()); // pcsp
    let pcfile_pos = d.len();
    d.extend(0u32.to_le_bytes()); // pcfile offset, patched below
    let pcln_pos = d.len();
    d.extend(0u32.to_le_bytes()); // pcln offset, patched below

    let nameoff = d.len() as u32;
    patch_u32(&mut d, nameoff_pos, nameoff);
    d.extend(name.as_bytes());
    d.push(0);

    // File number 1 over the whole range, then the line number
    let span = u32::try_from(end - entry).unwrap();
    let pcfile = d.len() as u32;
    patch_u32(&mut d, pcfile_pos, pcfile);
    push_pc_value(&mut d, 1, span);
    let pcln = d.len() as u32;
    patch_u32(&mut d, pcln_pos, pcln);
    push_pc_value(&mut d, i32::try_from(line).unwrap(), span);

    // File table: slot 0 reserved, slot 1 is our file
    let fileoff = d.len() as u32;
    patch_u32(&mut d, fileoff_pos, fileoff);
    d.extend(2u32.to_le_bytes());
    let name_pos = d.len();
    d.extend(0u32.to_le_bytes());
    let file_nameoff = d.len() as u32;
    patch_u32(&mut d, name_pos, file_nameoff);
    d.extend(file.as_bytes());
    d.push(0);

    d
}

fn push_pc_value(d: &mut Vec<u8>, value: i32, pc_span: u32) {
    // One (value, span) pair starting from -1, then the terminator
    let delta = u32::try_from(value + 1).unwrap();
    push_varint(d, delta << 1);
    push_varint(d, pc_span);
    d.push(0);
}

fn push_varint(d: &mut Vec<u8>, mut v: u32) {
    while v >= 0x80 {
        d.push((v & 0x7F) as u8 | 0x80);
        v >>= 7;
    }
    d.push(v as u8);
}

fn patch_u32(d: &mut [u8], pos: usize, value: u32) {
    d[pos..pos + 4].copy_from_slice(&value.to_le_bytes());
}

/// Wrap metadata blobs in a container. `None` omits the section entirely,
/// which is how non-Go and stripped binaries look.
pub fn build_container(
    format: BinaryFormat,
    symtab: Option<&[u8]>,
    pclntab: Option<&[u8]>,
) -> Vec<u8> {
    let mut obj = Object::new(format, Architecture::X86_64, Endianness::Little);

    let (text_seg, text_name, data_seg, symtab_name, pclntab_name) = match format {
        BinaryFormat::MachO => {
            (&b"__TEXT"[..], &b"__text"[..], &b"__DATA"[..], &b"__gosymtab"[..], &b"__gopclntab"[..])
        }
        _ => (&b""[..], &b".text"[..], &b""[..], &b".gosymtab"[..], &b".gopclntab"[..]),
    };

    let text = obj.add_section(text_seg.to_vec(), text_name.to_vec(), SectionKind::Text);
    obj.append_section_data(text, &[0u8; 16], 16);

    if let Some(symtab) = symtab {
        let id = obj.add_section(data_seg.to_vec(), symtab_name.to_vec(), SectionKind::ReadOnlyData);
        obj.append_section_data(id, symtab, 8);
    }
    if let Some(pclntab) = pclntab {
        let id =
            obj.add_section(data_seg.to_vec(), pclntab_name.to_vec(), SectionKind::ReadOnlyData);
        obj.append_section_data(id, pclntab, 8);
    }

    obj.write().expect("emit container")
}

/// Write a synthetic Go binary whose `main.main` resolves to `source_file`.
pub fn write_go_binary(
    dir: &Path,
    name: &str,
    format: BinaryFormat,
    source_file: &str,
) -> PathBuf {
    let pclntab = build_pclntab("main.main", ENTRY_PC, END_PC, source_file, ENTRY_LINE);
    let container = build_container(format, Some(&[]), Some(&pclntab));
    let path = dir.join(name);
    fs::write(&path, container).expect("write binary");
    path
}
