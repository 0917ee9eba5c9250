//! Go 1.2 pc-to-line table decoding.
//!
//! Layout (offsets relative to the start of the blob):
//!
//! ```text
//! header    magic u32, two zero bytes, instruction quantum u8, ptr size u8
//! +8        function count (uintptr)
//! +8+ptr    function table: count pairs of (entry pc, func record offset),
//!           terminated by the end-of-text pc, then a u32 offset to the
//!           file name table
//! ...       per-function records: entry pc, then i32 fields
//!           (name, args, frame, pcsp, pcfile, pcln, ...)
//! ...       pc-value tables: (value delta zigzag-varint,
//!           pc delta varint * quantum) pairs, value starts at -1
//! ...       file table: u32 count, then u32 name offsets, index 0 reserved
//! ```
//!
//! Byte order and pointer width are inferred from the magic. Function table
//! pcs are absolute, so the text base address only serves as a consistency
//! anchor. Later layouts (Go 1.16+) use different magics and are rejected as
//! unsupported rather than misread.

use super::Location;
use crate::domain::ResolveError;
use log::debug;
use std::path::PathBuf;

/// Magic for the Go 1.2 table layout, as stored little-endian.
const GO12_MAGIC_LE: [u8; 4] = [0xFB, 0xFF, 0xFF, 0xFF];
const GO12_MAGIC_BE: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFB];

/// Byte order and pointer width taken from the pclntab header.
///
/// The legacy symbol table has no header of its own and shares this layout.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub big_endian: bool,
    pub ptr_size: usize,
}

impl Layout {
    pub(crate) fn u32_at(&self, data: &[u8], off: usize) -> Option<u32> {
        let bytes: [u8; 4] = data.get(off..off + 4)?.try_into().ok()?;
        Some(if self.big_endian { u32::from_be_bytes(bytes) } else { u32::from_le_bytes(bytes) })
    }

    pub(crate) fn uintptr_at(&self, data: &[u8], off: usize) -> Option<u64> {
        if self.ptr_size == 4 {
            return self.u32_at(data, off).map(u64::from);
        }
        let bytes: [u8; 8] = data.get(off..off + 8)?.try_into().ok()?;
        Some(if self.big_endian { u64::from_be_bytes(bytes) } else { u64::from_le_bytes(bytes) })
    }
}

/// One function's metadata, as much of the record as the resolver needs.
#[derive(Debug, Clone, Copy)]
struct FuncRec {
    entry: u64,
    name_off: u32,
    pcfile_off: u32,
    pcln_off: u32,
}

/// Address-ordered pc-to-line index over one pclntab blob.
#[derive(Debug)]
pub struct LineTable<'data> {
    data: &'data [u8],
    layout: Layout,
    quantum: u32,
    nfunctab: usize,
    /// Function table region: `nfunctab` (pc, offset) pairs plus the end pc.
    functab: &'data [u8],
    /// File table region: count word followed by name offsets.
    filetab: &'data [u8],
    nfiletab: u32,
}

impl<'data> LineTable<'data> {
    /// Parse the blob header and locate the embedded tables.
    ///
    /// # Errors
    /// `Decode` on truncation, an unsupported magic, or nonsense header
    /// fields.
    pub fn parse(data: &'data [u8], text_addr: u64) -> Result<Self, ResolveError> {
        if data.len() < 16 {
            return Err(ResolveError::decode("line table truncated"));
        }
        let magic = [data[0], data[1], data[2], data[3]];
        let layout = match magic {
            GO12_MAGIC_LE => Layout { big_endian: false, ptr_size: usize::from(data[7]) },
            GO12_MAGIC_BE => Layout { big_endian: true, ptr_size: usize::from(data[7]) },
            _ => return Err(ResolveError::decode("unsupported line table version")),
        };
        if data[4] != 0 || data[5] != 0 {
            return Err(ResolveError::decode("bad line table header padding"));
        }
        if !matches!(layout.ptr_size, 4 | 8) {
            return Err(ResolveError::decode("bad pointer size"));
        }
        let quantum = u32::from(data[6]);
        if !matches!(quantum, 1 | 2 | 4) {
            return Err(ResolveError::decode("bad instruction quantum"));
        }

        let nfunctab = layout
            .uintptr_at(data, 8)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| ResolveError::decode("line table truncated"))?;
        let functab = &data[8 + layout.ptr_size..];
        let functab_size = nfunctab
            .checked_mul(2)
            .and_then(|n| n.checked_add(1))
            .and_then(|n| n.checked_mul(layout.ptr_size))
            .filter(|&size| size.checked_add(4).is_some_and(|end| end <= functab.len()))
            .ok_or_else(|| ResolveError::decode("function table out of range"))?;

        let fileoff = layout
            .u32_at(functab, functab_size)
            .ok_or_else(|| ResolveError::decode("function table out of range"))?;
        let filetab = data
            .get(fileoff as usize..)
            .ok_or_else(|| ResolveError::decode("file table out of range"))?;
        let nfiletab = layout
            .u32_at(filetab, 0)
            .ok_or_else(|| ResolveError::decode("file table out of range"))?;

        let table = Self { data, layout, quantum, nfunctab, functab, filetab, nfiletab };
        if let Some(first_pc) = table.functab_pc(0) {
            if first_pc != text_addr {
                debug!("function table starts at {first_pc:#x}, text base is {text_addr:#x}");
            }
        }
        Ok(table)
    }

    /// Header layout, shared with the legacy symbol table decoder.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Entry address of a named function, from the function table.
    #[must_use]
    pub fn func_addr(&self, name: &str) -> Option<u64> {
        (0..self.nfunctab).find_map(|i| {
            let rec = self.func_rec(i)?;
            (self.cstring(rec.name_off)? == name).then_some(rec.entry)
        })
    }

    /// Map a program counter to its source file and line.
    ///
    /// Binary search over the function table, then a walk of the function's
    /// file and line delta tables to the nearest preceding breakpoint.
    #[must_use]
    pub fn pc_to_line(&self, pc: u64) -> Option<Location> {
        let rec = self.find_func(pc)?;
        let file_no = self.pc_value(rec.pcfile_off, rec.entry, pc)?;
        let line = self.pc_value(rec.pcln_off, rec.entry, pc)?;
        let file = self.file_name(file_no)?;
        Some(Location { file: PathBuf::from(file), line: u32::try_from(line).ok()? })
    }

    /// Entry pc of function table slot `i` (slot `nfunctab` is the end pc).
    fn functab_pc(&self, i: usize) -> Option<u64> {
        self.layout.uintptr_at(self.functab, 2 * i * self.layout.ptr_size)
    }

    /// Function record for function table slot `i`.
    fn func_rec(&self, i: usize) -> Option<FuncRec> {
        let off = self.layout.uintptr_at(self.functab, (2 * i + 1) * self.layout.ptr_size)?;
        let off = usize::try_from(off).ok()?;
        let ptr = self.layout.ptr_size;
        Some(FuncRec {
            entry: self.layout.uintptr_at(self.data, off)?,
            name_off: self.layout.u32_at(self.data, off + ptr)?,
            pcfile_off: self.layout.u32_at(self.data, off + ptr + 16)?,
            pcln_off: self.layout.u32_at(self.data, off + ptr + 20)?,
        })
    }

    /// Locate the function whose `[entry, next entry)` range covers `pc`.
    fn find_func(&self, pc: u64) -> Option<FuncRec> {
        if self.nfunctab == 0 || pc < self.functab_pc(0)? || pc >= self.functab_pc(self.nfunctab)?
        {
            return None;
        }
        // Last slot whose entry pc is <= pc
        let mut lo = 0;
        let mut hi = self.nfunctab;
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.functab_pc(mid)? <= pc {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        self.func_rec(lo)
    }

    /// Walk a pc-value delta table and return the value in effect at
    /// `target`. Values start at -1; pairs of (zigzag value delta, pc delta)
    /// advance a cursor from `entry` upward until the target is passed.
    fn pc_value(&self, off: u32, entry: u64, target: u64) -> Option<i32> {
        let mut p = self.data.get(off as usize..)?;
        let mut val: i32 = -1;
        let mut pc = entry;
        let mut first = true;
        loop {
            let uv = read_varint(&mut p)?;
            if uv == 0 && !first {
                return None;
            }
            first = false;
            val = val.wrapping_add(zigzag(uv));
            pc = pc.checked_add(u64::from(read_varint(&mut p)?) * u64::from(self.quantum))?;
            if target < pc {
                return Some(val);
            }
        }
    }

    /// File path for a file table index (index 0 is reserved).
    fn file_name(&self, file_no: i32) -> Option<&'data str> {
        let file_no = u32::try_from(file_no).ok()?;
        if file_no == 0 || file_no >= self.nfiletab {
            return None;
        }
        let name_off = self.layout.u32_at(self.filetab, 4 * file_no as usize)?;
        self.cstring(name_off)
    }

    /// NUL-terminated UTF-8 string at an offset into the blob.
    fn cstring(&self, off: u32) -> Option<&'data str> {
        let tail = self.data.get(off as usize..)?;
        let nul = tail.iter().position(|&b| b == 0)?;
        std::str::from_utf8(&tail[..nul]).ok()
    }
}

/// Little-endian base-128 varint, as emitted by the Go linker.
fn read_varint(p: &mut &[u8]) -> Option<u32> {
    let mut v: u32 = 0;
    let mut shift = 0;
    loop {
        let (&b, rest) = p.split_first()?;
        *p = rest;
        v |= u32::from(b & 0x7F) << shift;
        if b & 0x80 == 0 {
            return Some(v);
        }
        shift += 7;
        if shift > 28 {
            return None;
        }
    }
}

/// Unsigned delta to signed: odd means negated.
fn zigzag(uv: u32) -> i32 {
    if uv & 1 != 0 {
        !(uv >> 1) as i32
    } else {
        (uv >> 1) as i32
    }
}
