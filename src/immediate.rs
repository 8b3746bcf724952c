//! Decoding of the immediate operands of relative jumps.
//!
//! Callers check that the bytes being read lie inside `code`.

use crate::opcodes::{self, RJUMP, RJUMPI, RJUMPV};

/// Size of an `RJUMP`/`RJUMPI` offset and of each `RJUMPV` table entry.
pub const RELATIVE_OFFSET_SIZE: usize = 2;

/// Reads the big-endian two's complement offset at `pos`.
#[inline]
pub fn relative_offset(code: &[u8], pos: usize) -> i16 {
    i16::from_be_bytes([code[pos], code[pos + 1]])
}

/// Reads the number of entries of an `RJUMPV` table at `pos`.
#[inline]
pub fn vector_size(code: &[u8], pos: usize) -> usize {
    code[pos] as usize
}

/// Immediate bytes of an `RJUMPV` table with `entries` entries, size byte
/// included.
#[inline]
pub fn table_len(entries: usize) -> usize {
    1 + RELATIVE_OFFSET_SIZE * entries
}

/// Number of immediate bytes following the opcode at `pos`. The result is
/// not clipped to the code; a missing `RJUMPV` size byte counts as an empty
/// table.
pub fn immediate_len(code: &[u8], pos: usize) -> usize {
    match code[pos] {
        RJUMP | RJUMPI => RELATIVE_OFFSET_SIZE,
        RJUMPV => table_len(code.get(pos + 1).map_or(0, |size| *size as usize)),
        opcode => opcodes::push_data_len(opcode).unwrap_or(0),
    }
}
