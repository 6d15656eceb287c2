//! Bounds-checked little-endian reads over lump byte slices.

use crate::error::{Result, WadError};

pub(crate) fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    match data.get(offset..offset + 2) {
        Some(b) => Ok(u16::from_le_bytes([b[0], b[1]])),
        None => Err(truncated(offset)),
    }
}

pub(crate) fn read_i16(data: &[u8], offset: usize) -> Result<i16> {
    Ok(read_u16(data, offset)? as i16)
}

pub(crate) fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    match data.get(offset..offset + 4) {
        Some(b) => Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]])),
        None => Err(truncated(offset)),
    }
}

fn truncated(offset: usize) -> WadError {
    WadError::Format(format!("read past end of data at offset {offset}"))
}

/// Canonicalize a fixed-width on-disk name: cut at the first NUL,
/// uppercase. Names must be ASCII.
pub(crate) fn name_from_bytes(raw: &[u8]) -> Result<String> {
    let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
    let raw = &raw[..end];
    if !raw.is_ascii() {
        return Err(WadError::Format(format!("non-ASCII name {raw:02x?}")));
    }
    Ok(raw.iter().map(|b| b.to_ascii_uppercase() as char).collect())
}
