//! The picture ("patch") image format: vertical runs of opaque pixels
//! over implicit transparency, one offset table entry per column.
//!
//! The lump starts with:
//!
//! | Field Size | Data Type | Content                                    |
//! |------------|-----------|--------------------------------------------|
//! | 0x00-0x01  | u16       | Width in pixels, and column count          |
//! | 0x02-0x03  | u16       | Height in pixels                           |
//! | 0x04-0x05  | i16       | X anchor for placement in a texture        |
//! | 0x06-0x07  | i16       | Y anchor for placement in a texture        |
//!
//! then `width` u32 offsets, each the absolute position of a column
//! within the lump. A column is a run of span records, `top:u8,
//! length:u8, pad:u8, pixels..., pad:u8`, closed by a `0xFF` byte in
//! the `top` position.

use crate::bytes::{read_i16, read_u16, read_u32};
use crate::error::{Result, WadError};

const HEADER_SIZE: usize = 8;
const COLUMN_END: u8 = 0xff;

/// One vertical run of opaque pixels, starting `top` rows below the
/// top of the column. Pixel bytes are palette indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSpan {
    pub top: u8,
    pub pixels: Vec<u8>,
}

/// The spans of one column in on-disk order. Rows no span covers are
/// transparent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchColumn {
    pub spans: Vec<PatchSpan>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadPatch {
    pub width: u16,
    pub height: u16,
    /// X anchor used when this patch is placed in a composite.
    pub left_offset: i16,
    /// Y anchor used when this patch is placed in a composite.
    pub top_offset: i16,
    /// Exactly `width` columns.
    pub columns: Vec<PatchColumn>,
}

impl WadPatch {
    /// Decode a picture lump.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let width = read_u16(data, 0)?;
        let height = read_u16(data, 2)?;
        let left_offset = read_i16(data, 4)?;
        let top_offset = read_i16(data, 6)?;

        let mut columns = Vec::with_capacity(width as usize);
        for i in 0..width as usize {
            let mut offset = read_u32(data, HEADER_SIZE + 4 * i)? as usize;
            let truncated =
                || WadError::Format(format!("column {i} runs past the end of the picture"));

            let mut column = PatchColumn::default();
            loop {
                let top = *data.get(offset).ok_or_else(truncated)?;
                if top == COLUMN_END {
                    break;
                }
                let length = *data.get(offset + 1).ok_or_else(truncated)? as usize;
                // One unused byte sits after the length and another
                // after the pixel run.
                let pixels = data
                    .get(offset + 3..offset + 3 + length)
                    .ok_or_else(truncated)?
                    .to_vec();
                column.spans.push(PatchSpan { top, pixels });
                offset += 4 + length;
            }
            columns.push(column);
        }

        Ok(WadPatch {
            width,
            height,
            left_offset,
            top_offset,
            columns,
        })
    }

    /// Encode back to lump bytes.
    ///
    /// Columns are laid out in order directly after the offset table,
    /// so a picture decoded from a compliant encoder's output (spans
    /// kept in their original per-column order) encodes back to the
    /// identical byte sequence.
    pub fn to_bytes(&self) -> Vec<u8> {
        let table_start = HEADER_SIZE;
        let data_start = table_start + 4 * self.columns.len();

        let mut out = Vec::with_capacity(data_start);
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.left_offset.to_le_bytes());
        out.extend_from_slice(&self.top_offset.to_le_bytes());
        out.resize(data_start, 0);

        for (i, column) in self.columns.iter().enumerate() {
            let offset = (out.len() as u32).to_le_bytes();
            out[table_start + 4 * i..table_start + 4 * (i + 1)].copy_from_slice(&offset);
            for span in &column.spans {
                debug_assert!(span.pixels.len() <= u8::MAX as usize);
                out.push(span.top);
                out.push(span.pixels.len() as u8);
                out.push(0);
                out.extend_from_slice(&span.pixels);
                out.push(0);
            }
            out.push(COLUMN_END);
        }
        out
    }
}
