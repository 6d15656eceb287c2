//! The WAD container: header, lump directory, and name lookup.
//!
//! The header structure is:
//!
//! | Field Size | Data Type    | Content                                          |
//! |------------|--------------|--------------------------------------------------|
//! | 0x00-0x03  | 4 ASCII char | *Must* be either "IWAD" or "PWAD"                |
//! | 0x04-0x07  | u32          | The number of entries in the directory           |
//! | 0x08-0x0b  | u32          | Offset in bytes to the directory                 |
//!
//! followed (at the directory offset) by `count` 16-byte entries:
//!
//! | Field Size | Data Type    | Content                                          |
//! |------------|--------------|--------------------------------------------------|
//! | 0x00-0x03  | u32          | Offset to the start of the lump data             |
//! | 0x04-0x07  | u32          | Size of the lump in bytes                        |
//! | 0x08-0x0f  | 8 ASCII char | Name of the lump, NUL padded                     |

use std::collections::HashMap;

use log::debug;

use crate::bytes::{name_from_bytes, read_u32};
use crate::error::{Result, WadError};

/// Name of the palette lump. A merged lookup keeps the base archive's
/// copy of this lump even when the override ships its own, see
/// [`WadData::merge`].
pub const PALETTE_LUMP: &str = "PLAYPAL";

const HEADER_SIZE: usize = 12;
const DIR_ENTRY_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WadKind {
    /// An `IWAD`: a base game archive, complete on its own.
    IWad,
    /// A `PWAD`: a patch archive overriding lumps of a base archive.
    PWad,
}

/// One named chunk of data and where it lives in the archive.
#[derive(Debug, Clone)]
pub struct Lump {
    /// Canonical name: at most 8 ASCII chars, uppercased.
    pub name: String,
    /// Index of this lump in the directory.
    pub position: usize,
    offset: usize,
    size: usize,
}

/// An archive parsed in to memory: the raw bytes, the lump directory
/// in on-disk order, and a name lookup.
///
/// Immutable once constructed. Lump payloads are borrowed slices of
/// the archive's buffer, nothing is copied out.
#[derive(Debug)]
pub struct WadData {
    kind: WadKind,
    data: Vec<u8>,
    lumps: Vec<Lump>,
    /// Uppercase name to index in `lumps`. Built in directory order so
    /// a later lump with the same name overwrites an earlier one,
    /// matching the engine's directory semantics.
    lookup: HashMap<String, usize>,
}

impl WadData {
    /// Parse a complete archive byte buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(WadError::Format(format!(
                "{} bytes is too short for a WAD header",
                data.len()
            )));
        }
        let kind = match &data[0..4] {
            b"IWAD" => WadKind::IWad,
            b"PWAD" => WadKind::PWad,
            _ => return Err(WadError::Format("bad magic".to_string())),
        };
        let count = read_u32(&data, 4)? as usize;
        let dir_offset = read_u32(&data, 8)? as usize;

        let mut lumps = Vec::with_capacity(count);
        let mut lookup = HashMap::with_capacity(count);
        for i in 0..count {
            let entry = dir_offset + i * DIR_ENTRY_SIZE;
            let name_raw = data.get(entry + 8..entry + 16).ok_or_else(|| {
                WadError::Format(format!("directory ends after {i} of {count} entries"))
            })?;
            let name = name_from_bytes(name_raw)?;
            let offset = read_u32(&data, entry)? as usize;
            let size = read_u32(&data, entry + 4)? as usize;
            if offset + size > data.len() {
                return Err(WadError::Format(format!(
                    "lump {name} extends past the end of the archive"
                )));
            }
            lookup.insert(name.clone(), i);
            lumps.push(Lump {
                name,
                position: i,
                offset,
                size,
            });
        }
        debug!("parsed {} lumps from {kind:?} archive", lumps.len());

        Ok(WadData {
            kind,
            data,
            lumps,
            lookup,
        })
    }

    pub fn kind(&self) -> WadKind {
        self.kind
    }

    /// All lumps in directory order, duplicates included.
    pub fn lumps(&self) -> &[Lump] {
        &self.lumps
    }

    /// Look a lump up by name, case-insensitive. Where the directory
    /// holds several lumps with this name the last one wins.
    pub fn lump(&self, name: &str) -> Option<&Lump> {
        let index = self.lookup.get(&name.to_ascii_uppercase())?;
        Some(&self.lumps[*index])
    }

    /// Payload bytes of a lump belonging to this archive.
    pub fn lump_data(&self, lump: &Lump) -> &[u8] {
        &self.data[lump.offset..lump.offset + lump.size]
    }

    /// Combine this archive (the base) with an override archive.
    ///
    /// For every name the override's lump wins, with one exception:
    /// when the base defines [`PALETTE_LUMP`] the base's palette is
    /// kept even if the override carries its own. Derivative archives
    /// commonly repackage the base palette with slight drift, which
    /// would otherwise split identical textures apart; the cost is
    /// that a deliberately redesigned palette is discarded too.
    pub fn merge<'w>(&'w self, over: &'w WadData) -> MergedLookup<'w> {
        let mut lookup = HashMap::with_capacity(self.lookup.len() + over.lookup.len());
        for (name, index) in &self.lookup {
            lookup.insert(name.as_str(), (self, &self.lumps[*index]));
        }
        let keep_base_palette = self.lookup.contains_key(PALETTE_LUMP);
        for (name, index) in &over.lookup {
            if keep_base_palette && name == PALETTE_LUMP {
                continue;
            }
            lookup.insert(name.as_str(), (over, &over.lumps[*index]));
        }
        MergedLookup { lookup }
    }
}

/// Name resolution over one or more archives. The decoders take this
/// as their seam so they never care whether a single [`WadData`] or a
/// [`MergedLookup`] backs the names.
pub trait LumpLookup {
    /// Payload bytes for the named lump if present, case-insensitive.
    fn lump_bytes(&self, name: &str) -> Option<&[u8]>;

    /// As [`lump_bytes`](Self::lump_bytes), but a missing lump is a
    /// [`WadError::Lookup`].
    fn required_lump(&self, name: &str) -> Result<&[u8]> {
        self.lump_bytes(name)
            .ok_or_else(|| WadError::Lookup(name.to_ascii_uppercase()))
    }

    fn lump_exists(&self, name: &str) -> bool {
        self.lump_bytes(name).is_some()
    }
}

impl LumpLookup for WadData {
    fn lump_bytes(&self, name: &str) -> Option<&[u8]> {
        self.lump(name).map(|lump| self.lump_data(lump))
    }
}

/// The name lookup of a base archive patched by an override archive.
///
/// Holds no lump list of its own: enumerating "all lumps" of a merge
/// is unsupported, only named resolution is.
pub struct MergedLookup<'w> {
    lookup: HashMap<&'w str, (&'w WadData, &'w Lump)>,
}

impl MergedLookup<'_> {
    pub fn lump(&self, name: &str) -> Option<&Lump> {
        let key = name.to_ascii_uppercase();
        self.lookup.get(key.as_str()).map(|(_, lump)| *lump)
    }
}

impl LumpLookup for MergedLookup<'_> {
    fn lump_bytes(&self, name: &str) -> Option<&[u8]> {
        let key = name.to_ascii_uppercase();
        self.lookup
            .get(key.as_str())
            .map(|(wad, lump)| wad.lump_data(lump))
    }
}
