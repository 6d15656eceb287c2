//! Per-archive memoized derived data.

use crate::error::Result;
use crate::palette::WadPalette;
use crate::textures::PatchStore;
use crate::wad::{LumpLookup, PALETTE_LUMP};

/// The derived values an archive's consumers ask for repeatedly: the
/// decoded patch table (which embeds the PNAMES list) and the palette.
/// Each slot is filled at most once, on first request.
///
/// The `&mut self` receivers make the fill single-writer by
/// construction. To share across threads, fill the cache first and
/// then hand out shared references.
#[derive(Default)]
pub struct WadCache {
    patch_store: Option<PatchStore>,
    palette: Option<WadPalette>,
}

impl WadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The PNAMES table with its decoded patches.
    pub fn patch_store(&mut self, lookup: &impl LumpLookup) -> Result<&PatchStore> {
        match &mut self.patch_store {
            Some(store) => Ok(store),
            slot @ None => Ok(slot.insert(PatchStore::load(lookup)?)),
        }
    }

    /// The archive's palette.
    pub fn palette(&mut self, lookup: &impl LumpLookup) -> Result<&WadPalette> {
        match &mut self.palette {
            Some(palette) => Ok(palette),
            slot @ None => {
                let bytes = lookup.required_lump(PALETTE_LUMP)?;
                Ok(slot.insert(WadPalette::from_bytes(bytes)?))
            }
        }
    }
}
