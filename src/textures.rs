//! The PNAMES and TEXTUREx lumps: named composite textures assembled
//! from placements of picture patches.
//!
//! PNAMES is a u32 count followed by 8-byte patch lump names; texture
//! definitions reference patches by index into that table. A TEXTUREx
//! lump is a u32 count, that many u32 offsets into the same lump, and
//! at each offset a texture record:
//!
//! | Field Size | Data Type | Content                                 |
//! |------------|-----------|-----------------------------------------|
//! | 0x00-0x07  | 8 ASCII   | Texture name, NUL padded                |
//! | 0x08-0x0b  |           | Legacy flags, ignored                   |
//! | 0x0c-0x0d  | u16       | Width                                   |
//! | 0x0e-0x0f  | u16       | Height                                  |
//! | 0x10-0x13  |           | Legacy column directory, ignored        |
//! | 0x14-0x15  | u16       | Patch placement count                   |
//!
//! followed by that many 10-byte placements of `x:i16, y:i16,
//! patch_index:u16` plus 4 legacy bytes each.

use log::{debug, warn};

use crate::bytes::{name_from_bytes, read_i16, read_u16, read_u32};
use crate::error::{Result, WadError};
use crate::picture::WadPatch;
use crate::wad::LumpLookup;

/// Name of the patch-name table lump.
pub const PNAMES_LUMP: &str = "PNAMES";

const TEXTURE_RECORD_SIZE: usize = 22;
const PLACEMENT_SIZE: usize = 10;

/// Decode the PNAMES lump into its ordered, canonicalized name list.
pub fn patch_names(data: &[u8]) -> Result<Vec<String>> {
    let count = read_u32(data, 0)? as usize;
    let mut names = Vec::with_capacity(count);
    for i in 0..count {
        let offset = 4 + 8 * i;
        let raw = data.get(offset..offset + 8).ok_or_else(|| {
            WadError::Format(format!("patch name table ends after {i} of {count} names"))
        })?;
        names.push(name_from_bytes(raw)?);
    }
    Ok(names)
}

/// The patch-name table together with each entry's decoded picture.
///
/// Decoding every referenced patch once up front means texture
/// composition never re-reads lump bytes; entries whose lump is
/// missing or malformed keep the error so textures referencing them
/// can report why they were skipped.
pub struct PatchStore {
    names: Vec<String>,
    patches: Vec<Result<WadPatch>>,
}

impl PatchStore {
    /// Read PNAMES through `lookup` and decode every named patch lump.
    pub fn load(lookup: &impl LumpLookup) -> Result<Self> {
        let names = patch_names(lookup.required_lump(PNAMES_LUMP)?)?;
        let mut patches = Vec::with_capacity(names.len());
        for name in &names {
            let patch = match lookup.lump_bytes(name) {
                Some(bytes) => WadPatch::from_bytes(bytes),
                None => Err(WadError::Lookup(name.clone())),
            };
            if let Err(why) = &patch {
                warn!("patch {name}: {why}");
            }
            patches.push(patch);
        }
        debug!("loaded {} patch names", names.len());
        Ok(PatchStore { names, patches })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Table entry name, the reference key texture records use.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// The decoded picture for a table index, if that entry resolved.
    pub fn patch(&self, index: usize) -> Option<&WadPatch> {
        self.patches.get(index).and_then(|p| p.as_ref().ok())
    }

    fn entry(&self, index: usize) -> Option<&Result<WadPatch>> {
        self.patches.get(index)
    }
}

/// One patch placement inside a texture.
#[derive(Debug, Clone)]
pub struct WadTexPatch {
    pub origin_x: i16,
    pub origin_y: i16,
    /// Index into the [`PatchStore`], validated during decode.
    pub patch_index: usize,
}

/// A named composite image definition: its size plus the patches that
/// paint it, in declaration order.
#[derive(Debug, Clone)]
pub struct WadTexture {
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub patches: Vec<WadTexPatch>,
}

/// A texture record that could not be decoded: the texture's name, or
/// `#N` where even the name field was unreadable, plus the reason.
#[derive(Debug, Clone)]
pub struct TextureFailure {
    pub texture: String,
    pub message: String,
}

/// Outcome of decoding one TEXTUREx lump. Failed records never abort
/// the lump; they land in `failures` for the caller to report.
pub struct TextureDirectory {
    pub textures: Vec<WadTexture>,
    pub failures: Vec<TextureFailure>,
}

/// Decode a TEXTURE1/TEXTURE2 lump.
///
/// Real archives routinely carry a few malformed records (bad offsets,
/// out-of-range patch indexes, references to lumps an override forgot
/// to ship) next to many valid ones, so each record is decoded on its
/// own: a failure is recorded and skipped while the rest of the
/// directory proceeds. Only a truncated count or offset table is fatal
/// to the whole lump.
pub fn load_textures(data: &[u8], store: &PatchStore) -> Result<TextureDirectory> {
    let count = read_u32(data, 0)? as usize;
    let mut textures = Vec::with_capacity(count);
    let mut failures = Vec::new();

    for i in 0..count {
        let offset = read_u32(data, 4 + 4 * i)? as usize;
        match read_texture(data, offset, store) {
            Ok(texture) => textures.push(texture),
            Err(why) => {
                let texture = data
                    .get(offset..offset + 8)
                    .and_then(|raw| name_from_bytes(raw).ok())
                    .unwrap_or_else(|| format!("#{i}"));
                warn!("texture {texture}: {why}");
                failures.push(TextureFailure {
                    texture,
                    message: why.to_string(),
                });
            }
        }
    }
    debug!(
        "decoded {} textures, skipped {}",
        textures.len(),
        failures.len()
    );
    Ok(TextureDirectory { textures, failures })
}

fn read_texture(data: &[u8], offset: usize, store: &PatchStore) -> Result<WadTexture> {
    let raw = data.get(offset..offset + 8).ok_or_else(|| {
        WadError::Format(format!("texture record at {offset} is past the end of the lump"))
    })?;
    let name = name_from_bytes(raw)?;
    let width = read_u16(data, offset + 12)?;
    let height = read_u16(data, offset + 14)?;
    let patch_count = read_u16(data, offset + 20)? as usize;

    let mut patches = Vec::with_capacity(patch_count);
    for p in 0..patch_count {
        let record = offset + TEXTURE_RECORD_SIZE + PLACEMENT_SIZE * p;
        let origin_x = read_i16(data, record)?;
        let origin_y = read_i16(data, record + 2)?;
        let patch_index = read_u16(data, record + 4)? as usize;
        match store.entry(patch_index) {
            None => {
                return Err(WadError::Format(format!(
                    "patch index {patch_index} is outside the {}-entry name table",
                    store.len()
                )));
            }
            Some(Err(why)) => return Err(why.clone()),
            Some(Ok(_)) => patches.push(WadTexPatch {
                origin_x,
                origin_y,
                patch_index,
            }),
        }
    }

    Ok(WadTexture {
        name,
        width,
        height,
        patches,
    })
}
